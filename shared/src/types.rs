use std::fmt;

/// Federation time as carried by the RTI's HLAfloat64Time representation
pub type LogicalTime = f64;

macro_rules! rti_handle {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($inner);

        impl $name {
            pub fn new(value: $inner) -> Self {
                Self(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

rti_handle!(
    /// Handle the RTI assigns to a federate once it has joined a federation
    FederateHandle(u32)
);
rti_handle!(
    /// Wire handle of an object class
    ObjectClassHandle(u32)
);
rti_handle!(
    /// Wire handle of an attribute, unique within its object class
    AttributeHandle(u32)
);
rti_handle!(
    /// Wire handle of an interaction class
    InteractionClassHandle(u32)
);
rti_handle!(
    /// Wire handle of an interaction parameter, unique within its interaction class
    ParameterHandle(u32)
);
rti_handle!(
    /// Opaque handle of one registered object instance
    ObjectInstanceHandle(u64)
);
