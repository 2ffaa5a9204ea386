use std::collections::HashMap;

pub mod hla_interaction;
pub mod hla_object;

/// Raw attribute or parameter values keyed by member name
pub type ValueMap = HashMap<String, Vec<u8>>;
