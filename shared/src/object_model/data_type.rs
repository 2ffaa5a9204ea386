use serde::{Deserialize, Serialize};

/// Scalar type of an attribute or parameter, as declared in the object model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataType {
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DataType {
    /// Maps either a plain type name (`int`, `double`, ...) or an HLA 1516
    /// basic/simple data type name (`HLAinteger32BE`, `HLAunicodeString`, ...)
    /// to a tag. Anything unrecognised is [`DataType::Unknown`].
    pub fn from_type_name(name: &str) -> DataType {
        match name {
            "byte" | "HLAoctet" | "HLAbyte" => DataType::Byte,
            "char" | "HLAASCIIchar" | "HLAunicodeChar" => DataType::Char,
            "short" | "HLAinteger16BE" => DataType::Short,
            "int" | "HLAinteger32BE" => DataType::Int,
            "long" | "HLAinteger64BE" => DataType::Long,
            "float" | "HLAfloat32BE" => DataType::Float,
            "double" | "HLAfloat64BE" => DataType::Double,
            "boolean" | "bool" | "HLAboolean" => DataType::Boolean,
            "string" | "String" | "HLAASCIIstring" | "HLAunicodeString" => DataType::String,
            _ => DataType::Unknown,
        }
    }

    /// Encoded width in bytes, or `None` for variable-length and unknown types
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            DataType::Byte => Some(1),
            DataType::Char | DataType::Short => Some(2),
            DataType::Int | DataType::Float | DataType::Boolean => Some(4),
            DataType::Long | DataType::Double => Some(8),
            DataType::String | DataType::Unknown => None,
        }
    }
}
