use thiserror::Error;

use crate::DataType;

/// Errors that can occur while decoding a raw attribute or parameter value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Buffer length does not match the fixed width of the type
    #[error("Expected {expected} bytes for {type_name}, found {found}")]
    WrongLength {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Buffer ends before the element count of a string says it should
    #[error("String declares {declared} UTF-16 units but only {available} bytes follow the count")]
    TruncatedString { declared: usize, available: usize },

    /// HLAboolean must be exactly 0 or 1
    #[error("Invalid HLAboolean value {0}")]
    InvalidBoolean(i32),

    /// UTF-16 data that does not decode to valid Unicode
    #[error("Invalid UTF-16 data in string or char value")]
    InvalidUtf16,

    /// A `char` outside the Basic Multilingual Plane has no HLAunicodeChar form
    #[error("Character U+{0:04X} does not fit in a single HLAunicodeChar")]
    CharOutOfRange(u32),

    /// Negative element count in a string header
    #[error("Negative element count {0} in HLAunicodeString")]
    NegativeLength(i32),
}

/// A scalar with a fixed HLA 1516 standard binary representation.
///
/// All multi-byte forms are big-endian. Strings are HLAunicodeString: a
/// 4-byte element count followed by UTF-16BE code units.
pub trait HlaScalar: Sized {
    /// Tag describing this type in the object model
    const DATA_TYPE: DataType;

    fn encode(&self) -> Result<Vec<u8>, CodecError>;

    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

fn fixed<const N: usize>(type_name: &'static str, bytes: &[u8]) -> Result<[u8; N], CodecError> {
    bytes.try_into().map_err(|_| CodecError::WrongLength {
        type_name,
        expected: N,
        found: bytes.len(),
    })
}

macro_rules! big_endian_scalar {
    ($ty:ty, $data_type:expr, $type_name:literal, $width:literal) => {
        impl HlaScalar for $ty {
            const DATA_TYPE: DataType = $data_type;

            fn encode(&self) -> Result<Vec<u8>, CodecError> {
                Ok(self.to_be_bytes().to_vec())
            }

            fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
                Ok(<$ty>::from_be_bytes(fixed::<$width>($type_name, bytes)?))
            }
        }
    };
}

big_endian_scalar!(u8, DataType::Byte, "HLAoctet", 1);
big_endian_scalar!(i16, DataType::Short, "HLAinteger16BE", 2);
big_endian_scalar!(i32, DataType::Int, "HLAinteger32BE", 4);
big_endian_scalar!(i64, DataType::Long, "HLAinteger64BE", 8);
big_endian_scalar!(f32, DataType::Float, "HLAfloat32BE", 4);
big_endian_scalar!(f64, DataType::Double, "HLAfloat64BE", 8);

impl HlaScalar for bool {
    const DATA_TYPE: DataType = DataType::Boolean;

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        i32::from(*self).encode()
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        match i32::decode(bytes)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBoolean(other)),
        }
    }
}

impl HlaScalar for char {
    const DATA_TYPE: DataType = DataType::Char;

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut units = [0u16; 2];
        match self.encode_utf16(&mut units) {
            [unit] => Ok(unit.to_be_bytes().to_vec()),
            _ => Err(CodecError::CharOutOfRange(u32::from(*self))),
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let unit = u16::from_be_bytes(fixed::<2>("HLAunicodeChar", bytes)?);
        char::decode_utf16([unit])
            .next()
            .and_then(Result::ok)
            .ok_or(CodecError::InvalidUtf16)
    }
}

impl HlaScalar for String {
    const DATA_TYPE: DataType = DataType::String;

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let units: Vec<u16> = self.encode_utf16().collect();
        let mut bytes = Vec::with_capacity(4 + units.len() * 2);
        // element counts above i32::MAX cannot be represented on the wire
        let count = i32::try_from(units.len()).map_err(|_| CodecError::WrongLength {
            type_name: "HLAunicodeString",
            expected: i32::MAX as usize,
            found: units.len(),
        })?;
        bytes.extend_from_slice(&count.to_be_bytes());
        for unit in units {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Ok(bytes)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < 4 {
            return Err(CodecError::WrongLength {
                type_name: "HLAunicodeString",
                expected: 4,
                found: bytes.len(),
            });
        }
        let (header, body) = bytes.split_at(4);
        let count = i32::decode(header)?;
        let count = usize::try_from(count).map_err(|_| CodecError::NegativeLength(count))?;
        if body.len() != count * 2 {
            return Err(CodecError::TruncatedString {
                declared: count,
                available: body.len(),
            });
        }
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|_| CodecError::InvalidUtf16)
    }
}
