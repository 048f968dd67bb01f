use std::fmt;
use std::fmt::Formatter;

use crate::miniseed::Precision;

/// Known data compression codes.
/// ```text
/// 0   Text, UTF-8 allowed, use ASCII for maximum portability, no structure defined
/// 1   16-bit integer (two’s complement)
/// 3   32-bit integer (two’s complement)
/// 4   32-bit floats (IEEE float)
/// 5   64-bit floats (IEEE double)
/// 10  Steim-1 integer compression
/// 11  Steim-2 integer compression
/// 19  Steim-3 integer compression (not in common use in archives)
/// 100 Opaque data - only for use in special scenarios, not intended for archiving
/// ```
/// miniSEED 3 stores the primitive types little endian and Steim frames big
/// endian; miniSEED 2 uses the word order of blockette 1000 for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEncoding {
    TEXT,
    INT16,
    INT32,
    FLOAT32,
    FLOAT64,
    STEIM1,
    STEIM2,
    STEIM3,
    OPAQUE,
    UNKNOWN(u8),
}

impl DataEncoding {
    /// Creates a DataEncoding based on the input integer
    pub fn from_int(val: u8) -> DataEncoding {
        match val {
            0 => DataEncoding::TEXT,
            1 => DataEncoding::INT16,
            3 => DataEncoding::INT32,
            4 => DataEncoding::FLOAT32,
            5 => DataEncoding::FLOAT64,
            10 => DataEncoding::STEIM1,
            11 => DataEncoding::STEIM2,
            19 => DataEncoding::STEIM3,
            100 => DataEncoding::OPAQUE,
            _ => DataEncoding::UNKNOWN(val),
        }
    }
    /// The integer value, as a u8, of the encoding
    pub fn value(&self) -> u8 {
        match &self {
            DataEncoding::TEXT => 0,
            DataEncoding::INT16 => 1,
            DataEncoding::INT32 => 3,
            DataEncoding::FLOAT32 => 4,
            DataEncoding::FLOAT64 => 5,
            DataEncoding::STEIM1 => 10,
            DataEncoding::STEIM2 => 11,
            DataEncoding::STEIM3 => 19,
            DataEncoding::OPAQUE => 100,
            DataEncoding::UNKNOWN(val) => *val,
        }
    }

    /// The sample buffer type this encoding unpacks into, `None` for
    /// encodings that cannot be unpacked.
    pub fn precision(&self) -> Option<Precision> {
        match self {
            DataEncoding::INT16
            | DataEncoding::INT32
            | DataEncoding::STEIM1
            | DataEncoding::STEIM2 => Some(Precision::Int32),
            DataEncoding::FLOAT32 => Some(Precision::Float32),
            DataEncoding::FLOAT64 => Some(Precision::Float64),
            _ => None,
        }
    }

    /// Bytes per sample of the uncompressed encodings.
    pub fn sample_size(&self) -> Option<usize> {
        match self {
            DataEncoding::INT16 => Some(2),
            DataEncoding::INT32 | DataEncoding::FLOAT32 => Some(4),
            DataEncoding::FLOAT64 => Some(8),
            _ => None,
        }
    }

    pub fn is_steim(&self) -> bool {
        matches!(self, DataEncoding::STEIM1 | DataEncoding::STEIM2)
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DataEncoding::TEXT => write!(
                f,
                "Text, UTF-8 allowed, use ASCII for maximum portability, no structure defined"
            ),
            DataEncoding::INT16 => write!(f, "16-bit integer (two’s complement)"),
            DataEncoding::INT32 => write!(f, "32-bit integer (two’s complement)"),
            DataEncoding::FLOAT32 => write!(f, "32-bit floats (IEEE float)"),
            DataEncoding::FLOAT64 => write!(f, "64-bit floats (IEEE double)"),
            DataEncoding::STEIM1 => write!(f, "Steim-1 integer compression"),
            DataEncoding::STEIM2 => write!(f, "Steim-2 integer compression"),
            DataEncoding::STEIM3 => write!(
                f,
                "Steim-3 integer compression (not in common use in archives)"
            ),
            DataEncoding::OPAQUE => write!(
                f,
                "Opaque data - only for use in special scenarios, not intended for archiving"
            ),
            DataEncoding::UNKNOWN(val) => write!(f, "Unknown encoding: {}", val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_of_encodings() {
        assert_eq!(DataEncoding::from_int(1).precision(), Some(Precision::Int32));
        assert_eq!(DataEncoding::from_int(11).precision(), Some(Precision::Int32));
        assert_eq!(DataEncoding::from_int(4).precision(), Some(Precision::Float32));
        assert_eq!(DataEncoding::from_int(5).precision(), Some(Precision::Float64));
        assert_eq!(DataEncoding::from_int(0).precision(), None);
        assert_eq!(DataEncoding::from_int(19).precision(), None);
        assert_eq!(DataEncoding::from_int(42), DataEncoding::UNKNOWN(42));
        assert_eq!(DataEncoding::UNKNOWN(42).value(), 42);
    }
}
