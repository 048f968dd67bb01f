//! SAC (Seismic Analysis Code) binary files: a 632 byte header followed by
//! `NPTS` 4 byte floating point samples, in either byte order.

mod fields;
mod header;
mod waveform;

pub use self::fields::{Character, Double, Integer, Logical};
pub use self::header::SacHeader;
pub use self::waveform::{detect_endian, SacWaveform};

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 632;

/// On-disk value of an unset floating point field.
pub const UNDEFINED_DOUBLE: f64 = -12345.0;
/// On-disk value of an unset integer or logical field.
pub const UNDEFINED_INTEGER: i32 = -12345;
/// On-disk text of an unset character field, before padding.
pub const UNDEFINED_STRING: &str = "-12345";
