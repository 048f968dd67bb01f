//! miniSEED 2 and 3 record parsing and single channel trace decoding.

mod data_encoding;
mod header;
mod record;
mod sncl;
mod steim;
mod trace;
mod trace_list;

use serde::{Deserialize, Serialize};

pub use self::data_encoding::DataEncoding;
pub use self::header::{Mseed2Header, Mseed3Header, FIXED_HEADER_SIZE, MS2_FIXED_HEADER_SIZE};
pub use self::record::{pack_mseed3, read_records, Record, CASTAGNOLI};
pub use self::sncl::{FdsnSourceIdentifier, Sncl, MAX_CODE_LENGTH};
pub use self::steim::{decode_steim1, decode_steim2};
pub use self::trace::{ChannelId, Precision, Samples, Trace, WaveformData};
pub use self::trace_list::{Segment, TraceId, TraceList};

/// How records are read and joined into segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Check the CRC of miniSEED 3 records.
    pub validate_crc: bool,
    /// Largest gap or overlap, in seconds, between records that still join
    /// one segment. Defaults to half a sample period.
    pub time_tolerance: Option<f64>,
    /// Largest relative sample rate difference between joined records.
    pub sample_rate_tolerance: f64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            validate_crc: true,
            time_tolerance: None,
            sample_rate_tolerance: 1.0e-4,
        }
    }
}
