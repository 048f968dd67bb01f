//! Readers and writers for seismic waveform files.
//!
//! - [`sac`]: SAC binary files, the 632 byte header and its samples, in either byte order.
//! - [`segy`]: the SEG-Y revision 2 textual (EBCDIC) and binary file headers.
//! - [`miniseed`]: miniSEED 2 and 3 records, decoding one channel out of a multiplexed file.
//!
//! Every reader stamps start times with [`Time`], and decoded channels can be
//! addressed by [`WaveformIdentifier`].
//!
//! #Example
//!
//! ```
//! use seisio::miniseed::{ReadOptions, Sncl, Trace};
//! # fn main() -> seisio::Result<()> {
//! let mut trace = Trace::new();
//! let sncl = Sncl::new("WY", "YWB", "HHZ", "01");
//! let missing = trace.read_from_bytes(&[], &sncl, &ReadOptions::default());
//! assert_eq!(missing.unwrap_err().kind(), seisio::ErrorKind::NotFound);
//! # Ok(())
//! # }
//! ```

mod endian;
pub mod miniseed;
pub mod sac;
mod seis_error;
pub mod segy;
mod time;
mod waveform_identifier;

pub use self::endian::Endian;
pub use self::seis_error::{ErrorKind, Result, SeisError};
pub use self::time::Time;
pub use self::waveform_identifier::{WaveformIdentifier, DEFAULT_LOCATION, IDENTIFIER_HASH};
