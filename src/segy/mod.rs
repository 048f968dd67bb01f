//! SEG-Y revision 2 file headers: the 3200 byte EBCDIC textual header and
//! the 400 byte binary file header.

mod binary_file_header;
mod codes;
pub mod ebcdic;
mod segy2;
mod textual_header;

pub use self::binary_file_header::{BinaryFileHeader, BINARY_HEADER_SIZE, INTEGER_CONSTANT};
pub use self::codes::{
    AmplitudeRecoveryMethod, BinaryGainRecovered, CorrelatedDataTraces, DataFormat,
    ImpulsePolarity, MeasurementSystem, SweepType, TaperType, TimeBasis, TraceSortingCode,
    VibratoryPolarity,
};
pub use self::segy2::{Segy2, FILE_HEADER_SIZE, TRACE_HEADER_SIZE};
pub use self::textual_header::{TextualHeader, CARD_COUNT, CARD_WIDTH, TEXTUAL_HEADER_SIZE};
