use log::debug;
use std::fs;
use std::path::Path;

use crate::segy::binary_file_header::{BinaryFileHeader, BINARY_HEADER_SIZE};
use crate::segy::textual_header::{TextualHeader, TEXTUAL_HEADER_SIZE};
use crate::{Endian, SeisError};

/// Size of the textual plus binary file header.
pub const FILE_HEADER_SIZE: usize = TEXTUAL_HEADER_SIZE + BINARY_HEADER_SIZE;
/// Size of a standard trace header.
pub const TRACE_HEADER_SIZE: usize = 240;

/// The file level headers of a SEG-Y revision 2 file.
///
/// Trace records are not decoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segy2 {
    textual_header: TextualHeader,
    binary_header: BinaryFileHeader,
    endian: Option<Endian>,
}

impl Segy2 {
    pub fn new() -> Segy2 {
        Segy2::default()
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Segy2, SeisError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SeisError::FileNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        Segy2::from_bytes(&bytes)
    }

    /// Decodes the 3600 byte file header at the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Segy2, SeisError> {
        let textual_header = TextualHeader::read(bytes)?;
        let binary = &bytes[TEXTUAL_HEADER_SIZE..FILE_HEADER_SIZE];
        let endian = BinaryFileHeader::detect_endian(binary);
        debug!("SEG-Y file of {} bytes, binary header is {}", bytes.len(), endian);
        let binary_header = BinaryFileHeader::from_bytes(binary, endian)?;
        Ok(Segy2 {
            textual_header,
            binary_header,
            endian: Some(endian),
        })
    }

    /// Packs the textual header as EBCDIC followed by the binary header.
    pub fn header_bytes(&self, endian: Endian) -> Result<Vec<u8>, SeisError> {
        let mut out = self.textual_header.to_ebcdic();
        self.binary_header.write_to(&mut out, endian)?;
        Ok(out)
    }

    pub fn textual_header(&self) -> &TextualHeader {
        &self.textual_header
    }

    pub fn set_textual_header(&mut self, header: TextualHeader) {
        self.textual_header = header;
    }

    pub fn binary_header(&self) -> &BinaryFileHeader {
        &self.binary_header
    }

    pub fn set_binary_header(&mut self, header: BinaryFileHeader) {
        self.binary_header = header;
    }

    /// Byte order of the file this was read from.
    pub fn endian(&self) -> Option<Endian> {
        self.endian
    }

    /// Bytes in one fixed length trace record: header plus samples. Fails
    /// if the sample count or format was never set.
    pub fn trace_record_size(&self) -> Result<usize, SeisError> {
        let format = self.binary_header.data_format()?;
        let samples = self.binary_header.number_of_samples_per_trace() as usize;
        if samples == 0 {
            return Err(SeisError::NotSet(String::from("number of samples per trace")));
        }
        let extra = self.binary_header.max_additional_trace_headers() as usize;
        Ok(TRACE_HEADER_SIZE * (1 + extra) + samples * format.bytes_per_sample())
    }
}
