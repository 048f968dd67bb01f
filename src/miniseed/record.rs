use byteorder::{LittleEndian, WriteBytesExt};
use crc::{Crc, CRC_32_ISCSI};
use log::{debug, warn};
use std::fmt;

use crate::miniseed::data_encoding::DataEncoding;
use crate::miniseed::header::{
    Mseed2Header, Mseed3Header, CRC_OFFSET, FIXED_HEADER_SIZE, MS2_FIXED_HEADER_SIZE,
};
use crate::miniseed::sncl::Sncl;
use crate::miniseed::steim::{self, decode_steim1, decode_steim2};
use crate::miniseed::trace::Samples;
use crate::miniseed::ReadOptions;
use crate::{Endian, SeisError};

/// CRC-32C used by miniSEED 3 records.
pub const CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

const BLOCKETTE_100: u16 = 100;
const BLOCKETTE_1000: u16 = 1000;
const BLOCKETTE_1001: u16 = 1001;

/// One decoded miniSEED 2 or 3 record header plus its still encoded data.
#[derive(Debug, Clone)]
pub struct Record {
    /// FDSN source identifier, `FDSN:NET_STA_LOC_B_S_SS`.
    pub identifier: String,
    pub format_version: u8,
    /// Start time in epoch seconds.
    pub start: f64,
    pub sample_rate: f64,
    pub num_samples: usize,
    pub encoding: DataEncoding,
    /// Byte order of the encoded data.
    pub endian: Endian,
    /// Byte offset of this record in the scanned buffer.
    pub offset: usize,
    /// Total record length in bytes.
    pub length: usize,
    pub data: Vec<u8>,
}

impl Record {
    /// Parses the record at the start of `bytes`, either miniSEED 2 or 3.
    /// `offset` is only used for messages and bookkeeping.
    pub fn from_bytes(
        bytes: &[u8],
        offset: usize,
        options: &ReadOptions,
    ) -> Result<Record, SeisError> {
        if Mseed3Header::is_header(bytes) {
            Record::from_mseed3(bytes, offset, options)
        } else if Mseed2Header::is_header(bytes) {
            Record::from_mseed2(bytes, offset)
        } else {
            Err(SeisError::BadRecord(
                offset,
                String::from("not a miniSEED 2 or 3 record header"),
            ))
        }
    }

    fn from_mseed3(
        bytes: &[u8],
        offset: usize,
        options: &ReadOptions,
    ) -> Result<Record, SeisError> {
        let header = Mseed3Header::from_bytes(bytes)?;
        let length = header.record_size();
        if bytes.len() < length {
            return Err(SeisError::InsufficientBytes(bytes.len(), length));
        }
        if options.validate_crc {
            let mut digest = CASTAGNOLI.digest();
            digest.update(&bytes[0..CRC_OFFSET]);
            // crc field is zero for crc calculation
            digest.update(&[0; 4]);
            digest.update(&bytes[CRC_OFFSET + 4..length]);
            let crc_calc = digest.finalize();
            if crc_calc != header.crc {
                return Err(SeisError::CrcInvalid(crc_calc, header.crc));
            }
        }
        let id_end = FIXED_HEADER_SIZE + header.identifier_length as usize;
        let identifier = String::from_utf8(bytes[FIXED_HEADER_SIZE..id_end].to_vec())?;
        let data_start = id_end + header.extra_headers_length as usize;
        let num_samples = header.num_samples as usize;
        if let Some(size) = header.encoding.sample_size() {
            let expected = size * num_samples;
            if header.data_length as usize != expected {
                return Err(SeisError::DataLength(
                    expected,
                    num_samples,
                    header.encoding.value(),
                    header.data_length as usize,
                ));
            }
        }
        let start = header.start_epoch().ok_or_else(|| {
            SeisError::BadRecord(offset, format!("invalid start time in {}", identifier))
        })?;
        let endian = if header.encoding.is_steim() {
            Endian::Big
        } else {
            Endian::Little
        };
        Ok(Record {
            identifier,
            format_version: header.format_version,
            start,
            sample_rate: header.sample_rate(),
            num_samples,
            encoding: header.encoding,
            endian,
            offset,
            length,
            data: bytes[data_start..length].to_vec(),
        })
    }

    fn from_mseed2(bytes: &[u8], offset: usize) -> Result<Record, SeisError> {
        let header = Mseed2Header::from_bytes(bytes)?;
        let mut actual_rate = None;
        let mut b1000 = None;
        let mut microsecond = 0i8;

        let mut next = header.first_blockette as usize;
        let mut count = 0;
        while next != 0 && count < header.num_blockettes {
            if next < MS2_FIXED_HEADER_SIZE || next + 8 > bytes.len() {
                return Err(SeisError::BadRecord(
                    offset,
                    format!("blockette offset {} outside record", next),
                ));
            }
            let blockette_type = header.endian.read_u16(&bytes[next..next + 2]);
            let following = header.endian.read_u16(&bytes[next + 2..next + 4]) as usize;
            match blockette_type {
                BLOCKETTE_100 => {
                    actual_rate = Some(header.endian.read_f32(&bytes[next + 4..next + 8]) as f64)
                }
                BLOCKETTE_1000 => b1000 = Some((bytes[next + 4], bytes[next + 5], bytes[next + 6])),
                BLOCKETTE_1001 => microsecond = bytes[next + 5] as i8,
                other => debug!("skipping blockette {} at {}", other, offset + next),
            }
            if following != 0 && following <= next {
                return Err(SeisError::BadRecord(
                    offset,
                    format!("blockette chain loops back to {}", following),
                ));
            }
            next = following;
            count += 1;
        }

        let (encoding, word_order, exponent) = b1000.ok_or_else(|| {
            SeisError::BadRecord(offset, String::from("miniSEED 2 record without blockette 1000"))
        })?;
        if !(6..=20).contains(&exponent) {
            return Err(SeisError::BadRecord(
                offset,
                format!("record length exponent {} out of range", exponent),
            ));
        }
        let length = 1usize << exponent;
        if bytes.len() < length {
            return Err(SeisError::InsufficientBytes(bytes.len(), length));
        }
        let data_offset = header.data_offset as usize;
        let num_samples = header.num_samples as usize;
        if num_samples > 0 && (data_offset < MS2_FIXED_HEADER_SIZE || data_offset > length) {
            return Err(SeisError::BadRecord(
                offset,
                format!("data offset {} outside {} byte record", data_offset, length),
            ));
        }
        let data = if num_samples > 0 {
            bytes[data_offset..length].to_vec()
        } else {
            Vec::new()
        };

        let sncl = Sncl::new(
            &header.network,
            &header.station,
            &header.channel,
            &header.location,
        );
        let identifier = sncl.to_source_identifier();
        let start = header.start_epoch().ok_or_else(|| {
            SeisError::BadRecord(offset, format!("invalid start time in {}", identifier))
        })? + microsecond as f64 * 1.0e-6;
        let sample_rate = match actual_rate {
            Some(rate) if rate != 0.0 => rate,
            _ => header.nominal_sample_rate(),
        };
        Ok(Record {
            identifier,
            format_version: 2,
            start,
            sample_rate,
            num_samples,
            encoding: DataEncoding::from_int(encoding),
            endian: if word_order == 0 {
                Endian::Little
            } else {
                Endian::Big
            },
            offset,
            length,
            data,
        })
    }

    /// Time of the last sample, equal to the start for single sample or
    /// rateless records.
    pub fn end_time(&self) -> f64 {
        if self.num_samples > 1 && self.sample_rate > 0.0 {
            self.start + (self.num_samples - 1) as f64 / self.sample_rate
        } else {
            self.start
        }
    }

    /// Most samples the data bytes can hold, `None` for encodings that
    /// cannot be unpacked.
    pub fn max_samples(&self) -> Option<usize> {
        if self.encoding.is_steim() {
            Some(steim::max_samples(self.data.len(), self.encoding))
        } else {
            self.encoding.sample_size().map(|size| self.data.len() / size)
        }
    }

    /// Decodes the data into the buffer type of its encoding.
    pub fn unpack(&self) -> Result<Samples, SeisError> {
        let n = self.num_samples;
        match self.encoding {
            DataEncoding::STEIM1 => Ok(Samples::Int32(decode_steim1(&self.data, n, self.endian)?)),
            DataEncoding::STEIM2 => Ok(Samples::Int32(decode_steim2(&self.data, n, self.endian)?)),
            encoding => {
                let size = encoding
                    .sample_size()
                    .ok_or_else(|| SeisError::UnsupportedEncoding(encoding.to_string()))?;
                if self.data.len() < size * n {
                    return Err(SeisError::DataLength(
                        size * n,
                        n,
                        encoding.value(),
                        self.data.len(),
                    ));
                }
                let words = self.data.chunks_exact(size).take(n);
                let endian = self.endian;
                Ok(match encoding {
                    DataEncoding::INT16 => {
                        Samples::Int32(words.map(|w| endian.read_i16(w) as i32).collect())
                    }
                    DataEncoding::INT32 => Samples::Int32(words.map(|w| endian.read_i32(w)).collect()),
                    DataEncoding::FLOAT32 => {
                        Samples::Float32(words.map(|w| endian.read_f32(w)).collect())
                    }
                    _ => Samples::Float64(words.map(|w| endian.read_f64(w)).collect()),
                })
            }
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, version {}, {} bytes at {}, {} samples, {} Hz, {}",
            self.identifier,
            self.format_version,
            self.length,
            self.offset,
            self.num_samples,
            self.sample_rate,
            self.encoding
        )
    }
}

/// Packs a miniSEED 3 record around already encoded data, filling in the
/// identifier and data lengths and the CRC.
pub fn pack_mseed3(
    header: &Mseed3Header,
    identifier: &str,
    data: &[u8],
) -> Result<Vec<u8>, SeisError> {
    if identifier.len() > u8::MAX as usize {
        return Err(SeisError::InvalidArgument(format!(
            "identifier longer than 255 bytes: {}",
            identifier
        )));
    }
    let mut header = header.clone();
    header.identifier_length = identifier.len() as u8;
    header.extra_headers_length = 0;
    header.data_length = data.len() as u32;
    header.crc = 0;
    let mut out = Vec::with_capacity(header.record_size());
    header.write_to(&mut out)?;
    out.extend_from_slice(identifier.as_bytes());
    out.extend_from_slice(data);
    let crc = CASTAGNOLI.checksum(&out);
    let mut crc_bytes = Vec::with_capacity(4);
    crc_bytes.write_u32::<LittleEndian>(crc)?;
    out[CRC_OFFSET..CRC_OFFSET + 4].copy_from_slice(&crc_bytes);
    Ok(out)
}

/// Splits a buffer of concatenated records. Zero or space padding, or a
/// fragment too short to hold a header, after the last record is skipped
/// with a warning.
pub fn read_records(bytes: &[u8], options: &ReadOptions) -> Result<Vec<Record>, SeisError> {
    let mut records = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let rest = &bytes[offset..];
        if Mseed3Header::is_header(rest) || Mseed2Header::is_header(rest) {
            let record = Record::from_bytes(rest, offset, options)?;
            offset += record.length;
            records.push(record);
        } else if offset > 0
            && (rest.len() < MS2_FIXED_HEADER_SIZE || rest.iter().all(|b| *b == 0 || *b == b' '))
        {
            warn!(
                "skipping {} trailing bytes after last record at {}",
                rest.len(),
                offset
            );
            break;
        } else {
            return Err(SeisError::BadRecord(
                offset,
                String::from("not a miniSEED 2 or 3 record header"),
            ));
        }
    }
    debug!("read {} records from {} bytes", records.len(), bytes.len());
    Ok(records)
}
