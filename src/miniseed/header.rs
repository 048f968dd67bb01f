use byteorder::{LittleEndian, WriteBytesExt};
use chrono::prelude::*;
use std::fmt;
use std::io::Write;

use crate::miniseed::data_encoding::DataEncoding;
use crate::{Endian, SeisError};

/// Size in bytes of the miniSEED 3 fixed header. This does not include the identifier, extra headers, or data.
pub const FIXED_HEADER_SIZE: usize = 40;

/// Offset to the 4-byte CRC within the header.
pub const CRC_OFFSET: usize = 28;

/// Size in bytes of the miniSEED 2 fixed section of data header.
pub const MS2_FIXED_HEADER_SIZE: usize = 48;

/// The fixed section of a miniSEED 3 header. Does not contain the identifier, extra headers, or timeseries data.
#[derive(Debug, Clone)]
pub struct Mseed3Header {
    pub record_indicator: [u8; 2],
    pub format_version: u8,
    pub flags: u8,
    pub nanosecond: u32,
    pub year: u16,
    pub day_of_year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub encoding: DataEncoding,
    pub sample_rate_period: f64,
    pub num_samples: u32,
    pub crc: u32,
    pub publication_version: u8,
    pub identifier_length: u8,
    pub extra_headers_length: u16,
    pub data_length: u32,
}

impl Mseed3Header {
    /// First two bytes of a miniseed3 header must be `MS`
    pub const REC_IND: [u8; 2] = [b'M', b'S'];

    pub fn new(
        start: DateTime<Utc>,
        encoding: DataEncoding,
        sample_rate_period: f64,
        num_samples: usize,
    ) -> Mseed3Header {
        Mseed3Header {
            record_indicator: Mseed3Header::REC_IND,
            format_version: 3,
            flags: 0,
            nanosecond: start.nanosecond().min(999_999_999),
            year: start.year() as u16,
            day_of_year: start.ordinal() as u16,
            hour: start.hour() as u8,
            minute: start.minute() as u8,
            second: start.second() as u8,
            encoding,
            sample_rate_period,
            num_samples: num_samples as u32,
            crc: 0,
            publication_version: 1,
            identifier_length: 0,
            extra_headers_length: 0,
            data_length: 0,
        }
    }

    /// True when `buffer` starts like a miniSEED 3 record.
    pub fn is_header(buffer: &[u8]) -> bool {
        buffer.len() >= FIXED_HEADER_SIZE && buffer[0..2] == Mseed3Header::REC_IND && buffer[2] == 3
    }

    /// Reads a miniseed3 fixed header from the start of `buffer`.
    pub fn from_bytes(buffer: &[u8]) -> Result<Mseed3Header, SeisError> {
        if buffer.len() < FIXED_HEADER_SIZE {
            return Err(SeisError::InsufficientBytes(buffer.len(), FIXED_HEADER_SIZE));
        }
        if !Mseed3Header::is_header(buffer) {
            return Err(SeisError::BadRecord(
                0,
                format!(
                    "expected MS3 indicator, found {:?}",
                    String::from_utf8_lossy(&buffer[0..3])
                ),
            ));
        }
        let format_version = buffer[2];
        let flags = buffer[3];
        // skip M, S, format, flags
        let (_, mut header_bytes) = buffer.split_at(4);
        let nanosecond = read_le_u32(&mut header_bytes);
        let year = read_le_u16(&mut header_bytes);
        let day_of_year = read_le_u16(&mut header_bytes);
        let hour = buffer[12];
        let minute = buffer[13];
        let second = buffer[14];
        let encoding = DataEncoding::from_int(buffer[15]);
        let _ = read_le_u32(&mut header_bytes); // skip hour-encoding
        let sample_rate_period = read_le_f64(&mut header_bytes);
        let num_samples = read_le_u32(&mut header_bytes);
        let crc = read_le_u32(&mut header_bytes);
        let publication_version = buffer[32];
        let identifier_length = buffer[33];
        let _ = read_le_u16(&mut header_bytes); // skip pub ver and id len
        let extra_headers_length = read_le_u16(&mut header_bytes);
        let data_length = read_le_u32(&mut header_bytes);
        Ok(Mseed3Header {
            record_indicator: Mseed3Header::REC_IND,
            format_version,
            flags,
            nanosecond,
            year,
            day_of_year,
            hour,
            minute,
            second,
            encoding,
            sample_rate_period,
            num_samples,
            crc,
            publication_version,
            identifier_length,
            extra_headers_length,
            data_length,
        })
    }

    /// Writes the 40 byte fixed header.
    pub fn write_to<W: Write>(&self, buf: &mut W) -> Result<(), SeisError> {
        buf.write_all(&Mseed3Header::REC_IND)?;
        buf.write_all(&[self.format_version, self.flags])?;
        buf.write_u32::<LittleEndian>(self.nanosecond)?;
        buf.write_u16::<LittleEndian>(self.year)?;
        buf.write_u16::<LittleEndian>(self.day_of_year)?;
        buf.write_all(&[self.hour, self.minute, self.second, self.encoding.value()])?;
        buf.write_f64::<LittleEndian>(self.sample_rate_period)?;
        buf.write_u32::<LittleEndian>(self.num_samples)?;
        buf.write_u32::<LittleEndian>(self.crc)?;
        buf.write_all(&[self.publication_version, self.identifier_length])?;
        buf.write_u16::<LittleEndian>(self.extra_headers_length)?;
        buf.write_u32::<LittleEndian>(self.data_length)?;
        Ok(())
    }

    /// Sample rate in Hz. Negative header values are sample periods in seconds.
    pub fn sample_rate(&self) -> f64 {
        if self.sample_rate_period < 0.0 {
            -1.0 / self.sample_rate_period
        } else {
            self.sample_rate_period
        }
    }

    /// Start time in epoch seconds.
    pub fn start_epoch(&self) -> Option<f64> {
        epoch_from_ordinal(
            self.year,
            self.day_of_year,
            self.hour,
            self.minute,
            self.second,
            self.nanosecond as f64 * 1.0e-9,
        )
    }

    /// Format CRC as a hex string, like 0x106EAFA5
    pub fn crc_hex_string(&self) -> String {
        format!("{:#0X}", self.crc)
    }

    /// The size of the data record, including the identifier, extra headers and data.
    pub fn record_size(&self) -> usize {
        FIXED_HEADER_SIZE
            + self.identifier_length as usize
            + self.extra_headers_length as usize
            + self.data_length as usize
    }
}

impl fmt::Display for Mseed3Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "version {}, {} bytes (format: {})",
            self.publication_version,
            self.record_size(),
            self.format_version
        )?;
        writeln!(
            f,
            "             start time: {},{:03},{:02}:{:02}:{:02}.{:09}",
            self.year, self.day_of_year, self.hour, self.minute, self.second, self.nanosecond
        )?;
        writeln!(f, "      number of samples: {}", self.num_samples)?;
        writeln!(f, "       sample rate (Hz): {}", self.sample_rate())?;
        writeln!(f, "                  flags: [{:#010b}] 8 bits", self.flags)?;
        writeln!(f, "                    CRC: {}", self.crc_hex_string())?;
        writeln!(
            f,
            "    extra header length: {} bytes",
            self.extra_headers_length
        )?;
        writeln!(f, "    data payload length: {} bytes", self.data_length)?;
        write!(
            f,
            "       payload encoding: {} (val: {})",
            self.encoding,
            self.encoding.value()
        )
    }
}

/// The 48 byte fixed section of data header of a miniSEED 2 record, in the
/// byte order it was detected in.
#[derive(Debug, Clone)]
pub struct Mseed2Header {
    pub sequence_number: String,
    pub quality: char,
    pub station: String,
    pub location: String,
    pub channel: String,
    pub network: String,
    pub year: u16,
    pub day_of_year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Fraction of a second in units of 0.0001 seconds.
    pub fract: u16,
    pub num_samples: u16,
    pub sample_rate_factor: i16,
    pub sample_rate_multiplier: i16,
    pub activity_flags: u8,
    pub io_flags: u8,
    pub quality_flags: u8,
    pub num_blockettes: u8,
    /// Time correction in units of 0.0001 seconds.
    pub time_correction: i32,
    pub data_offset: u16,
    pub first_blockette: u16,
    pub endian: Endian,
}

impl Mseed2Header {
    /// Activity flag set when the time correction is already included in
    /// the start time.
    pub const TIME_CORRECTION_APPLIED: u8 = 0x02;

    /// True when `buffer` starts like a miniSEED 2 record: a six character
    /// sequence number, a quality indicator and plausible time of day.
    pub fn is_header(buffer: &[u8]) -> bool {
        if buffer.len() < MS2_FIXED_HEADER_SIZE {
            return false;
        }
        buffer[0..6]
            .iter()
            .all(|&b| b.is_ascii_digit() || b == b' ' || b == 0)
            && matches!(buffer[6], b'D' | b'R' | b'Q' | b'M')
            && (buffer[7] == b' ' || buffer[7] == 0)
            && buffer[24] <= 23
            && buffer[25] <= 59
            && buffer[26] <= 60
    }

    /// Reads the fixed header, detecting its byte order from the year and
    /// day of year.
    pub fn from_bytes(buffer: &[u8]) -> Result<Mseed2Header, SeisError> {
        if buffer.len() < MS2_FIXED_HEADER_SIZE {
            return Err(SeisError::InsufficientBytes(
                buffer.len(),
                MS2_FIXED_HEADER_SIZE,
            ));
        }
        let endian = detect_endian(buffer)?;
        let u16_at = |at: usize| endian.read_u16(&buffer[at..at + 2]);
        let i16_at = |at: usize| endian.read_i16(&buffer[at..at + 2]);
        let text = |from: usize, to: usize| {
            String::from_utf8_lossy(&buffer[from..to])
                .trim_end_matches(|c: char| c == ' ' || c == '\0')
                .to_string()
        };
        Ok(Mseed2Header {
            sequence_number: text(0, 6),
            quality: buffer[6] as char,
            station: text(8, 13),
            location: text(13, 15),
            channel: text(15, 18),
            network: text(18, 20),
            year: u16_at(20),
            day_of_year: u16_at(22),
            hour: buffer[24],
            minute: buffer[25],
            second: buffer[26],
            fract: u16_at(28),
            num_samples: u16_at(30),
            sample_rate_factor: i16_at(32),
            sample_rate_multiplier: i16_at(34),
            activity_flags: buffer[36],
            io_flags: buffer[37],
            quality_flags: buffer[38],
            num_blockettes: buffer[39],
            time_correction: endian.read_i32(&buffer[40..44]),
            data_offset: u16_at(44),
            first_blockette: u16_at(46),
            endian,
        })
    }

    /// Nominal sample rate from the factor and multiplier, 0.0 when either
    /// is zero.
    pub fn nominal_sample_rate(&self) -> f64 {
        let factor = self.sample_rate_factor as f64;
        let multiplier = self.sample_rate_multiplier as f64;
        let rate = match self.sample_rate_factor {
            f if f > 0 => factor,
            f if f < 0 => -1.0 / factor,
            _ => 0.0,
        };
        match self.sample_rate_multiplier {
            m if m > 0 => rate * multiplier,
            m if m < 0 => -rate / multiplier,
            _ => 0.0,
        }
    }

    /// Start time in epoch seconds, with the time correction applied unless
    /// the activity flags say it already is.
    pub fn start_epoch(&self) -> Option<f64> {
        let mut start = epoch_from_ordinal(
            self.year,
            self.day_of_year,
            self.hour,
            self.minute,
            self.second,
            self.fract as f64 * 1.0e-4,
        )?;
        if self.time_correction != 0 && self.activity_flags & Self::TIME_CORRECTION_APPLIED == 0 {
            start += self.time_correction as f64 * 1.0e-4;
        }
        Some(start)
    }
}

fn plausible_year_day(year: u16, day: u16) -> bool {
    (1900..=2100).contains(&year) && (1..=366).contains(&day)
}

/// Byte order of a miniSEED 2 header, the one giving a plausible start
/// year and day.
pub fn detect_endian(buffer: &[u8]) -> Result<Endian, SeisError> {
    for endian in [Endian::Big, Endian::Little] {
        let year = endian.read_u16(&buffer[20..22]);
        let day = endian.read_u16(&buffer[22..24]);
        if plausible_year_day(year, day) {
            return Ok(endian);
        }
    }
    Err(SeisError::UnknownByteOrder(String::from(
        "miniSEED 2 start year and day are implausible in both byte orders",
    )))
}

/// Epoch seconds from year, day of year and time of day. A leap second is
/// counted into the next minute.
pub(crate) fn epoch_from_ordinal(
    year: u16,
    day_of_year: u16,
    hour: u8,
    minute: u8,
    second: u8,
    fraction: f64,
) -> Option<f64> {
    let midnight = NaiveDate::from_yo_opt(year as i32, day_of_year as u32)?.and_hms_opt(0, 0, 0)?;
    if hour > 23 || minute > 59 || second > 60 {
        return None;
    }
    let seconds = midnight.and_utc().timestamp()
        + hour as i64 * 3600
        + minute as i64 * 60
        + second as i64;
    Some(seconds as f64 + fraction)
}

/// read a single little endian 64 bit float (8 bytes) and reset input
fn read_le_f64(input: &mut &[u8]) -> f64 {
    let (int_bytes, rest) = input.split_at(std::mem::size_of::<f64>());
    *input = rest;
    f64::from_le_bytes(int_bytes.try_into().unwrap_or([0; 8]))
}

/// read a single little endian 32 bit int (4 bytes) and reset input
fn read_le_u32(input: &mut &[u8]) -> u32 {
    let (int_bytes, rest) = input.split_at(std::mem::size_of::<u32>());
    *input = rest;
    u32::from_le_bytes(int_bytes.try_into().unwrap_or([0; 4]))
}

/// read a single little endian 16 bit int (2 bytes) and reset input
fn read_le_u16(input: &mut &[u8]) -> u16 {
    let (int_bytes, rest) = input.split_at(std::mem::size_of::<u16>());
    *input = rest;
    u16::from_le_bytes(int_bytes.try_into().unwrap_or([0; 2]))
}
