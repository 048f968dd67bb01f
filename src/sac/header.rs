use log::debug;
use std::io::Write;

use crate::sac::fields::{Character, Double, Integer, Logical};
use crate::sac::{HEADER_SIZE, UNDEFINED_DOUBLE, UNDEFINED_INTEGER, UNDEFINED_STRING};
use crate::{Endian, SeisError, Time};

/// The 632 byte SAC header.
///
/// Every field is optional in memory. The `-12345` sentinel only exists on
/// disk; [`SacHeader::from_bytes`] maps it to "not set" and
/// [`SacHeader::write_to`] writes it back for every unset field.
#[derive(Debug, Clone, PartialEq)]
pub struct SacHeader {
    doubles: [Option<f64>; Double::COUNT],
    integers: [Option<i32>; Integer::COUNT],
    logicals: [Option<bool>; Logical::COUNT],
    characters: [Option<String>; Character::COUNT],
}

impl SacHeader {
    /// A header with every field unset.
    pub fn new() -> SacHeader {
        SacHeader {
            doubles: [None; Double::COUNT],
            integers: [None; Integer::COUNT],
            logicals: [None; Logical::COUNT],
            characters: Default::default(),
        }
    }

    /// Unsets every field.
    pub fn clear(&mut self) {
        *self = SacHeader::new();
    }

    /// Sets a floating point field. `DELTA` must be positive.
    pub fn set_double(&mut self, field: Double, value: f64) -> Result<(), SeisError> {
        if field == Double::DELTA && (value.is_nan() || value <= 0.0) {
            return Err(SeisError::InvalidArgument(format!(
                "{} = {} must be positive",
                field, value
            )));
        }
        self.doubles[field.index()] = Some(value);
        Ok(())
    }

    /// The value of a floating point field, or `-12345.0` when it was never set.
    pub fn get_double(&self, field: Double) -> f64 {
        self.double(field).unwrap_or(UNDEFINED_DOUBLE)
    }

    pub fn double(&self, field: Double) -> Option<f64> {
        self.doubles[field.index()]
    }

    /// Sets an integer field, checking `NPTS` and the reference time words.
    pub fn set_integer(&mut self, field: Integer, value: i32) -> Result<(), SeisError> {
        let range = match field {
            Integer::NPTS => Some((0, i32::MAX)),
            Integer::NZJDAY => Some((1, 366)),
            Integer::NZHOUR => Some((0, 23)),
            Integer::NZMIN | Integer::NZSEC => Some((0, 59)),
            Integer::NZMSEC => Some((0, 999)),
            _ => None,
        };
        if let Some((low, high)) = range {
            if value < low || value > high {
                return Err(SeisError::InvalidArgument(format!(
                    "{} = {} must be in range [{},{}]",
                    field, value, low, high
                )));
            }
        }
        self.integers[field.index()] = Some(value);
        Ok(())
    }

    /// The value of an integer field, or `-12345` when it was never set.
    pub fn get_integer(&self, field: Integer) -> i32 {
        self.integer(field).unwrap_or(UNDEFINED_INTEGER)
    }

    pub fn integer(&self, field: Integer) -> Option<i32> {
        self.integers[field.index()]
    }

    /// Sets a logical field. There is no way back to "not set" short of
    /// [`SacHeader::clear`].
    pub fn set_logical(&mut self, field: Logical, value: bool) {
        self.logicals[field.index()] = Some(value);
    }

    pub fn logical(&self, field: Logical) -> Option<bool> {
        self.logicals[field.index()]
    }

    /// The on-disk word of a logical field: 1, 0 or `-12345`.
    pub fn get_logical(&self, field: Logical) -> i32 {
        match self.logical(field) {
            Some(true) => 1,
            Some(false) => 0,
            None => UNDEFINED_INTEGER,
        }
    }

    /// Sets a character field, truncated to the width of the field. The
    /// file holds one byte per character, so characters outside Latin-1
    /// become `?`.
    pub fn set_character(&mut self, field: Character, value: &str) {
        let latin1 = value
            .chars()
            .take(field.width())
            .map(|c| if u8::try_from(c).is_ok() { c } else { '?' })
            .collect();
        self.characters[field.index()] = Some(latin1);
    }

    /// The value of a character field, or `"-12345"` when it was never set.
    pub fn get_character(&self, field: Character) -> String {
        self.character(field).unwrap_or(UNDEFINED_STRING).to_string()
    }

    pub fn character(&self, field: Character) -> Option<&str> {
        self.characters[field.index()].as_deref()
    }

    /// The reference time from `NZYEAR`, `NZJDAY`, `NZHOUR`, `NZMIN`,
    /// `NZSEC` and `NZMSEC`.
    pub fn reference_time(&self) -> Result<Time, SeisError> {
        let word = |field: Integer| {
            self.integer(field)
                .ok_or_else(|| SeisError::NotSet(field.name().to_string()))
        };
        let mut time = Time::new();
        time.set_year(word(Integer::NZYEAR)?)
            .map_err(SeisError::into_malformed)?;
        time.set_julian_day(word(Integer::NZJDAY)? as u32)?;
        time.set_hour(word(Integer::NZHOUR)? as u32)?;
        time.set_minute(word(Integer::NZMIN)? as u32)?;
        time.set_second(word(Integer::NZSEC)? as u32)?;
        time.set_micro_second(word(Integer::NZMSEC)? as u32 * 1000)?;
        Ok(time)
    }

    /// Writes the reference time words, truncating to the millisecond.
    pub fn set_reference_time(&mut self, time: &Time) -> Result<(), SeisError> {
        self.set_integer(Integer::NZYEAR, time.year())?;
        self.set_integer(Integer::NZJDAY, time.julian_day() as i32)?;
        self.set_integer(Integer::NZHOUR, time.hour() as i32)?;
        self.set_integer(Integer::NZMIN, time.minute() as i32)?;
        self.set_integer(Integer::NZSEC, time.second() as i32)?;
        self.set_integer(Integer::NZMSEC, (time.micro_second() / 1000) as i32)?;
        Ok(())
    }

    /// Decodes the first 632 bytes of `bytes`.
    ///
    /// Values that fail the setter checks, such as a non-positive `DELTA`,
    /// make the whole header malformed.
    pub fn from_bytes(bytes: &[u8], endian: Endian) -> Result<SacHeader, SeisError> {
        if bytes.len() < HEADER_SIZE {
            return Err(SeisError::InsufficientBytes(bytes.len(), HEADER_SIZE));
        }
        let mut header = SacHeader::new();
        for &field in Double::ALL {
            let offset = field.offset();
            let value = endian.read_f32(&bytes[offset..offset + 4]);
            if value != UNDEFINED_DOUBLE as f32 {
                header
                    .set_double(field, value as f64)
                    .map_err(SeisError::into_malformed)?;
            }
        }
        for &field in Integer::ALL {
            let offset = field.offset();
            let value = endian.read_i32(&bytes[offset..offset + 4]);
            if value != UNDEFINED_INTEGER {
                header
                    .set_integer(field, value)
                    .map_err(SeisError::into_malformed)?;
            }
        }
        for &field in Logical::ALL {
            let offset = field.offset();
            let value = endian.read_i32(&bytes[offset..offset + 4]);
            if value != UNDEFINED_INTEGER {
                header.set_logical(field, value != 0);
            }
        }
        for &field in Character::ALL {
            let offset = field.offset();
            let raw: String = bytes[offset..offset + field.width()]
                .iter()
                .map(|&b| b as char)
                .collect();
            let value = raw.trim_end_matches(|c: char| c == ' ' || c == '\0');
            if value != UNDEFINED_STRING {
                header.set_character(field, value);
            }
        }
        debug!(
            "decoded {} SAC header, npts={}",
            endian,
            header.get_integer(Integer::NPTS)
        );
        Ok(header)
    }

    /// Writes all 632 bytes, set or not. Floating point values are narrowed
    /// to 4 bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W, endian: Endian) -> Result<(), SeisError> {
        for &field in Double::ALL {
            endian.write_f32(writer, self.get_double(field) as f32)?;
        }
        for &field in Integer::ALL {
            endian.write_i32(writer, self.get_integer(field))?;
        }
        for &field in Logical::ALL {
            endian.write_i32(writer, self.get_logical(field))?;
        }
        for &field in Character::ALL {
            let value = self.character(field).unwrap_or(UNDEFINED_STRING);
            let mut padded = vec![b' '; field.width()];
            for (slot, c) in padded.iter_mut().zip(value.chars()) {
                *slot = u8::try_from(c).unwrap_or(b'?');
            }
            writer.write_all(&padded)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self, endian: Endian) -> Result<Vec<u8>, SeisError> {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        self.write_to(&mut out, endian)?;
        Ok(out)
    }
}

impl Default for SacHeader {
    fn default() -> Self {
        SacHeader::new()
    }
}
