use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::sac::fields::{Character, Double, Integer, Logical};
use crate::sac::{SacHeader, HEADER_SIZE};
use crate::{Endian, SeisError, Time};

/// A SAC header together with its samples.
///
/// `NPTS` always follows the sample buffer; it cannot be set directly.
/// Samples are held as `f64` in memory and written as 4 byte floats, so
/// writing narrows them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SacWaveform {
    header: SacHeader,
    data: Vec<f64>,
}

impl SacWaveform {
    pub fn new() -> SacWaveform {
        SacWaveform {
            header: SacHeader::new(),
            data: Vec::new(),
        }
    }

    /// Unsets the header and drops the samples.
    pub fn clear(&mut self) {
        self.header.clear();
        self.data.clear();
    }

    /// Reads a SAC file of either byte order.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<SacWaveform, SeisError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SeisError::FileNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        SacWaveform::from_bytes(&bytes)
    }

    /// Decodes a complete SAC file. The byte order is the one in which
    /// `NPTS` accounts for exactly the bytes that follow the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<SacWaveform, SeisError> {
        let endian = detect_endian(bytes)?;
        debug!("SAC file of {} bytes is {}", bytes.len(), endian);
        let header = SacHeader::from_bytes(bytes, endian)?;
        let data = bytes[HEADER_SIZE..]
            .chunks_exact(4)
            .map(|word| endian.read_f32(word) as f64)
            .collect();
        Ok(SacWaveform { header, data })
    }

    /// Writes the waveform to `path`, creating missing parent directories.
    pub fn write<P: AsRef<Path>>(&self, path: P, endian: Endian) -> Result<(), SeisError> {
        self.check_writable()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out, endian)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, endian: Endian) -> Result<(), SeisError> {
        self.check_writable()?;
        self.header.write_to(writer, endian)?;
        for &v in &self.data {
            endian.write_f32(writer, v as f32)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self, endian: Endian) -> Result<Vec<u8>, SeisError> {
        let mut out = Vec::with_capacity(HEADER_SIZE + 4 * self.data.len());
        self.write_to(&mut out, endian)?;
        Ok(out)
    }

    /// Header checks plus at least one sample.
    pub fn is_valid(&self) -> bool {
        self.header.double(Double::DELTA).is_some()
            && self.header.integer(Integer::NPTS).is_some()
            && !self.data.is_empty()
    }

    pub fn header(&self) -> &SacHeader {
        &self.header
    }

    pub fn set_header_double(&mut self, field: Double, value: f64) -> Result<(), SeisError> {
        self.header.set_double(field, value)
    }

    /// Sets an integer word. `NPTS` is refused; use [`SacWaveform::set_data`].
    pub fn set_header_integer(&mut self, field: Integer, value: i32) -> Result<(), SeisError> {
        if field == Integer::NPTS {
            return Err(SeisError::InvalidArgument(String::from(
                "NPTS is set from the number of samples",
            )));
        }
        self.header.set_integer(field, value)
    }

    pub fn set_header_logical(&mut self, field: Logical, value: bool) {
        self.header.set_logical(field, value);
    }

    pub fn set_header_character(&mut self, field: Character, value: &str) {
        self.header.set_character(field, value);
    }

    pub fn set_sampling_period(&mut self, delta: f64) -> Result<(), SeisError> {
        self.header.set_double(Double::DELTA, delta)
    }

    pub fn sampling_period(&self) -> Result<f64, SeisError> {
        self.header
            .double(Double::DELTA)
            .ok_or_else(|| SeisError::NotSet(String::from("DELTA")))
    }

    /// Replaces the samples and updates `NPTS`, `DEPMIN`, `DEPMAX` and
    /// `DEPMEN`.
    pub fn set_data(&mut self, data: &[f64]) -> Result<(), SeisError> {
        let npts = i32::try_from(data.len()).map_err(|_| {
            SeisError::InvalidArgument(format!("{} samples do not fit in NPTS", data.len()))
        })?;
        self.header.set_integer(Integer::NPTS, npts)?;
        if !data.is_empty() {
            let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = data.iter().sum::<f64>() / data.len() as f64;
            self.header.set_double(Double::DEPMIN, min)?;
            self.header.set_double(Double::DEPMAX, max)?;
            self.header.set_double(Double::DEPMEN, mean)?;
        }
        self.data = data.to_vec();
        Ok(())
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn number_of_samples(&self) -> usize {
        self.data.len()
    }

    /// Time of the first sample, the reference time offset by `B`.
    pub fn start_time(&self) -> Result<Time, SeisError> {
        let begin = self.header.double(Double::B).unwrap_or(0.0);
        self.header.reference_time()?.offset(begin)
    }

    fn check_writable(&self) -> Result<(), SeisError> {
        if self.header.double(Double::DELTA).is_none() {
            return Err(SeisError::NotSet(String::from("DELTA")));
        }
        if self.data.is_empty() {
            return Err(SeisError::NotSet(String::from("samples")));
        }
        Ok(())
    }
}

/// The byte order in which the `NPTS` word predicts the length of `bytes`.
pub fn detect_endian(bytes: &[u8]) -> Result<Endian, SeisError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SeisError::InsufficientBytes(bytes.len(), HEADER_SIZE));
    }
    let offset = Integer::NPTS.offset();
    let word = &bytes[offset..offset + 4];
    let fits = |npts: i32| npts >= 0 && HEADER_SIZE + 4 * npts as usize == bytes.len();
    if fits(Endian::Little.read_i32(word)) {
        Ok(Endian::Little)
    } else if fits(Endian::Big.read_i32(word)) {
        Ok(Endian::Big)
    } else {
        Err(SeisError::UnknownByteOrder(format!(
            "NPTS does not match file size {}",
            bytes.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn sine_waveform() -> Result<SacWaveform, SeisError> {
        let mut waveform = SacWaveform::new();
        waveform.set_sampling_period(0.01)?;
        let data: Vec<f64> = (0..100).map(|i| (i as f64 * 0.1).sin()).collect();
        waveform.set_data(&data)?;
        Ok(waveform)
    }

    #[test]
    fn npts_follows_data() -> Result<(), SeisError> {
        let mut waveform = sine_waveform()?;
        assert_eq!(waveform.header().get_integer(Integer::NPTS), 100);
        let err = waveform.set_header_integer(Integer::NPTS, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(waveform.number_of_samples(), 100);
        waveform.set_data(&[1.0, -3.0, 2.0])?;
        assert_eq!(waveform.header().get_integer(Integer::NPTS), 3);
        assert_eq!(waveform.header().get_double(Double::DEPMIN), -3.0);
        assert_eq!(waveform.header().get_double(Double::DEPMAX), 2.0);
        assert_eq!(waveform.header().get_double(Double::DEPMEN), 0.0);
        Ok(())
    }

    #[test]
    fn both_byte_orders() -> Result<(), SeisError> {
        let waveform = sine_waveform()?;
        for endian in [Endian::Little, Endian::Big] {
            let bytes = waveform.to_bytes(endian)?;
            assert_eq!(bytes.len(), HEADER_SIZE + 400);
            assert_eq!(detect_endian(&bytes)?, endian);
            let back = SacWaveform::from_bytes(&bytes)?;
            assert_eq!(back.number_of_samples(), 100);
            for (a, b) in back.data().iter().zip(waveform.data()) {
                assert_eq!(*a, *b as f32 as f64);
            }
            assert!(back.is_valid());
        }
        Ok(())
    }

    #[test]
    fn truncated_file() -> Result<(), SeisError> {
        let bytes = sine_waveform()?.to_bytes(Endian::Little)?;
        let err = SacWaveform::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        Ok(())
    }

    #[test]
    fn invalid_cannot_be_written() -> Result<(), SeisError> {
        let mut waveform = SacWaveform::new();
        assert!(!waveform.is_valid());
        assert_eq!(waveform.to_bytes(Endian::Big).unwrap_err().kind(), ErrorKind::NotSet);
        waveform.set_sampling_period(1.0)?;
        assert_eq!(waveform.to_bytes(Endian::Big).unwrap_err().kind(), ErrorKind::NotSet);
        assert_eq!(waveform.sampling_period()?, 1.0);
        waveform.clear();
        assert_eq!(waveform.sampling_period().unwrap_err().kind(), ErrorKind::NotSet);
        Ok(())
    }

    #[test]
    fn start_time_adds_begin() -> Result<(), SeisError> {
        let mut waveform = sine_waveform()?;
        waveform.set_header_integer(Integer::NZYEAR, 2016)?;
        waveform.set_header_integer(Integer::NZJDAY, 14)?;
        waveform.set_header_integer(Integer::NZHOUR, 3)?;
        waveform.set_header_integer(Integer::NZMIN, 36)?;
        waveform.set_header_integer(Integer::NZSEC, 33)?;
        waveform.set_header_integer(Integer::NZMSEC, 0)?;
        waveform.set_header_double(Double::B, 0.34)?;
        let start = waveform.start_time()?;
        assert_eq!(start.second(), 33);
        assert_eq!(start.micro_second(), 340000);
        Ok(())
    }
}
