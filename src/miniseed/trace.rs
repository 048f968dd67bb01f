use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::miniseed::sncl::Sncl;
use crate::miniseed::trace_list::TraceList;
use crate::miniseed::ReadOptions;
use crate::{SeisError, Time};

/// Numeric type of a decoded sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Precision {
    Int32,
    Float32,
    Float64,
    /// Nothing has been decoded.
    Unknown,
}

impl Precision {
    fn name(&self) -> &'static str {
        match self {
            Precision::Int32 => "INT32",
            Precision::Float32 => "FLOAT32",
            Precision::Float64 => "FLOAT64",
            Precision::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A decoded sample buffer, exactly one of the three numeric types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Samples {
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl Samples {
    pub fn precision(&self) -> Precision {
        match self {
            Samples::Int32(_) => Precision::Int32,
            Samples::Float32(_) => Precision::Float32,
            Samples::Float64(_) => Precision::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::Int32(v) => v.len(),
            Samples::Float32(v) => v.len(),
            Samples::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves `other` onto the end of this buffer. Both must hold the same type.
    pub fn append(&mut self, other: Samples) -> Result<(), SeisError> {
        match (self, other) {
            (Samples::Int32(a), Samples::Int32(mut b)) => a.append(&mut b),
            (Samples::Float32(a), Samples::Float32(mut b)) => a.append(&mut b),
            (Samples::Float64(a), Samples::Float64(mut b)) => a.append(&mut b),
            (a, b) => {
                return Err(SeisError::WrongPrecision {
                    requested: b.precision().name(),
                    actual: a.precision().name(),
                })
            }
        }
        Ok(())
    }
}

/// Channel codes as handed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId {
    pub network: String,
    pub station: String,
    pub channel: String,
    pub location: String,
}

/// A decoded waveform in the shape consumed outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformData {
    pub samples: Samples,
    pub precision: Precision,
    pub sampling_rate: f64,
    /// Epoch seconds.
    pub start_time: f64,
    pub channel_id: ChannelId,
}

/// A single channel decoded from a multiplexed miniSEED file.
///
/// Only the earliest segment of the channel is decoded. Until a read
/// succeeds the precision is [`Precision::Unknown`] and every data accessor
/// fails.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    sncl: Sncl,
    start_time: Time,
    sampling_rate: f64,
    samples: Option<Samples>,
}

impl Trace {
    pub fn new() -> Trace {
        Trace::default()
    }

    /// Back to the state of [`Trace::new`].
    pub fn clear(&mut self) {
        *self = Trace::default();
    }

    /// Reads the channel selected by `sncl` from a miniSEED file.
    pub fn read<P: AsRef<Path>>(&mut self, path: P, sncl: &Sncl) -> Result<(), SeisError> {
        self.read_with_options(path, sncl, &ReadOptions::default())
    }

    pub fn read_with_options<P: AsRef<Path>>(
        &mut self,
        path: P,
        sncl: &Sncl,
        options: &ReadOptions,
    ) -> Result<(), SeisError> {
        self.clear();
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SeisError::FileNotFound(path.to_path_buf()));
        }
        if sncl.is_empty() {
            return Err(SeisError::InvalidArgument(String::from(
                "network, station, channel and location are all empty",
            )));
        }
        let bytes = fs::read(path)?;
        self.read_from_bytes(&bytes, sncl, options)
    }

    /// Decodes the channel selected by `sncl` from a buffer of records. On
    /// any failure the trace is left cleared.
    pub fn read_from_bytes(
        &mut self,
        bytes: &[u8],
        sncl: &Sncl,
        options: &ReadOptions,
    ) -> Result<(), SeisError> {
        self.clear();
        if sncl.is_empty() {
            return Err(SeisError::InvalidArgument(String::from(
                "network, station, channel and location are all empty",
            )));
        }
        let identifier = sncl.to_source_identifier();
        let list = TraceList::from_bytes(bytes, options)?;
        let trace = list
            .find(&identifier)
            .ok_or_else(|| SeisError::NotFound(identifier.clone()))?;
        let segment = trace
            .segments
            .first()
            .ok_or_else(|| SeisError::NotFound(identifier.clone()))?;
        if trace.segments.len() > 1 {
            debug!(
                "{} has {} segments, decoding the first",
                identifier,
                trace.segments.len()
            );
        }
        if segment.num_samples > i32::MAX as usize {
            return Err(SeisError::InvalidHeaderValue(format!(
                "{} samples overflows a 32 bit count",
                segment.num_samples
            )));
        }
        if segment.sample_rate.is_nan() || segment.sample_rate <= 0.0 {
            return Err(SeisError::SamplingRate(segment.sample_rate));
        }
        let samples = segment.unpack()?;
        let start_time = Time::from_epoch(segment.start).map_err(SeisError::into_malformed)?;
        debug!(
            "decoded {} {} samples of {} at {} Hz",
            samples.len(),
            samples.precision(),
            identifier,
            segment.sample_rate
        );
        self.sncl = sncl.clone();
        self.start_time = start_time;
        self.sampling_rate = segment.sample_rate;
        self.samples = Some(samples);
        Ok(())
    }

    pub fn precision(&self) -> Precision {
        match &self.samples {
            Some(samples) => samples.precision(),
            None => Precision::Unknown,
        }
    }

    /// Sampling rate in Hz, 0.0 before a read.
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    pub fn set_sampling_rate(&mut self, rate: f64) -> Result<(), SeisError> {
        if rate.is_nan() || rate <= 0.0 {
            return Err(SeisError::InvalidArgument(format!(
                "sampling rate = {} must be positive",
                rate
            )));
        }
        self.sampling_rate = rate;
        Ok(())
    }

    pub fn number_of_samples(&self) -> usize {
        self.samples.as_ref().map_or(0, Samples::len)
    }

    pub fn start_time(&self) -> &Time {
        &self.start_time
    }

    /// Time of the last sample.
    pub fn end_time(&self) -> Result<Time, SeisError> {
        let n = self.number_of_samples();
        if n == 0 {
            return Err(SeisError::NotSet(String::from("trace samples")));
        }
        if self.sampling_rate <= 0.0 {
            return Err(SeisError::NotSet(String::from("sampling rate")));
        }
        self.start_time.offset((n - 1) as f64 / self.sampling_rate)
    }

    pub fn sncl(&self) -> &Sncl {
        &self.sncl
    }

    pub fn set_sncl(&mut self, sncl: Sncl) {
        self.sncl = sncl;
    }

    /// The tagged sample buffer.
    pub fn samples(&self) -> Result<&Samples, SeisError> {
        self.samples
            .as_ref()
            .ok_or_else(|| SeisError::NotSet(String::from("trace samples")))
    }

    pub fn data_i32(&self) -> Result<&[i32], SeisError> {
        match self.samples()? {
            Samples::Int32(v) => Ok(v),
            other => Err(wrong_precision(Precision::Int32, other)),
        }
    }

    pub fn data_f32(&self) -> Result<&[f32], SeisError> {
        match self.samples()? {
            Samples::Float32(v) => Ok(v),
            other => Err(wrong_precision(Precision::Float32, other)),
        }
    }

    pub fn data_f64(&self) -> Result<&[f64], SeisError> {
        match self.samples()? {
            Samples::Float64(v) => Ok(v),
            other => Err(wrong_precision(Precision::Float64, other)),
        }
    }

    /// Copies the decoded trace into the collaborator shape.
    pub fn to_waveform_data(&self) -> Result<WaveformData, SeisError> {
        let samples = self.samples()?.clone();
        Ok(WaveformData {
            precision: samples.precision(),
            samples,
            sampling_rate: self.sampling_rate,
            start_time: self.start_time.epoch(),
            channel_id: ChannelId {
                network: self.sncl.network().to_string(),
                station: self.sncl.station().to_string(),
                channel: self.sncl.channel().to_string(),
                location: self.sncl.location().to_string(),
            },
        })
    }
}

fn wrong_precision(requested: Precision, actual: &Samples) -> SeisError {
    SeisError::WrongPrecision {
        requested: requested.name(),
        actual: actual.precision().name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn unread_trace() {
        let trace = Trace::new();
        assert_eq!(trace.precision(), Precision::Unknown);
        assert_eq!(trace.number_of_samples(), 0);
        assert_eq!(trace.data_i32().unwrap_err().kind(), ErrorKind::NotSet);
        assert_eq!(trace.data_f64().unwrap_err().kind(), ErrorKind::NotSet);
        assert!(trace.end_time().is_err());
        assert!(trace.to_waveform_data().is_err());
    }

    #[test]
    fn empty_selector() {
        let mut trace = Trace::new();
        let err = trace
            .read_from_bytes(&[], &Sncl::default(), &ReadOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn append_checks_type() -> Result<(), SeisError> {
        let mut samples = Samples::Int32(vec![1]);
        samples.append(Samples::Int32(vec![2, 3]))?;
        assert_eq!(samples, Samples::Int32(vec![1, 2, 3]));
        assert!(samples.append(Samples::Float32(vec![1.0])).is_err());
        Ok(())
    }

    #[test]
    fn sampling_rate_must_be_positive() {
        let mut trace = Trace::new();
        assert!(trace.set_sampling_rate(0.0).is_err());
        assert!(trace.set_sampling_rate(f64::NAN).is_err());
        assert!(trace.set_sampling_rate(40.0).is_ok());
        assert_eq!(trace.sampling_rate(), 40.0);
    }

    #[test]
    fn precision_json() {
        let json = serde_json::to_string(&Precision::Float32).unwrap();
        assert_eq!(json, "\"FLOAT32\"");
        let samples = serde_json::to_string(&Samples::Int32(vec![1, 2])).unwrap();
        assert_eq!(samples, "[1,2]");
    }
}
