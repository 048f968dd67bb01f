use log::debug;

use crate::miniseed::record::{read_records, Record};
use crate::miniseed::trace::{Precision, Samples};
use crate::miniseed::ReadOptions;
use crate::SeisError;

/// Contiguous run of records of one channel.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Epoch of the first sample.
    pub start: f64,
    /// Epoch of the last sample.
    pub end: f64,
    pub sample_rate: f64,
    pub num_samples: usize,
    precision: Option<Precision>,
    records: Vec<Record>,
}

impl Segment {
    fn new(record: Record) -> Segment {
        Segment {
            start: record.start,
            end: record.end_time(),
            sample_rate: record.sample_rate,
            num_samples: record.num_samples,
            precision: record.encoding.precision(),
            records: vec![record],
        }
    }

    /// Buffer type the records unpack into, `None` when they cannot be unpacked.
    pub fn precision(&self) -> Option<Precision> {
        self.precision
    }

    /// The records in time order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn period(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// Joins `other` if it continues this segment at either end, otherwise
    /// hands it back.
    fn try_merge(&mut self, mut other: Segment, options: &ReadOptions) -> Option<Segment> {
        if self.sample_rate <= 0.0
            || other.sample_rate <= 0.0
            || other.precision != self.precision
            || (1.0 - self.sample_rate / other.sample_rate).abs() > options.sample_rate_tolerance
        {
            return Some(other);
        }
        let period = self.period();
        let tolerance = options.time_tolerance.unwrap_or(0.5 * period);
        if (other.start - (self.end + period)).abs() <= tolerance {
            self.end = other.end;
            self.num_samples += other.num_samples;
            self.records.append(&mut other.records);
            None
        } else if (self.start - (other.end + period)).abs() <= tolerance {
            self.start = other.start;
            self.num_samples += other.num_samples;
            other.records.append(&mut self.records);
            self.records = other.records;
            None
        } else {
            Some(other)
        }
    }

    /// Decodes and concatenates the samples of every record.
    pub fn unpack(&self) -> Result<Samples, SeisError> {
        let data_length: usize = self.records.iter().map(|r| r.data.len()).sum();
        let capacity: usize = self
            .records
            .iter()
            .map(|r| r.max_samples().unwrap_or(0))
            .sum();
        if self.num_samples > capacity {
            return Err(SeisError::TooManySamples(
                self.num_samples,
                data_length,
                capacity,
            ));
        }
        let mut samples = match self.precision {
            Some(Precision::Int32) => Samples::Int32(Vec::with_capacity(self.num_samples)),
            Some(Precision::Float32) => Samples::Float32(Vec::with_capacity(self.num_samples)),
            Some(Precision::Float64) => Samples::Float64(Vec::with_capacity(self.num_samples)),
            _ => {
                return Err(SeisError::UnsupportedEncoding(
                    self.records[0].encoding.to_string(),
                ))
            }
        };
        for record in &self.records {
            let unpacked = record.unpack()?;
            if unpacked.len() != record.num_samples {
                return Err(SeisError::SampleCount(unpacked.len(), record.num_samples));
            }
            samples.append(unpacked)?;
        }
        if samples.len() != self.num_samples {
            return Err(SeisError::SampleCount(samples.len(), self.num_samples));
        }
        Ok(samples)
    }
}

/// All segments of one source identifier.
#[derive(Debug, Clone)]
pub struct TraceId {
    pub identifier: String,
    /// Segments sorted by start time.
    pub segments: Vec<Segment>,
}

/// The records of a buffer grouped into channels and contiguous segments.
#[derive(Debug, Clone, Default)]
pub struct TraceList {
    traces: Vec<TraceId>,
}

impl TraceList {
    pub fn from_bytes(bytes: &[u8], options: &ReadOptions) -> Result<TraceList, SeisError> {
        let records = read_records(bytes, options)?;
        Ok(TraceList::from_records(records, options))
    }

    /// Groups records by case-insensitive source identifier, then joins
    /// records that continue each other into segments.
    pub fn from_records(records: Vec<Record>, options: &ReadOptions) -> TraceList {
        let mut list = TraceList::default();
        for record in records {
            if record.num_samples == 0 {
                debug!("skipping record without samples: {}", record);
                continue;
            }
            list.add(record, options);
        }
        for trace in &mut list.traces {
            trace
                .segments
                .sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));
        }
        list
    }

    fn add(&mut self, record: Record, options: &ReadOptions) {
        let trace = match self
            .traces
            .iter()
            .position(|t| t.identifier.eq_ignore_ascii_case(&record.identifier))
        {
            Some(index) => &mut self.traces[index],
            None => {
                self.traces.push(TraceId {
                    identifier: record.identifier.clone(),
                    segments: Vec::new(),
                });
                let last = self.traces.len() - 1;
                &mut self.traces[last]
            }
        };
        // a record that bridges a gap joins the segments on both sides
        let mut pending = Segment::new(record);
        let mut i = 0;
        while i < trace.segments.len() {
            match trace.segments[i].try_merge(pending, options) {
                None => {
                    pending = trace.segments.remove(i);
                    i = 0;
                }
                Some(segment) => {
                    pending = segment;
                    i += 1;
                }
            }
        }
        trace.segments.push(pending);
    }

    /// Source identifiers in the order first seen.
    pub fn identifiers(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.identifier.as_str()).collect()
    }

    pub fn traces(&self) -> &[TraceId] {
        &self.traces
    }

    /// The trace with the given source identifier, ignoring case.
    pub fn find(&self, identifier: &str) -> Option<&TraceId> {
        self.traces
            .iter()
            .find(|t| t.identifier.eq_ignore_ascii_case(identifier))
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miniseed::data_encoding::DataEncoding;
    use crate::Endian;

    fn record(identifier: &str, start: f64, values: &[i32]) -> Record {
        let mut data = Vec::new();
        for v in values {
            Endian::Little.write_i32(&mut data, *v).unwrap();
        }
        Record {
            identifier: identifier.to_string(),
            format_version: 3,
            start,
            sample_rate: 10.0,
            num_samples: values.len(),
            encoding: DataEncoding::INT32,
            endian: Endian::Little,
            offset: 0,
            length: 0,
            data,
        }
    }

    #[test]
    fn contiguous_records_join() -> Result<(), SeisError> {
        let options = ReadOptions::default();
        let records = vec![
            record("FDSN:XX_A__B_H_Z", 100.3, &[4, 5]),
            record("FDSN:XX_B__B_H_Z", 0.0, &[9]),
            record("FDSN:XX_A__B_H_Z", 100.0, &[1, 2, 3]),
            record("fdsn:xx_a__b_h_z", 100.5, &[6]),
            record("FDSN:XX_A__B_H_Z", 50.0, &[0]),
            record("FDSN:XX_A__B_H_Z", 60.0, &[]),
        ];
        let list = TraceList::from_records(records, &options);
        assert_eq!(list.identifiers(), vec!["FDSN:XX_A__B_H_Z", "FDSN:XX_B__B_H_Z"]);
        let trace = list.find("fdsn:XX_A__B_H_Z").unwrap();
        assert_eq!(trace.segments.len(), 2);
        assert_eq!(trace.segments[0].start, 50.0);
        let joined = &trace.segments[1];
        assert_eq!(joined.start, 100.0);
        assert_eq!(joined.num_samples, 6);
        assert!((joined.end - 100.5).abs() < 1.0e-9);
        match joined.unpack()? {
            Samples::Int32(v) => assert_eq!(v, vec![1, 2, 3, 4, 5, 6]),
            other => panic!("unexpected {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn bridging_record_joins_segments() -> Result<(), SeisError> {
        let options = ReadOptions::default();
        let records = vec![
            record("FDSN:XX_A__B_H_Z", 100.0, &[1, 2, 3]),
            record("FDSN:XX_A__B_H_Z", 100.6, &[7, 8, 9]),
            record("FDSN:XX_A__B_H_Z", 100.3, &[4, 5, 6]),
        ];
        let list = TraceList::from_records(records, &options);
        let trace = list.find("FDSN:XX_A__B_H_Z").unwrap();
        assert_eq!(trace.segments.len(), 1);
        let segment = &trace.segments[0];
        assert_eq!(segment.num_samples, 9);
        assert_eq!(segment.start, 100.0);
        assert!((segment.end - 100.8).abs() < 1.0e-9);
        assert_eq!(segment.records().len(), 3);
        match segment.unpack()? {
            Samples::Int32(v) => assert_eq!(v, (1..=9).collect::<Vec<i32>>()),
            other => panic!("unexpected {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn count_beyond_data_fails_before_unpacking() {
        let mut short = record("FDSN:XX_A__B_H_Z", 100.0, &[1, 2]);
        short.num_samples = i32::MAX as usize;
        let list = TraceList::from_records(vec![short], &ReadOptions::default());
        let segment = &list.find("FDSN:XX_A__B_H_Z").unwrap().segments[0];
        assert!(matches!(
            segment.unpack(),
            Err(SeisError::TooManySamples(_, 8, 2))
        ));
    }

    #[test]
    fn rate_change_splits() {
        let options = ReadOptions::default();
        let mut second = record("FDSN:XX_A__B_H_Z", 100.2, &[3]);
        second.sample_rate = 20.0;
        let list = TraceList::from_records(
            vec![record("FDSN:XX_A__B_H_Z", 100.0, &[1, 2]), second],
            &options,
        );
        assert_eq!(list.find("FDSN:XX_A__B_H_Z").unwrap().segments.len(), 2);
    }
}
