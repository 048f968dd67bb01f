use chrono::prelude::*;
use std::fs;

use seisio::miniseed::{
    pack_mseed3, read_records, DataEncoding, Mseed3Header, Precision, ReadOptions, Sncl, Trace,
    TraceList,
};
use seisio::{Endian, ErrorKind, SeisError};

const RECORD_LENGTH: usize = 512;
const DATA_OFFSET: usize = 64;
const SAMPLES_PER_RECORD: usize = (RECORD_LENGTH - DATA_OFFSET) / 4;
const TOTAL_SAMPLES: usize = 14609;
/// 2016-01-14T03:36:33.3400 in units of 0.0001 seconds
const START_TICKS: i64 = 1452742593 * 10_000 + 3400;

fn sample(i: usize) -> i32 {
    ((i * 7919) % 20001) as i32 - 10000
}

/// A 512 byte miniSEED 2 INT32 record with blockette 1000.
fn ms2_record(
    sequence: usize,
    sncl: (&str, &str, &str, &str),
    endian: Endian,
    start_ticks: i64,
    samples: &[i32],
) -> Result<Vec<u8>, SeisError> {
    let mut data = Vec::with_capacity(4 * samples.len());
    for s in samples {
        endian.write_i32(&mut data, *s)?;
    }
    ms2_encoded_record(sequence, sncl, endian, start_ticks, 3, samples.len(), &data)
}

/// A 512 byte miniSEED 2 record around already encoded data.
fn ms2_encoded_record(
    sequence: usize,
    sncl: (&str, &str, &str, &str),
    endian: Endian,
    start_ticks: i64,
    encoding: u8,
    num_samples: usize,
    data: &[u8],
) -> Result<Vec<u8>, SeisError> {
    let (network, station, location, channel) = sncl;
    let start = DateTime::from_timestamp(start_ticks.div_euclid(10_000), 0).unwrap();
    let mut buf = Vec::with_capacity(RECORD_LENGTH);
    buf.extend_from_slice(format!("{:06}D ", sequence).as_bytes());
    buf.extend_from_slice(format!("{:<5}{:<2}{:<3}{:<2}", station, location, channel, network).as_bytes());
    endian.write_u16(&mut buf, start.year() as u16)?;
    endian.write_u16(&mut buf, start.ordinal() as u16)?;
    buf.extend_from_slice(&[start.hour() as u8, start.minute() as u8, start.second() as u8, 0]);
    endian.write_u16(&mut buf, start_ticks.rem_euclid(10_000) as u16)?;
    endian.write_u16(&mut buf, num_samples as u16)?;
    endian.write_i16(&mut buf, 100)?;
    endian.write_i16(&mut buf, 1)?;
    buf.extend_from_slice(&[0, 0, 0, 1]);
    endian.write_i32(&mut buf, 0)?;
    endian.write_u16(&mut buf, DATA_OFFSET as u16)?;
    endian.write_u16(&mut buf, 48)?;
    // blockette 1000
    endian.write_u16(&mut buf, 1000)?;
    endian.write_u16(&mut buf, 0)?;
    let word_order = if endian == Endian::Big { 1 } else { 0 };
    buf.extend_from_slice(&[encoding, word_order, 9, 0]);
    buf.resize(DATA_OFFSET, 0);
    buf.extend_from_slice(data);
    buf.resize(RECORD_LENGTH, 0);
    Ok(buf)
}

/// One big endian Steim frame from its sixteen words, missing words zero.
fn steim_frame(words: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    for w in words {
        out.extend_from_slice(&w.to_be_bytes());
    }
    out.resize(64, 0);
    out
}

/// HHZ records interleaved with records of a little endian HHN channel.
fn multiplexed_file() -> Result<Vec<u8>, SeisError> {
    let values: Vec<i32> = (0..TOTAL_SAMPLES).map(sample).collect();
    let mut file = Vec::new();
    let mut sequence = 1;
    for (k, chunk) in values.chunks(SAMPLES_PER_RECORD).enumerate() {
        let ticks = START_TICKS + (k * SAMPLES_PER_RECORD * 100) as i64;
        file.extend(ms2_record(sequence, ("WY", "YWB", "01", "HHZ"), Endian::Big, ticks, chunk)?);
        sequence += 1;
        if k % 10 == 0 {
            let other: Vec<i32> = chunk.iter().map(|v| -v).collect();
            file.extend(ms2_record(sequence, ("WY", "YWB", "01", "HHN"), Endian::Little, ticks, &other)?);
            sequence += 1;
        }
    }
    Ok(file)
}

#[test]
fn read_multiplexed_channel() -> Result<(), SeisError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("WY.YWB.ms");
    fs::write(&path, multiplexed_file()?)?;

    let mut trace = Trace::new();
    let sncl = Sncl::new("WY", "YWB", "HHZ", "01");
    trace.read(&path, &sncl)?;
    assert_eq!(trace.precision(), Precision::Int32);
    assert_eq!(trace.number_of_samples(), TOTAL_SAMPLES);
    assert_eq!(trace.sampling_rate(), 100.0);
    assert_eq!(trace.sncl(), &sncl);
    let start = trace.start_time();
    assert_eq!(start.year(), 2016);
    assert_eq!(start.julian_day(), 14);
    assert_eq!(start.month(), 1);
    assert_eq!(start.day_of_month(), 14);
    assert_eq!(start.hour(), 3);
    assert_eq!(start.minute(), 36);
    assert_eq!(start.second(), 33);
    assert_eq!(start.micro_second(), 340000);
    let data = trace.data_i32()?;
    for (i, v) in data.iter().enumerate() {
        assert_eq!(*v, sample(i), "sample {}", i);
    }
    let end = trace.end_time()?;
    assert!((end.epoch() - (start.epoch() + 146.08)).abs() < 1.0e-6);

    assert_eq!(
        trace.data_f32().unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert!(trace.data_f64().is_err());

    let waveform = trace.to_waveform_data()?;
    assert_eq!(waveform.precision, Precision::Int32);
    assert_eq!(waveform.channel_id.location, "01");
    assert_eq!(waveform.samples.len(), TOTAL_SAMPLES);
    Ok(())
}

#[test]
fn other_channel_and_listing() -> Result<(), SeisError> {
    let bytes = multiplexed_file()?;
    let options = ReadOptions::default();
    let records = read_records(&bytes, &options)?;
    assert_eq!(records.len(), 131 + 14);
    assert_eq!(records[1].endian, Endian::Little);

    let list = TraceList::from_bytes(&bytes, &options)?;
    assert_eq!(
        list.identifiers(),
        vec!["FDSN:WY_YWB_01_H_H_Z", "FDSN:WY_YWB_01_H_H_N"]
    );
    // every tenth record leaves gaps in HHN
    assert_eq!(list.find("FDSN:WY_YWB_01_H_H_N").unwrap().segments.len(), 14);

    let mut trace = Trace::new();
    trace.read_from_bytes(&bytes, &Sncl::new("wy", "ywb", "hhn", "01"), &options)?;
    assert_eq!(trace.number_of_samples(), SAMPLES_PER_RECORD);
    assert_eq!(trace.data_i32()?[1], -sample(1));
    assert_eq!(trace.start_time().micro_second(), 340000);
    Ok(())
}

#[test]
fn missing_channel_leaves_trace_cleared() -> Result<(), SeisError> {
    let bytes = multiplexed_file()?;
    let mut trace = Trace::new();
    trace.read_from_bytes(&bytes, &Sncl::new("WY", "YWB", "HHZ", "01"), &ReadOptions::default())?;
    assert_eq!(trace.precision(), Precision::Int32);

    let err = trace
        .read_from_bytes(&bytes, &Sncl::new("WY", "YWB", "HHE", "01"), &ReadOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(trace.precision(), Precision::Unknown);
    assert_eq!(trace.data_i32().unwrap_err().kind(), ErrorKind::NotSet);

    let err = trace.read("no/such/file.mseed", &Sncl::new("WY", "", "", "")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    let err = trace
        .read_from_bytes(&bytes, &Sncl::default(), &ReadOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    Ok(())
}

fn mseed3_file(encoding: DataEncoding, rate: f64, data: &[u8], n: usize) -> Result<Vec<u8>, SeisError> {
    let start = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap();
    let header = Mseed3Header::new(start, encoding, rate, n);
    pack_mseed3(&header, "FDSN:XX_TEST__L_H_Z", data)
}

#[test]
fn mseed3_float64() -> Result<(), SeisError> {
    let values = [0.5f64, -1.25, 3.0e10];
    let mut data = Vec::new();
    for v in values {
        Endian::Little.write_f64(&mut data, v)?;
    }
    let bytes = mseed3_file(DataEncoding::FLOAT64, -10.0, &data, values.len())?;
    let mut trace = Trace::new();
    trace.read_from_bytes(&bytes, &Sncl::new("XX", "TEST", "LHZ", ""), &ReadOptions::default())?;
    assert_eq!(trace.precision(), Precision::Float64);
    assert_eq!(trace.data_f64()?, &values);
    assert_eq!(trace.sampling_rate(), 0.1);
    assert_eq!(trace.start_time().to_iso(), "2022-06-01T12:00:00.000000");
    assert_eq!(trace.data_i32().unwrap_err().kind(), ErrorKind::InvalidInput);
    Ok(())
}

#[test]
fn zero_sampling_rate_fails() -> Result<(), SeisError> {
    let mut data = Vec::new();
    Endian::Little.write_f32(&mut data, 1.5)?;
    let bytes = mseed3_file(DataEncoding::FLOAT32, 0.0, &data, 1)?;
    let mut trace = Trace::new();
    let err = trace
        .read_from_bytes(&bytes, &Sncl::new("XX", "TEST", "LHZ", ""), &ReadOptions::default())
        .unwrap_err();
    assert!(matches!(err, SeisError::SamplingRate(_)));
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_eq!(trace.precision(), Precision::Unknown);
    Ok(())
}

#[test]
fn corrupt_crc_fails() -> Result<(), SeisError> {
    let mut data = Vec::new();
    Endian::Little.write_i32(&mut data, 7)?;
    let mut bytes = mseed3_file(DataEncoding::INT32, 1.0, &data, 1)?;
    let first_sample = bytes.len() - 4;
    bytes[first_sample] = 8;
    let mut trace = Trace::new();
    let sncl = Sncl::new("XX", "TEST", "LHZ", "");
    let err = trace
        .read_from_bytes(&bytes, &sncl, &ReadOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);

    let options = ReadOptions {
        validate_crc: false,
        ..ReadOptions::default()
    };
    trace.read_from_bytes(&bytes, &sncl, &options)?;
    assert_eq!(trace.data_i32()?, &[8]);
    Ok(())
}

#[test]
fn steim1_records_through_trace() -> Result<(), SeisError> {
    // bytes, halfwords and a fullword: 1, -2, 3, 300, -100, 100000
    let w3 = u32::from_be_bytes([0, 1, 0xFE, 3]);
    let w4 = ((300i16 as u16 as u32) << 16) | (-100i16 as u16 as u32);
    let frame = steim_frame(&[0x01B0_0000, 10, 100212, w3, w4, 100000]);
    let expected = [10, 11, 9, 12, 312, 212, 100212];
    let sncl = ("IU", "ANMO", "00", "BHZ");
    let mut file = ms2_encoded_record(1, sncl, Endian::Big, START_TICKS, 10, 7, &frame)?;
    let next = START_TICKS + 7 * 100;
    file.extend(ms2_encoded_record(2, sncl, Endian::Big, next, 10, 7, &frame)?);

    let mut trace = Trace::new();
    trace.read_from_bytes(&file, &Sncl::new("IU", "ANMO", "BHZ", "00"), &ReadOptions::default())?;
    assert_eq!(trace.precision(), Precision::Int32);
    assert_eq!(trace.number_of_samples(), 14);
    assert_eq!(&trace.data_i32()?[..7], &expected);
    assert_eq!(&trace.data_i32()?[7..], &expected);
    assert_eq!(trace.start_time().micro_second(), 340000);
    Ok(())
}

#[test]
fn steim2_record_through_trace() -> Result<(), SeisError> {
    // seven 4-bit, three 10-bit and one 30-bit difference
    let sevens = (2u32 << 30) | [0u32, 1, 2, 3, 0xF, 0xE, 1].iter().fold(0, |acc, d| (acc << 4) | d);
    let threes = (3u32 << 30) | (5 << 20) | ((-5i32 as u32 & 0x3FF) << 10) | 500;
    let one = (1u32 << 30) | 1_000_000;
    let frame = steim_frame(&[
        (3 << 24) | (2 << 22) | (2 << 20),
        7,
        1_000_511,
        sevens,
        threes,
        one,
    ]);
    let file = ms2_encoded_record(1, ("IU", "ANMO", "10", "LHZ"), Endian::Big, START_TICKS, 11, 11, &frame)?;

    let mut trace = Trace::new();
    trace.read_from_bytes(&file, &Sncl::new("IU", "ANMO", "LHZ", "10"), &ReadOptions::default())?;
    assert_eq!(
        trace.data_i32()?,
        &[7, 8, 10, 13, 12, 10, 11, 16, 11, 511, 1_000_511]
    );
    assert_eq!(trace.sampling_rate(), 100.0);
    Ok(())
}

#[test]
fn sample_count_beyond_data_fails() -> Result<(), SeisError> {
    let frame = steim_frame(&[0x0100_0000, 1, 1, 0x0101_0101]);
    let bytes = mseed3_file(DataEncoding::STEIM2, 1.0, &frame, i32::MAX as usize)?;
    let mut trace = Trace::new();
    let sncl = Sncl::new("XX", "TEST", "LHZ", "");
    let err = trace
        .read_from_bytes(&bytes, &sncl, &ReadOptions::default())
        .unwrap_err();
    assert!(matches!(err, SeisError::TooManySamples(..)));
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_eq!(trace.precision(), Precision::Unknown);

    // 448 data bytes hold 112 INT32 samples, not 500
    let values: Vec<i32> = (0..112).collect();
    let mut data = Vec::new();
    for v in &values {
        Endian::Big.write_i32(&mut data, *v)?;
    }
    let file = ms2_encoded_record(1, ("IU", "ANMO", "00", "BHZ"), Endian::Big, START_TICKS, 3, 500, &data)?;
    let err = trace
        .read_from_bytes(&file, &Sncl::new("IU", "ANMO", "BHZ", "00"), &ReadOptions::default())
        .unwrap_err();
    assert!(matches!(err, SeisError::TooManySamples(500, 448, 112)));
    Ok(())
}

#[test]
fn out_of_order_records_join() -> Result<(), SeisError> {
    let mut file = Vec::new();
    for (offset_ms, first) in [(0, 1), (600, 7), (300, 4)] {
        let start = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(offset_ms);
        let mut data = Vec::new();
        for v in first..first + 3 {
            Endian::Little.write_i32(&mut data, v)?;
        }
        let header = Mseed3Header::new(start, DataEncoding::INT32, 10.0, 3);
        file.extend(pack_mseed3(&header, "FDSN:XX_TEST__L_H_Z", &data)?);
    }

    let options = ReadOptions::default();
    let list = TraceList::from_bytes(&file, &options)?;
    assert_eq!(list.find("FDSN:XX_TEST__L_H_Z").unwrap().segments.len(), 1);

    let mut trace = Trace::new();
    trace.read_from_bytes(&file, &Sncl::new("XX", "TEST", "LHZ", ""), &options)?;
    assert_eq!(trace.data_i32()?, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(trace.start_time().to_iso(), "2022-06-01T12:00:00.000000");
    assert!((trace.end_time()?.epoch() - (trace.start_time().epoch() + 0.8)).abs() < 1.0e-6);
    Ok(())
}
