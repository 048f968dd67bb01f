use std::fs;

use seisio::segy::{
    BinaryFileHeader, DataFormat, MeasurementSystem, Segy2, SweepType, TextualHeader,
    TraceSortingCode, FILE_HEADER_SIZE, TEXTUAL_HEADER_SIZE,
};
use seisio::{Endian, ErrorKind, SeisError};

fn survey() -> Result<Segy2, SeisError> {
    let mut text = TextualHeader::new();
    let cards: String = (1..=40)
        .map(|i| format!("{:<80}", format!("C{:02} CLIENT SURVEY LINE {}", i, i * 10)))
        .collect();
    text.set_text(&cards);

    let mut binary = BinaryFileHeader::new(2, 0);
    binary.set_job_identification_number(77);
    binary.set_line_number(1201);
    binary.set_reel_number(3);
    binary.set_number_of_traces_per_ensemble(48);
    binary.set_sample_interval(2000)?;
    binary.set_number_of_samples_per_trace(1500)?;
    binary.set_data_format(DataFormat::IbmFloat);
    binary.set_trace_sorting_code(TraceSortingCode::CdpEnsemble);
    binary.set_sweep_type(SweepType::Linear);
    binary.set_measurement_system(MeasurementSystem::Meters);
    binary.set_fixed_length_traces(true);
    binary.set_number_of_traces(96);

    let mut segy = Segy2::new();
    segy.set_textual_header(text);
    segy.set_binary_header(binary);
    Ok(segy)
}

#[test]
fn file_header_round_trip() -> Result<(), SeisError> {
    let dir = tempfile::tempdir()?;
    let segy = survey()?;
    for endian in [Endian::Big, Endian::Little] {
        let path = dir.path().join("line1201.sgy");
        let mut bytes = segy.header_bytes(endian)?;
        bytes.resize(FILE_HEADER_SIZE + 2 * segy.trace_record_size()?, 0);
        fs::write(&path, &bytes)?;

        let back = Segy2::read(&path)?;
        assert_eq!(back.endian(), Some(endian));
        let lines = back.textual_header().lines();
        assert_eq!(lines.len(), 40);
        assert_eq!(lines[39].trim_end(), "C40 CLIENT SURVEY LINE 400");
        let binary = back.binary_header();
        assert_eq!(binary.job_identification_number(), 77);
        assert_eq!(binary.line_number(), 1201);
        assert_eq!(binary.number_of_traces_per_ensemble(), 48);
        assert_eq!(binary.sample_interval()?, 2000);
        assert_eq!(binary.number_of_samples_per_trace(), 1500);
        assert_eq!(binary.data_format()?, DataFormat::IbmFloat);
        assert_eq!(binary.trace_sorting_code()?, TraceSortingCode::CdpEnsemble);
        assert_eq!(binary.sweep_type()?, SweepType::Linear);
        assert_eq!(binary.revision(), (2, 0));
        assert!(binary.fixed_length_traces());
        assert_eq!(binary.number_of_traces(), 96);
        assert_eq!(binary.taper_type().unwrap_err().kind(), ErrorKind::NotSet);
        assert_eq!(back.trace_record_size()?, 240 + 6000);
    }
    Ok(())
}

#[test]
fn textual_header_is_ebcdic_on_disk() -> Result<(), SeisError> {
    let segy = survey()?;
    let bytes = segy.header_bytes(Endian::Big)?;
    // 'C' is 0xC3 and a space is 0x40 in EBCDIC
    assert_eq!(bytes[0], 0xC3);
    assert_eq!(bytes[79], 0x40);
    let all: Vec<u8> = (0..TEXTUAL_HEADER_SIZE).map(|i| (i % 256) as u8).collect();
    let mut text = TextualHeader::new();
    text.set_bytes(&all);
    assert_eq!(TextualHeader::from_ebcdic(&text.to_ebcdic())?.as_bytes(), &all[..]);
    Ok(())
}

#[test]
fn extended_counts_take_the_larger_value() -> Result<(), SeisError> {
    let mut binary = BinaryFileHeader::new(2, 0);
    binary.set_number_of_traces_per_ensemble(10);
    binary.set_extended_number_of_traces_per_ensemble(70_000);
    assert_eq!(binary.number_of_traces_per_ensemble(), 70_000);
    binary.set_number_of_traces_per_ensemble(12);
    assert_eq!(binary.number_of_traces_per_ensemble(), 12);

    binary.set_extended_number_of_samples_per_trace(100_000)?;
    let back = BinaryFileHeader::from_bytes(&binary.to_bytes(Endian::Big)?, Endian::Big)?;
    assert_eq!(back.number_of_samples_per_trace(), 100_000);
    Ok(())
}

#[test]
fn bad_codes() -> Result<(), SeisError> {
    let mut segy = survey()?;
    let mut bytes = segy.header_bytes(Endian::Big)?;
    // data sample format code, bytes 3225-3226
    bytes[TEXTUAL_HEADER_SIZE + 24] = 0;
    bytes[TEXTUAL_HEADER_SIZE + 25] = 99;
    let err = Segy2::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, SeisError::UnknownCode(_, 99)));
    assert_eq!(err.kind(), ErrorKind::MalformedData);

    let mut binary = segy.binary_header().clone();
    binary.set_data_format(DataFormat::Int16);
    segy.set_binary_header(binary);
    let back = Segy2::from_bytes(&segy.header_bytes(Endian::Big)?)?;
    assert!(matches!(
        back.binary_header().data_format(),
        Err(SeisError::UnsupportedDataFormat(3))
    ));

    assert_eq!(
        Segy2::from_bytes(&bytes[..3599]).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    Ok(())
}
