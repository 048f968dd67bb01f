use approx::assert_relative_eq;
use std::fs;

use seisio::sac::{Character, Double, Integer, Logical, SacWaveform, HEADER_SIZE};
use seisio::{Endian, ErrorKind, SeisError, Time};

fn every_field_set() -> Result<SacWaveform, SeisError> {
    let mut sac = SacWaveform::new();
    let data: Vec<f64> = (0..500).map(|i| (i as f64 * 0.05).sin() * 1000.0).collect();
    sac.set_data(&data)?;
    for (i, field) in Double::ALL.iter().enumerate() {
        sac.set_header_double(*field, 0.01 * (i + 1) as f64)?;
    }
    for (i, field) in Integer::ALL.iter().enumerate() {
        if *field != Integer::NPTS {
            sac.set_header_integer(*field, i as i32 + 1)?;
        }
    }
    for (i, field) in Logical::ALL.iter().enumerate() {
        sac.set_header_logical(*field, i % 2 == 0);
    }
    for field in Character::ALL {
        sac.set_header_character(*field, field.name());
    }
    Ok(sac)
}

#[test]
fn write_read_both_byte_orders() -> Result<(), SeisError> {
    let dir = tempfile::tempdir()?;
    let sac = every_field_set()?;
    for endian in [Endian::Little, Endian::Big] {
        let path = dir.path().join(format!("nested/{}.sac", endian));
        sac.write(&path, endian)?;
        let bytes = fs::read(&path)?;
        assert_eq!(bytes.len(), HEADER_SIZE + 4 * 500);
        assert_eq!(seisio::sac::detect_endian(&bytes)?, endian);

        let back = SacWaveform::read(&path)?;
        let header = back.header();
        for (i, field) in Double::ALL.iter().enumerate() {
            assert_relative_eq!(
                header.get_double(*field),
                0.01 * (i + 1) as f64,
                max_relative = 1.0e-6
            );
        }
        for (i, field) in Integer::ALL.iter().enumerate() {
            let expected = if *field == Integer::NPTS { 500 } else { i as i32 + 1 };
            assert_eq!(header.get_integer(*field), expected, "{}", field);
        }
        for (i, field) in Logical::ALL.iter().enumerate() {
            assert_eq!(header.logical(*field), Some(i % 2 == 0));
        }
        assert_eq!(header.get_character(Character::KEVNM), "KEVNM");
        assert_eq!(header.character(Character::KINST), Some("KINST"));
        assert_eq!(back.number_of_samples(), 500);
        for (a, b) in back.data().iter().zip(sac.data()) {
            assert_relative_eq!(*a, *b, max_relative = 1.0e-6);
        }
    }
    Ok(())
}

#[test]
fn unset_fields_round_trip_as_sentinels() -> Result<(), SeisError> {
    let mut sac = SacWaveform::new();
    sac.set_sampling_period(0.025)?;
    sac.set_data(&[1.0, 2.0, 3.0])?;
    let bytes = sac.to_bytes(Endian::Big)?;
    let back = SacWaveform::from_bytes(&bytes)?;
    assert_eq!(back.header().get_double(Double::USER0), -12345.0);
    assert_eq!(back.header().get_integer(Integer::NEVID), -12345);
    assert_eq!(back.header().get_logical(Logical::LEVEN), -12345);
    assert_eq!(back.header().get_character(Character::KSTNM), "-12345");
    assert_eq!(back.header().character(Character::KSTNM), None);
    assert_eq!(back.to_bytes(Endian::Big)?, bytes);
    assert_relative_eq!(back.sampling_period()?, 0.025, max_relative = 1.0e-6);
    Ok(())
}

#[test]
fn start_time_from_reference_and_begin() -> Result<(), SeisError> {
    let mut sac = SacWaveform::new();
    let reference = Time::from_epoch(1460402025.255)?;
    let mut header = sac.header().clone();
    header.set_reference_time(&reference)?;
    for field in [
        Integer::NZYEAR,
        Integer::NZJDAY,
        Integer::NZHOUR,
        Integer::NZMIN,
        Integer::NZSEC,
        Integer::NZMSEC,
    ] {
        sac.set_header_integer(field, header.get_integer(field))?;
    }
    sac.set_header_double(Double::B, 10.5)?;
    let start = sac.start_time()?;
    assert_relative_eq!(start.epoch(), 1460402035.755, max_relative = 1.0e-12);
    Ok(())
}

#[test]
fn invalid_input() {
    let mut sac = SacWaveform::new();
    assert_eq!(
        sac.set_sampling_period(0.0).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        sac.set_header_integer(Integer::NPTS, 10).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(sac.to_bytes(Endian::Little).unwrap_err().kind(), ErrorKind::NotSet);
    assert_eq!(
        SacWaveform::read("does/not/exist.sac").unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        SacWaveform::from_bytes(&[0; 700]).unwrap_err().kind(),
        ErrorKind::MalformedData
    );
}
