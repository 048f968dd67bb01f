use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::segy::codes::{
    AmplitudeRecoveryMethod, BinaryGainRecovered, CorrelatedDataTraces, DataFormat,
    ImpulsePolarity, MeasurementSystem, SweepType, TaperType, TimeBasis, TraceSortingCode,
    VibratoryPolarity,
};
use crate::{Endian, SeisError};

pub const BINARY_HEADER_SIZE: usize = 400;

/// Written at byte 96 of the binary header so a reader can tell the byte
/// order: `0x01020304`.
pub const INTEGER_CONSTANT: u32 = 16909060;

/// The 400 byte SEG-Y binary file header, revision 2 layout.
///
/// Several counts exist both as a 16 bit field and as a 32 bit extended
/// field. Setting one zeroes the other and the getter returns the larger.
/// Enumerated codes are kept as packed integers; zero means unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryFileHeader {
    job_id: u32,
    line_number: u32,
    reel_number: u32,
    traces_per_ensemble: u16,
    auxiliary_traces_per_ensemble: u16,
    sample_interval: u16,
    original_sample_interval: u16,
    samples_per_trace: u16,
    original_samples_per_trace: u16,
    data_format: i16,
    ensemble_fold: u16,
    trace_sorting: i16,
    vertical_sum: u16,
    starting_sweep_frequency: u16,
    ending_sweep_frequency: u16,
    sweep_length: u16,
    sweep_type: i16,
    sweep_channel: u16,
    starting_taper_length: u16,
    ending_taper_length: u16,
    taper_type: i16,
    correlated_data_traces: i16,
    binary_gain_recovered: i16,
    amplitude_recovery_method: i16,
    measurement_system: i16,
    impulse_polarity: i16,
    vibratory_polarity: i16,
    extended_traces_per_ensemble: u32,
    extended_auxiliary_traces_per_ensemble: u32,
    extended_samples_per_trace: u32,
    extended_sample_interval: f64,
    extended_original_sample_interval: f64,
    extended_original_samples_per_trace: u32,
    extended_ensemble_fold: u32,
    major_revision: u8,
    minor_revision: u8,
    fixed_length_traces: bool,
    extended_textual_headers: i16,
    max_additional_trace_headers: u32,
    time_basis: i16,
    number_of_traces: u64,
    first_trace_offset: u64,
    trailer_stanzas: u32,
}

/// Byte offsets within the binary header.
mod offset {
    pub const JOB_ID: usize = 0;
    pub const LINE_NUMBER: usize = 4;
    pub const REEL_NUMBER: usize = 8;
    pub const TRACES_PER_ENSEMBLE: usize = 12;
    pub const AUXILIARY_TRACES: usize = 14;
    pub const SAMPLE_INTERVAL: usize = 16;
    pub const ORIGINAL_SAMPLE_INTERVAL: usize = 18;
    pub const SAMPLES_PER_TRACE: usize = 20;
    pub const ORIGINAL_SAMPLES_PER_TRACE: usize = 22;
    pub const DATA_FORMAT: usize = 24;
    pub const ENSEMBLE_FOLD: usize = 26;
    pub const TRACE_SORTING: usize = 28;
    pub const VERTICAL_SUM: usize = 30;
    pub const STARTING_SWEEP_FREQUENCY: usize = 32;
    pub const ENDING_SWEEP_FREQUENCY: usize = 34;
    pub const SWEEP_LENGTH: usize = 36;
    pub const SWEEP_TYPE: usize = 38;
    pub const SWEEP_CHANNEL: usize = 40;
    pub const STARTING_TAPER_LENGTH: usize = 42;
    pub const ENDING_TAPER_LENGTH: usize = 44;
    pub const TAPER_TYPE: usize = 46;
    pub const CORRELATED: usize = 48;
    pub const GAIN_RECOVERED: usize = 50;
    pub const AMPLITUDE_RECOVERY: usize = 52;
    pub const MEASUREMENT_SYSTEM: usize = 54;
    pub const IMPULSE_POLARITY: usize = 56;
    pub const VIBRATORY_POLARITY: usize = 58;
    pub const EXTENDED_TRACES_PER_ENSEMBLE: usize = 60;
    pub const EXTENDED_AUXILIARY_TRACES: usize = 64;
    pub const EXTENDED_SAMPLES_PER_TRACE: usize = 68;
    pub const EXTENDED_SAMPLE_INTERVAL: usize = 72;
    pub const EXTENDED_ORIGINAL_SAMPLE_INTERVAL: usize = 80;
    pub const EXTENDED_ORIGINAL_SAMPLES_PER_TRACE: usize = 88;
    pub const EXTENDED_ENSEMBLE_FOLD: usize = 92;
    pub const INTEGER_CONSTANT: usize = 96;
    pub const MAJOR_REVISION: usize = 300;
    pub const MINOR_REVISION: usize = 301;
    pub const FIXED_LENGTH_TRACES: usize = 302;
    pub const EXTENDED_TEXTUAL_HEADERS: usize = 304;
    pub const MAX_ADDITIONAL_TRACE_HEADERS: usize = 306;
    pub const TIME_BASIS: usize = 310;
    pub const NUMBER_OF_TRACES: usize = 312;
    pub const FIRST_TRACE_OFFSET: usize = 320;
    pub const TRAILER_STANZAS: usize = 328;
}

/// Reads an enumerated field, where zero means unspecified.
fn code<T>(
    raw: i16,
    name: &str,
    from_code: fn(i16) -> Result<T, SeisError>,
) -> Result<T, SeisError> {
    if raw == 0 {
        return Err(SeisError::NotSet(name.to_string()));
    }
    from_code(raw)
}

fn check_code(raw: i16, from_code: fn(i16) -> Result<(), SeisError>) -> Result<(), SeisError> {
    if raw == 0 {
        return Ok(());
    }
    from_code(raw)
}

impl BinaryFileHeader {
    /// An empty header for the given format revision.
    pub fn new(major_revision: u8, minor_revision: u8) -> BinaryFileHeader {
        BinaryFileHeader {
            job_id: 0,
            line_number: 0,
            reel_number: 0,
            traces_per_ensemble: 0,
            auxiliary_traces_per_ensemble: 0,
            sample_interval: 0,
            original_sample_interval: 0,
            samples_per_trace: 0,
            original_samples_per_trace: 0,
            data_format: 0,
            ensemble_fold: 0,
            trace_sorting: 0,
            vertical_sum: 0,
            starting_sweep_frequency: 0,
            ending_sweep_frequency: 0,
            sweep_length: 0,
            sweep_type: 0,
            sweep_channel: 0,
            starting_taper_length: 0,
            ending_taper_length: 0,
            taper_type: 0,
            correlated_data_traces: 0,
            binary_gain_recovered: 0,
            amplitude_recovery_method: 0,
            measurement_system: 0,
            impulse_polarity: 0,
            vibratory_polarity: 0,
            extended_traces_per_ensemble: 0,
            extended_auxiliary_traces_per_ensemble: 0,
            extended_samples_per_trace: 0,
            extended_sample_interval: 0.0,
            extended_original_sample_interval: 0.0,
            extended_original_samples_per_trace: 0,
            extended_ensemble_fold: 0,
            major_revision,
            minor_revision,
            fixed_length_traces: false,
            extended_textual_headers: 0,
            max_additional_trace_headers: 0,
            time_basis: 0,
            number_of_traces: 0,
            first_trace_offset: 0,
            trailer_stanzas: 0,
        }
    }

    /// Guesses the byte order from the integer constant at byte 96. Files
    /// older than revision 2 leave it zero and are taken as big endian.
    pub fn detect_endian(bytes: &[u8]) -> Endian {
        let at = offset::INTEGER_CONSTANT;
        if bytes.len() >= at + 4 && Endian::Little.read_u32(&bytes[at..at + 4]) == INTEGER_CONSTANT
        {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Unpacks the first 400 bytes of `bytes`. Enumerated fields holding a
    /// code outside their set make the header malformed.
    pub fn from_bytes(bytes: &[u8], endian: Endian) -> Result<BinaryFileHeader, SeisError> {
        if bytes.len() < BINARY_HEADER_SIZE {
            return Err(SeisError::InsufficientBytes(bytes.len(), BINARY_HEADER_SIZE));
        }
        let u16_at = |at: usize| endian.read_u16(&bytes[at..at + 2]);
        let i16_at = |at: usize| endian.read_i16(&bytes[at..at + 2]);
        let u32_at = |at: usize| endian.read_u32(&bytes[at..at + 4]);
        let u64_at = |at: usize| endian.read_u64(&bytes[at..at + 8]);
        let f64_at = |at: usize| endian.read_f64(&bytes[at..at + 8]);
        let header = BinaryFileHeader {
            job_id: u32_at(offset::JOB_ID),
            line_number: u32_at(offset::LINE_NUMBER),
            reel_number: u32_at(offset::REEL_NUMBER),
            traces_per_ensemble: u16_at(offset::TRACES_PER_ENSEMBLE),
            auxiliary_traces_per_ensemble: u16_at(offset::AUXILIARY_TRACES),
            sample_interval: u16_at(offset::SAMPLE_INTERVAL),
            original_sample_interval: u16_at(offset::ORIGINAL_SAMPLE_INTERVAL),
            samples_per_trace: u16_at(offset::SAMPLES_PER_TRACE),
            original_samples_per_trace: u16_at(offset::ORIGINAL_SAMPLES_PER_TRACE),
            data_format: i16_at(offset::DATA_FORMAT),
            ensemble_fold: u16_at(offset::ENSEMBLE_FOLD),
            trace_sorting: i16_at(offset::TRACE_SORTING),
            vertical_sum: u16_at(offset::VERTICAL_SUM),
            starting_sweep_frequency: u16_at(offset::STARTING_SWEEP_FREQUENCY),
            ending_sweep_frequency: u16_at(offset::ENDING_SWEEP_FREQUENCY),
            sweep_length: u16_at(offset::SWEEP_LENGTH),
            sweep_type: i16_at(offset::SWEEP_TYPE),
            sweep_channel: u16_at(offset::SWEEP_CHANNEL),
            starting_taper_length: u16_at(offset::STARTING_TAPER_LENGTH),
            ending_taper_length: u16_at(offset::ENDING_TAPER_LENGTH),
            taper_type: i16_at(offset::TAPER_TYPE),
            correlated_data_traces: i16_at(offset::CORRELATED),
            binary_gain_recovered: i16_at(offset::GAIN_RECOVERED),
            amplitude_recovery_method: i16_at(offset::AMPLITUDE_RECOVERY),
            measurement_system: i16_at(offset::MEASUREMENT_SYSTEM),
            impulse_polarity: i16_at(offset::IMPULSE_POLARITY),
            vibratory_polarity: i16_at(offset::VIBRATORY_POLARITY),
            extended_traces_per_ensemble: u32_at(offset::EXTENDED_TRACES_PER_ENSEMBLE),
            extended_auxiliary_traces_per_ensemble: u32_at(offset::EXTENDED_AUXILIARY_TRACES),
            extended_samples_per_trace: u32_at(offset::EXTENDED_SAMPLES_PER_TRACE),
            extended_sample_interval: f64_at(offset::EXTENDED_SAMPLE_INTERVAL),
            extended_original_sample_interval: f64_at(offset::EXTENDED_ORIGINAL_SAMPLE_INTERVAL),
            extended_original_samples_per_trace: u32_at(
                offset::EXTENDED_ORIGINAL_SAMPLES_PER_TRACE,
            ),
            extended_ensemble_fold: u32_at(offset::EXTENDED_ENSEMBLE_FOLD),
            major_revision: bytes[offset::MAJOR_REVISION],
            minor_revision: bytes[offset::MINOR_REVISION],
            fixed_length_traces: u16_at(offset::FIXED_LENGTH_TRACES) == 1,
            extended_textual_headers: i16_at(offset::EXTENDED_TEXTUAL_HEADERS),
            max_additional_trace_headers: u32_at(offset::MAX_ADDITIONAL_TRACE_HEADERS),
            time_basis: i16_at(offset::TIME_BASIS),
            number_of_traces: u64_at(offset::NUMBER_OF_TRACES),
            first_trace_offset: u64_at(offset::FIRST_TRACE_OFFSET),
            trailer_stanzas: u32_at(offset::TRAILER_STANZAS),
        };
        header.check_codes()?;
        debug!(
            "SEG-Y binary header rev {}.{}, {} samples per trace, format code {}",
            header.major_revision,
            header.minor_revision,
            header.number_of_samples_per_trace(),
            header.data_format
        );
        Ok(header)
    }

    fn check_codes(&self) -> Result<(), SeisError> {
        check_code(self.data_format, |c| DataFormat::from_code(c).map(|_| ()))?;
        check_code(self.trace_sorting, |c| TraceSortingCode::from_code(c).map(|_| ()))?;
        check_code(self.sweep_type, |c| SweepType::from_code(c).map(|_| ()))?;
        check_code(self.taper_type, |c| TaperType::from_code(c).map(|_| ()))?;
        check_code(self.correlated_data_traces, |c| {
            CorrelatedDataTraces::from_code(c).map(|_| ())
        })?;
        check_code(self.binary_gain_recovered, |c| {
            BinaryGainRecovered::from_code(c).map(|_| ())
        })?;
        check_code(self.amplitude_recovery_method, |c| {
            AmplitudeRecoveryMethod::from_code(c).map(|_| ())
        })?;
        check_code(self.measurement_system, |c| {
            MeasurementSystem::from_code(c).map(|_| ())
        })?;
        check_code(self.impulse_polarity, |c| ImpulsePolarity::from_code(c).map(|_| ()))?;
        check_code(self.vibratory_polarity, |c| {
            VibratoryPolarity::from_code(c).map(|_| ())
        })?;
        check_code(self.time_basis, |c| TimeBasis::from_code(c).map(|_| ()))?;
        Ok(())
    }

    /// Packs all 400 bytes, writing the integer constant and zeroing the
    /// unassigned regions.
    pub fn write_to<W: Write>(&self, writer: &mut W, endian: Endian) -> Result<(), SeisError> {
        let mut out = Vec::with_capacity(BINARY_HEADER_SIZE);
        endian.write_u32(&mut out, self.job_id)?;
        endian.write_u32(&mut out, self.line_number)?;
        endian.write_u32(&mut out, self.reel_number)?;
        for v in [
            self.traces_per_ensemble,
            self.auxiliary_traces_per_ensemble,
            self.sample_interval,
            self.original_sample_interval,
            self.samples_per_trace,
            self.original_samples_per_trace,
        ] {
            endian.write_u16(&mut out, v)?;
        }
        endian.write_i16(&mut out, self.data_format)?;
        endian.write_u16(&mut out, self.ensemble_fold)?;
        endian.write_i16(&mut out, self.trace_sorting)?;
        for v in [
            self.vertical_sum,
            self.starting_sweep_frequency,
            self.ending_sweep_frequency,
            self.sweep_length,
        ] {
            endian.write_u16(&mut out, v)?;
        }
        endian.write_i16(&mut out, self.sweep_type)?;
        for v in [
            self.sweep_channel,
            self.starting_taper_length,
            self.ending_taper_length,
        ] {
            endian.write_u16(&mut out, v)?;
        }
        for v in [
            self.taper_type,
            self.correlated_data_traces,
            self.binary_gain_recovered,
            self.amplitude_recovery_method,
            self.measurement_system,
            self.impulse_polarity,
            self.vibratory_polarity,
        ] {
            endian.write_i16(&mut out, v)?;
        }
        endian.write_u32(&mut out, self.extended_traces_per_ensemble)?;
        endian.write_u32(&mut out, self.extended_auxiliary_traces_per_ensemble)?;
        endian.write_u32(&mut out, self.extended_samples_per_trace)?;
        endian.write_f64(&mut out, self.extended_sample_interval)?;
        endian.write_f64(&mut out, self.extended_original_sample_interval)?;
        endian.write_u32(&mut out, self.extended_original_samples_per_trace)?;
        endian.write_u32(&mut out, self.extended_ensemble_fold)?;
        endian.write_u32(&mut out, INTEGER_CONSTANT)?;
        out.resize(offset::MAJOR_REVISION, 0);
        out.push(self.major_revision);
        out.push(self.minor_revision);
        endian.write_u16(&mut out, u16::from(self.fixed_length_traces))?;
        endian.write_i16(&mut out, self.extended_textual_headers)?;
        endian.write_u32(&mut out, self.max_additional_trace_headers)?;
        endian.write_i16(&mut out, self.time_basis)?;
        endian.write_u64(&mut out, self.number_of_traces)?;
        endian.write_u64(&mut out, self.first_trace_offset)?;
        endian.write_u32(&mut out, self.trailer_stanzas)?;
        out.resize(BINARY_HEADER_SIZE, 0);
        writer.write_all(&out)?;
        Ok(())
    }

    pub fn to_bytes(&self, endian: Endian) -> Result<Vec<u8>, SeisError> {
        let mut out = Vec::with_capacity(BINARY_HEADER_SIZE);
        self.write_to(&mut out, endian)?;
        Ok(out)
    }

    pub fn set_job_identification_number(&mut self, job_id: u32) {
        self.job_id = job_id;
    }

    /// Zero means unknown.
    pub fn job_identification_number(&self) -> u32 {
        self.job_id
    }

    pub fn set_line_number(&mut self, line_number: u32) {
        self.line_number = line_number;
    }

    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    pub fn set_reel_number(&mut self, reel_number: u32) {
        self.reel_number = reel_number;
    }

    pub fn reel_number(&self) -> u32 {
        self.reel_number
    }

    pub fn set_number_of_traces_per_ensemble(&mut self, n: u16) {
        self.extended_traces_per_ensemble = 0;
        self.traces_per_ensemble = n;
    }

    pub fn set_extended_number_of_traces_per_ensemble(&mut self, n: u32) {
        self.traces_per_ensemble = 0;
        self.extended_traces_per_ensemble = n;
    }

    pub fn number_of_traces_per_ensemble(&self) -> u32 {
        u32::from(self.traces_per_ensemble).max(self.extended_traces_per_ensemble)
    }

    pub fn set_number_of_auxiliary_traces_per_ensemble(&mut self, n: u16) {
        self.extended_auxiliary_traces_per_ensemble = 0;
        self.auxiliary_traces_per_ensemble = n;
    }

    pub fn set_extended_number_of_auxiliary_traces_per_ensemble(&mut self, n: u32) {
        self.auxiliary_traces_per_ensemble = 0;
        self.extended_auxiliary_traces_per_ensemble = n;
    }

    pub fn number_of_auxiliary_traces_per_ensemble(&self) -> u32 {
        u32::from(self.auxiliary_traces_per_ensemble)
            .max(self.extended_auxiliary_traces_per_ensemble)
    }

    /// Sample interval in microseconds (time), Hz (frequency) or meters or
    /// feet (depth). Must be positive.
    pub fn set_sample_interval(&mut self, interval: u16) -> Result<(), SeisError> {
        if interval == 0 {
            return Err(SeisError::InvalidArgument(String::from(
                "sample interval must be positive",
            )));
        }
        self.sample_interval = interval;
        Ok(())
    }

    pub fn sample_interval(&self) -> Result<u16, SeisError> {
        if self.sample_interval == 0 {
            return Err(SeisError::NotSet(String::from("sample interval")));
        }
        Ok(self.sample_interval)
    }

    pub fn set_original_sample_interval(&mut self, interval: u16) {
        self.original_sample_interval = interval;
    }

    pub fn original_sample_interval(&self) -> u16 {
        self.original_sample_interval
    }

    pub fn set_extended_sample_interval(&mut self, interval: f64) -> Result<(), SeisError> {
        if interval.is_nan() || interval <= 0.0 {
            return Err(SeisError::InvalidArgument(format!(
                "extended sample interval {} must be positive",
                interval
            )));
        }
        self.extended_sample_interval = interval;
        Ok(())
    }

    /// Zero when not present.
    pub fn extended_sample_interval(&self) -> f64 {
        self.extended_sample_interval
    }

    pub fn set_extended_original_sample_interval(&mut self, interval: f64) {
        self.extended_original_sample_interval = interval;
    }

    pub fn extended_original_sample_interval(&self) -> f64 {
        self.extended_original_sample_interval
    }

    pub fn set_number_of_samples_per_trace(&mut self, n: u16) -> Result<(), SeisError> {
        if n == 0 {
            return Err(SeisError::InvalidArgument(String::from(
                "number of samples per trace must be positive",
            )));
        }
        self.extended_samples_per_trace = 0;
        self.samples_per_trace = n;
        Ok(())
    }

    pub fn set_extended_number_of_samples_per_trace(&mut self, n: u32) -> Result<(), SeisError> {
        if n == 0 {
            return Err(SeisError::InvalidArgument(String::from(
                "number of samples per trace must be positive",
            )));
        }
        self.samples_per_trace = 0;
        self.extended_samples_per_trace = n;
        Ok(())
    }

    /// Zero when neither the 16 nor the 32 bit count was set.
    pub fn number_of_samples_per_trace(&self) -> u32 {
        u32::from(self.samples_per_trace).max(self.extended_samples_per_trace)
    }

    pub fn set_number_of_original_samples_per_trace(&mut self, n: u16) {
        self.extended_original_samples_per_trace = 0;
        self.original_samples_per_trace = n;
    }

    pub fn set_extended_number_of_original_samples_per_trace(&mut self, n: u32) {
        self.original_samples_per_trace = 0;
        self.extended_original_samples_per_trace = n;
    }

    pub fn number_of_original_samples_per_trace(&self) -> u32 {
        u32::from(self.original_samples_per_trace).max(self.extended_original_samples_per_trace)
    }

    pub fn set_data_format(&mut self, format: DataFormat) {
        self.data_format = format.code();
    }

    /// The sample format. Formats other than IBM float, IEEE float and IEEE
    /// double are recognized but refused.
    pub fn data_format(&self) -> Result<DataFormat, SeisError> {
        let format = code(self.data_format, "data format", DataFormat::from_code)?;
        if !format.is_supported() {
            return Err(SeisError::UnsupportedDataFormat(format.code() as u16));
        }
        Ok(format)
    }

    pub fn set_ensemble_fold(&mut self, fold: u16) {
        self.extended_ensemble_fold = 0;
        self.ensemble_fold = fold;
    }

    pub fn set_extended_ensemble_fold(&mut self, fold: u32) {
        self.ensemble_fold = 0;
        self.extended_ensemble_fold = fold;
    }

    pub fn ensemble_fold(&self) -> u32 {
        u32::from(self.ensemble_fold).max(self.extended_ensemble_fold)
    }

    pub fn set_trace_sorting_code(&mut self, sorting: TraceSortingCode) {
        self.trace_sorting = sorting.code();
    }

    pub fn trace_sorting_code(&self) -> Result<TraceSortingCode, SeisError> {
        code(self.trace_sorting, "trace sorting code", TraceSortingCode::from_code)
    }

    pub fn set_vertical_sum_code(&mut self, sum: u16) {
        self.vertical_sum = sum;
    }

    /// 1 is no sum, 2 is two sums and so on.
    pub fn vertical_sum_code(&self) -> u16 {
        self.vertical_sum
    }

    pub fn set_starting_sweep_frequency(&mut self, hz: u16) {
        self.starting_sweep_frequency = hz;
    }

    pub fn starting_sweep_frequency(&self) -> u16 {
        self.starting_sweep_frequency
    }

    pub fn set_ending_sweep_frequency(&mut self, hz: u16) {
        self.ending_sweep_frequency = hz;
    }

    pub fn ending_sweep_frequency(&self) -> u16 {
        self.ending_sweep_frequency
    }

    /// Sweep length in milliseconds.
    pub fn set_sweep_length(&mut self, ms: u16) {
        self.sweep_length = ms;
    }

    pub fn sweep_length(&self) -> u16 {
        self.sweep_length
    }

    pub fn set_sweep_type(&mut self, sweep: SweepType) {
        self.sweep_type = sweep.code();
    }

    pub fn sweep_type(&self) -> Result<SweepType, SeisError> {
        code(self.sweep_type, "sweep type", SweepType::from_code)
    }

    pub fn set_sweep_channel(&mut self, trace: u16) {
        self.sweep_channel = trace;
    }

    pub fn sweep_channel(&self) -> u16 {
        self.sweep_channel
    }

    /// Taper lengths at the start and end of the sweep, in milliseconds.
    pub fn set_sweep_taper_lengths(&mut self, start_ms: u16, end_ms: u16) {
        self.starting_taper_length = start_ms;
        self.ending_taper_length = end_ms;
    }

    pub fn sweep_taper_lengths(&self) -> (u16, u16) {
        (self.starting_taper_length, self.ending_taper_length)
    }

    pub fn set_taper_type(&mut self, taper: TaperType) {
        self.taper_type = taper.code();
    }

    pub fn taper_type(&self) -> Result<TaperType, SeisError> {
        code(self.taper_type, "taper type", TaperType::from_code)
    }

    pub fn set_correlated_data_traces(&mut self, correlated: CorrelatedDataTraces) {
        self.correlated_data_traces = correlated.code();
    }

    pub fn correlated_data_traces(&self) -> Result<CorrelatedDataTraces, SeisError> {
        code(
            self.correlated_data_traces,
            "correlated data traces",
            CorrelatedDataTraces::from_code,
        )
    }

    pub fn set_binary_gain_recovered(&mut self, recovered: BinaryGainRecovered) {
        self.binary_gain_recovered = recovered.code();
    }

    pub fn binary_gain_recovered(&self) -> Result<BinaryGainRecovered, SeisError> {
        code(
            self.binary_gain_recovered,
            "binary gain recovered",
            BinaryGainRecovered::from_code,
        )
    }

    pub fn set_amplitude_recovery_method(&mut self, method: AmplitudeRecoveryMethod) {
        self.amplitude_recovery_method = method.code();
    }

    pub fn amplitude_recovery_method(&self) -> Result<AmplitudeRecoveryMethod, SeisError> {
        code(
            self.amplitude_recovery_method,
            "amplitude recovery method",
            AmplitudeRecoveryMethod::from_code,
        )
    }

    pub fn set_measurement_system(&mut self, system: MeasurementSystem) {
        self.measurement_system = system.code();
    }

    pub fn measurement_system(&self) -> Result<MeasurementSystem, SeisError> {
        code(
            self.measurement_system,
            "measurement system",
            MeasurementSystem::from_code,
        )
    }

    pub fn set_impulse_polarity(&mut self, polarity: ImpulsePolarity) {
        self.impulse_polarity = polarity.code();
    }

    pub fn impulse_polarity(&self) -> Result<ImpulsePolarity, SeisError> {
        code(self.impulse_polarity, "impulse polarity", ImpulsePolarity::from_code)
    }

    pub fn set_vibratory_polarity(&mut self, polarity: VibratoryPolarity) {
        self.vibratory_polarity = polarity.code();
    }

    pub fn vibratory_polarity(&self) -> Result<VibratoryPolarity, SeisError> {
        code(
            self.vibratory_polarity,
            "vibratory polarity",
            VibratoryPolarity::from_code,
        )
    }

    pub fn set_revision(&mut self, major: u8, minor: u8) {
        self.major_revision = major;
        self.minor_revision = minor;
    }

    /// Major and minor format revision.
    pub fn revision(&self) -> (u8, u8) {
        (self.major_revision, self.minor_revision)
    }

    pub fn set_fixed_length_traces(&mut self, fixed: bool) {
        self.fixed_length_traces = fixed;
    }

    pub fn fixed_length_traces(&self) -> bool {
        self.fixed_length_traces
    }

    /// Number of 3200 byte extended textual headers after the binary header;
    /// -1 means a variable number ended by a stanza.
    pub fn set_number_of_extended_textual_headers(&mut self, n: i16) {
        self.extended_textual_headers = n;
    }

    pub fn number_of_extended_textual_headers(&self) -> i16 {
        self.extended_textual_headers
    }

    pub fn set_max_additional_trace_headers(&mut self, n: u32) {
        self.max_additional_trace_headers = n;
    }

    pub fn max_additional_trace_headers(&self) -> u32 {
        self.max_additional_trace_headers
    }

    pub fn set_time_basis(&mut self, basis: TimeBasis) {
        self.time_basis = basis.code();
    }

    pub fn time_basis(&self) -> Result<TimeBasis, SeisError> {
        code(self.time_basis, "time basis", TimeBasis::from_code)
    }

    pub fn set_number_of_traces(&mut self, n: u64) {
        self.number_of_traces = n;
    }

    pub fn number_of_traces(&self) -> u64 {
        self.number_of_traces
    }

    /// Byte offset of the first trace from the start of the file.
    pub fn set_first_trace_offset(&mut self, byte_offset: u64) {
        self.first_trace_offset = byte_offset;
    }

    pub fn first_trace_offset(&self) -> u64 {
        self.first_trace_offset
    }

    pub fn set_number_of_trailer_stanzas(&mut self, n: u32) {
        self.trailer_stanzas = n;
    }

    pub fn number_of_trailer_stanzas(&self) -> u32 {
        self.trailer_stanzas
    }
}

impl Default for BinaryFileHeader {
    fn default() -> Self {
        BinaryFileHeader::new(2, 0)
    }
}
