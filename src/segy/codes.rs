//! Enumerated codes of the SEG-Y binary file header.
//!
//! Each code is packed as a 16 bit integer. Zero means the field was left
//! unspecified and is never a variant here.

use serde::{Deserialize, Serialize};

use crate::SeisError;

macro_rules! segy_codes {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident = $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_code(code: i16) -> Result<$name, SeisError> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(SeisError::UnknownCode($label, code as i64)),
                }
            }

            pub fn code(&self) -> i16 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }
    };
}

segy_codes!(
    /// Sample encoding of the trace data.
    DataFormat, "data sample format" {
        IbmFloat = 1,
        Int32 = 2,
        Int16 = 3,
        FixedPointWithGain = 4,
        IeeeFloat = 5,
        IeeeDouble = 6,
        Int24 = 7,
        Int8 = 8,
        Int64 = 9,
        UInt32 = 10,
        UInt16 = 11,
        UInt64 = 12,
        UInt24 = 15,
        UInt8 = 16,
    }
);

impl DataFormat {
    /// Formats this library can hand out: IBM float, IEEE float and IEEE
    /// double.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            DataFormat::IbmFloat | DataFormat::IeeeFloat | DataFormat::IeeeDouble
        )
    }

    pub fn bytes_per_sample(&self) -> usize {
        match self {
            DataFormat::Int8 | DataFormat::UInt8 => 1,
            DataFormat::Int16 | DataFormat::UInt16 => 2,
            DataFormat::Int24 | DataFormat::UInt24 => 3,
            DataFormat::IeeeDouble | DataFormat::Int64 | DataFormat::UInt64 => 8,
            _ => 4,
        }
    }
}

segy_codes!(
    TraceSortingCode, "trace sorting" {
        Other = -1,
        AsRecorded = 1,
        CdpEnsemble = 2,
        SingleFoldContinuousProfile = 3,
        HorizontallyStacked = 4,
        CommonSourcePoint = 5,
        CommonReceiverPoint = 6,
        CommonOffsetPoint = 7,
        CommonMidPoint = 8,
        CommonConversionPoint = 9,
    }
);

segy_codes!(
    SweepType, "sweep type" {
        Linear = 1,
        Parabolic = 2,
        Exponential = 3,
        Other = 4,
    }
);

segy_codes!(
    TaperType, "taper type" {
        Linear = 1,
        CosineSquared = 2,
        Other = 3,
    }
);

segy_codes!(
    CorrelatedDataTraces, "correlated data traces" {
        No = 1,
        Yes = 2,
    }
);

segy_codes!(
    BinaryGainRecovered, "binary gain recovered" {
        Yes = 1,
        No = 2,
    }
);

segy_codes!(
    AmplitudeRecoveryMethod, "amplitude recovery method" {
        None = 1,
        SphericalDivergence = 2,
        Agc = 3,
        Other = 4,
    }
);

segy_codes!(
    MeasurementSystem, "measurement system" {
        Meters = 1,
        Feet = 2,
    }
);

segy_codes!(
    /// Polarity of an impulsive source: whether an increase in pressure or
    /// upward geophone motion gives a negative or a positive number.
    ImpulsePolarity, "impulse signal polarity" {
        Negative = 1,
        Positive = 2,
    }
);

segy_codes!(
    /// Lag of the pilot signal behind the vibrator signal, in 45 degree
    /// windows centred on 0, 45, ... 315 degrees.
    VibratoryPolarity, "vibratory polarity" {
        Degrees0 = 1,
        Degrees45 = 2,
        Degrees90 = 3,
        Degrees135 = 4,
        Degrees180 = 5,
        Degrees225 = 6,
        Degrees270 = 7,
        Degrees315 = 8,
    }
);

segy_codes!(
    TimeBasis, "time basis" {
        Local = 1,
        Gmt = 2,
        Other = 3,
        Utc = 4,
        Gps = 5,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn codes() -> Result<(), SeisError> {
        assert_eq!(DataFormat::from_code(5)?, DataFormat::IeeeFloat);
        assert_eq!(DataFormat::IbmFloat.code(), 1);
        assert_eq!(TraceSortingCode::from_code(-1)?, TraceSortingCode::Other);
        for &basis in TimeBasis::ALL {
            assert_eq!(TimeBasis::from_code(basis.code())?, basis);
        }
        let err = DataFormat::from_code(13).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(SweepType::from_code(0).is_err());
        Ok(())
    }

    #[test]
    fn supported_formats() {
        let supported: Vec<DataFormat> = DataFormat::ALL
            .iter()
            .cloned()
            .filter(|f| f.is_supported())
            .collect();
        assert_eq!(
            supported,
            vec![DataFormat::IbmFloat, DataFormat::IeeeFloat, DataFormat::IeeeDouble]
        );
        assert_eq!(DataFormat::IeeeDouble.bytes_per_sample(), 8);
    }
}
