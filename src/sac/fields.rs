//! Closed sets of SAC header fields, listed in on-disk order.
//!
//! The ordinal of each variant is its slot in the header. Doubles occupy
//! words 0-69, integers words 70-104, logicals words 105-109 and the
//! character fields start at byte 440.

use std::fmt;

macro_rules! header_fields {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every field in on-disk order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const COUNT: usize = $name::ALL.len();

            /// The field name as written in SAC documentation.
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Slot of this field within its block.
            pub fn index(&self) -> usize {
                *self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

header_fields!(
    /// Floating point header words, stored as 4 byte floats.
    Double {
        DELTA, DEPMIN, DEPMAX, SCALE, ODELTA, B, E, O, A, INTERNAL1,
        T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, F,
        RESP0, RESP1, RESP2, RESP3, RESP4, RESP5, RESP6, RESP7, RESP8, RESP9,
        STLA, STLO, STEL, STDP, EVLA, EVLO, EVEL, EVDP, MAG,
        USER0, USER1, USER2, USER3, USER4, USER5, USER6, USER7, USER8, USER9,
        DIST, AZ, BAZ, GCARC, INTERNAL2, INTERNAL3, DEPMEN, CMPAZ, CMPINC,
        XMINIMUM, XMAXIMUM, YMINIMUM, YMAXIMUM,
        UNUSED0, UNUSED1, UNUSED2, UNUSED3, UNUSED4, UNUSED5, UNUSED6,
    }
);

header_fields!(
    /// Integer and enumerated header words.
    Integer {
        NZYEAR, NZJDAY, NZHOUR, NZMIN, NZSEC, NZMSEC, NVHDR, NORID, NEVID, NPTS,
        INTERNAL1, NWFID, NXSIZE, NYSIZE, UNUSED0,
        IFTYPE, IDEP, IZTYPE, UNUSED1, IINST, ISTREG, IEVREG, IEVTYP, IQUAL, ISYNTH,
        IMAGTYP, IMAGSRC, UNUSED2, UNUSED3, UNUSED4, UNUSED5, UNUSED6, UNUSED7,
        UNUSED8, UNUSED9,
    }
);

header_fields!(
    /// Tri-state logical words: true, false or never set.
    Logical {
        LEVEN, LPSPOL, LOVROK, LCALDA, UNUSED,
    }
);

header_fields!(
    /// Fixed width text fields.
    Character {
        KSTNM, KEVNM, KHOLE, KO, KA,
        KT0, KT1, KT2, KT3, KT4, KT5, KT6, KT7, KT8, KT9,
        KF, KUSER0, KUSER1, KUSER2, KCMPNM, KNETWK, KDATRD, KINST,
    }
);

/// Byte offset of the first integer word.
pub const INTEGER_OFFSET: usize = 4 * Double::COUNT;
/// Byte offset of the first logical word.
pub const LOGICAL_OFFSET: usize = INTEGER_OFFSET + 4 * Integer::COUNT;
/// Byte offset of the first character field.
pub const CHARACTER_OFFSET: usize = LOGICAL_OFFSET + 4 * Logical::COUNT;

impl Double {
    pub fn offset(&self) -> usize {
        4 * self.index()
    }
}

impl Integer {
    pub fn offset(&self) -> usize {
        INTEGER_OFFSET + 4 * self.index()
    }
}

impl Logical {
    pub fn offset(&self) -> usize {
        LOGICAL_OFFSET + 4 * self.index()
    }
}

impl Character {
    /// Width in bytes; the event name is the only 16 byte field.
    pub fn width(&self) -> usize {
        match self {
            Character::KEVNM => 16,
            _ => 8,
        }
    }

    pub fn offset(&self) -> usize {
        let widened = if *self > Character::KEVNM { 8 } else { 0 };
        CHARACTER_OFFSET + 8 * self.index() + widened
    }
}
