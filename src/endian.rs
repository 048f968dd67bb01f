use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Byte order of the multi-byte words in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Byte order of the machine this runs on.
    pub fn native() -> Endian {
        if cfg!(target_endian = "little") {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(buf),
            Endian::Big => BigEndian::read_u16(buf),
        }
    }

    pub fn read_i16(self, buf: &[u8]) -> i16 {
        match self {
            Endian::Little => LittleEndian::read_i16(buf),
            Endian::Big => BigEndian::read_i16(buf),
        }
    }

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endian::Little => LittleEndian::read_i32(buf),
            Endian::Big => BigEndian::read_i32(buf),
        }
    }

    pub fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            Endian::Little => LittleEndian::read_u64(buf),
            Endian::Big => BigEndian::read_u64(buf),
        }
    }

    pub fn read_f32(self, buf: &[u8]) -> f32 {
        match self {
            Endian::Little => LittleEndian::read_f32(buf),
            Endian::Big => BigEndian::read_f32(buf),
        }
    }

    pub fn read_f64(self, buf: &[u8]) -> f64 {
        match self {
            Endian::Little => LittleEndian::read_f64(buf),
            Endian::Big => BigEndian::read_f64(buf),
        }
    }

    pub fn write_u16<W: Write>(self, out: &mut W, v: u16) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_u16::<LittleEndian>(v),
            Endian::Big => out.write_u16::<BigEndian>(v),
        }
    }

    pub fn write_i16<W: Write>(self, out: &mut W, v: i16) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_i16::<LittleEndian>(v),
            Endian::Big => out.write_i16::<BigEndian>(v),
        }
    }

    pub fn write_u32<W: Write>(self, out: &mut W, v: u32) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_u32::<LittleEndian>(v),
            Endian::Big => out.write_u32::<BigEndian>(v),
        }
    }

    pub fn write_i32<W: Write>(self, out: &mut W, v: i32) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_i32::<LittleEndian>(v),
            Endian::Big => out.write_i32::<BigEndian>(v),
        }
    }

    pub fn write_u64<W: Write>(self, out: &mut W, v: u64) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_u64::<LittleEndian>(v),
            Endian::Big => out.write_u64::<BigEndian>(v),
        }
    }

    pub fn write_f32<W: Write>(self, out: &mut W, v: f32) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_f32::<LittleEndian>(v),
            Endian::Big => out.write_f32::<BigEndian>(v),
        }
    }

    pub fn write_f64<W: Write>(self, out: &mut W, v: f64) -> std::io::Result<()> {
        match self {
            Endian::Little => out.write_f64::<LittleEndian>(v),
            Endian::Big => out.write_f64::<BigEndian>(v),
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endian::Little => write!(f, "little endian"),
            Endian::Big => write!(f, "big endian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() -> std::io::Result<()> {
        for endian in [Endian::Little, Endian::Big] {
            let mut buf = Vec::new();
            endian.write_i32(&mut buf, -12345)?;
            endian.write_u16(&mut buf, 0xBEEF)?;
            endian.write_f32(&mut buf, 0.25)?;
            assert_eq!(endian.read_i32(&buf[0..4]), -12345);
            assert_eq!(endian.read_u16(&buf[4..6]), 0xBEEF);
            assert_eq!(endian.read_f32(&buf[6..10]), 0.25);
        }
        let mut buf = Vec::new();
        Endian::Big.write_u32(&mut buf, 0x01020304)?;
        assert_eq!(buf, vec![1, 2, 3, 4]);
        Ok(())
    }
}
