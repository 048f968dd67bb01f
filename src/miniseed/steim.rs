//! Steim-1 and Steim-2 decompression.
//!
//! Steim compression scheme Copyrighted by Dr. Joseph Steim.
//! Reference material found in Appendix B of the SEED Reference Manual.
//!
//! Data is a sequence of 64 byte frames of sixteen big endian words. Word 0 of
//! each frame holds sixteen 2-bit nibbles describing how the other words are
//! packed. Words 1 and 2 of the first frame are the forward and reverse
//! integration constants X(0) and X(N).

use log::warn;

use crate::miniseed::data_encoding::DataEncoding;
use crate::{Endian, SeisError};

const FRAME_SIZE: usize = 64;
const WORDS_PER_FRAME: usize = 16;

/// Most samples `data_length` bytes of Steim frames can hold. Each frame has
/// fifteen data words of at most four (Steim-1) or seven (Steim-2)
/// differences.
pub(crate) fn max_samples(data_length: usize, encoding: DataEncoding) -> usize {
    let per_word = if encoding == DataEncoding::STEIM1 { 4 } else { 7 };
    data_length / FRAME_SIZE * (WORDS_PER_FRAME - 1) * per_word
}

/// Decodes `num_samples` Steim-1 samples.
pub fn decode_steim1(
    bytes: &[u8],
    num_samples: usize,
    endian: Endian,
) -> Result<Vec<i32>, SeisError> {
    decode(bytes, num_samples, endian, DataEncoding::STEIM1)
}

/// Decodes `num_samples` Steim-2 samples.
pub fn decode_steim2(
    bytes: &[u8],
    num_samples: usize,
    endian: Endian,
) -> Result<Vec<i32>, SeisError> {
    decode(bytes, num_samples, endian, DataEncoding::STEIM2)
}

fn decode(
    bytes: &[u8],
    num_samples: usize,
    endian: Endian,
    encoding: DataEncoding,
) -> Result<Vec<i32>, SeisError> {
    if num_samples == 0 {
        return Ok(Vec::new());
    }
    let num_frames = bytes.len() / FRAME_SIZE;
    if num_frames == 0 {
        return Err(SeisError::Compression(format!(
            "{} bytes is less than one 64 byte frame",
            bytes.len()
        )));
    }
    let capacity = max_samples(bytes.len(), encoding);
    if num_samples > capacity {
        return Err(SeisError::TooManySamples(num_samples, bytes.len(), capacity));
    }
    let start = endian.read_i32(&bytes[4..8]);
    let end = endian.read_i32(&bytes[8..12]);

    let mut diffs = Vec::with_capacity(num_samples);
    for frame in 0..num_frames {
        if diffs.len() >= num_samples {
            break;
        }
        extract_differences(
            &bytes[frame * FRAME_SIZE..(frame + 1) * FRAME_SIZE],
            frame == 0,
            endian,
            encoding,
            &mut diffs,
        )?;
    }
    if diffs.len() < num_samples {
        return Err(SeisError::SampleCount(diffs.len(), num_samples));
    }

    // d(0) is relative to the previous record, X(0) already holds the first value
    let mut samples = Vec::with_capacity(num_samples);
    let mut last_value = start;
    samples.push(start);
    for d in &diffs[1..num_samples] {
        last_value = last_value.wrapping_add(*d);
        samples.push(last_value);
    }
    if last_value != end {
        warn!(
            "last decompressed sample {} does not match reverse integration constant {}",
            last_value, end
        );
    }
    Ok(samples)
}

/// Appends the differences packed in one frame.
fn extract_differences(
    frame: &[u8],
    first_frame: bool,
    endian: Endian,
    encoding: DataEncoding,
    diffs: &mut Vec<i32>,
) -> Result<(), SeisError> {
    let nibbles = endian.read_u32(&frame[0..4]);
    let first_word = if first_frame { 3 } else { 1 };
    for w in first_word..WORDS_PER_FRAME {
        let nibble = (nibbles >> (30 - 2 * w)) & 0x03;
        let word = &frame[w * 4..w * 4 + 4];
        let value = endian.read_u32(word);
        match (nibble, encoding) {
            (0, _) => {}
            (1, _) => diffs.extend(word.iter().map(|b| *b as i8 as i32)),
            (2, DataEncoding::STEIM1) => {
                diffs.push(endian.read_i16(&word[0..2]) as i32);
                diffs.push(endian.read_i16(&word[2..4]) as i32);
            }
            (3, DataEncoding::STEIM1) => diffs.push(value as i32),
            (2, _) => match value >> 30 {
                1 => diffs.push(sign_extend(value, 30)),
                2 => unpack(value, 15, 2, diffs),
                3 => unpack(value, 10, 3, diffs),
                dnib => {
                    return Err(SeisError::Compression(format!(
                        "invalid Steim-2 dnib {} for nibble 2 in word {}",
                        dnib, w
                    )))
                }
            },
            (_, _) => match value >> 30 {
                0 => unpack(value, 6, 5, diffs),
                1 => unpack(value, 5, 6, diffs),
                2 => unpack(value, 4, 7, diffs),
                dnib => {
                    return Err(SeisError::Compression(format!(
                        "invalid Steim-2 dnib {} for nibble 3 in word {}",
                        dnib, w
                    )))
                }
            },
        }
    }
    Ok(())
}

/// Pushes `count` signed `bits` wide values packed into the low 30 bits of
/// `value`, most significant first.
fn unpack(value: u32, bits: u32, count: u32, diffs: &mut Vec<i32>) {
    let mask = (1u32 << bits) - 1;
    for i in (0..count).rev() {
        diffs.push(sign_extend((value >> (i * bits)) & mask, bits));
    }
}

fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
