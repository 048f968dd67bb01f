use std::fmt;

use crate::segy::binary_file_header::BINARY_HEADER_SIZE;
use crate::segy::ebcdic;
use crate::SeisError;

pub const TEXTUAL_HEADER_SIZE: usize = 3200;
pub const CARD_WIDTH: usize = 80;
pub const CARD_COUNT: usize = 40;

/// The 3200 byte textual file header, held as ASCII (Latin-1) and stored on
/// disk as EBCDIC. Always fully populated; unused columns are spaces.
#[derive(Clone, PartialEq, Eq)]
pub struct TextualHeader {
    text: [u8; TEXTUAL_HEADER_SIZE],
}

impl TextualHeader {
    /// A header of 3200 spaces.
    pub fn new() -> TextualHeader {
        TextualHeader {
            text: [b' '; TEXTUAL_HEADER_SIZE],
        }
    }

    /// Translates the textual header at the start of a SEG-Y file. The
    /// buffer must also hold the binary header that follows, 3600 bytes in
    /// all.
    pub fn read(bytes: &[u8]) -> Result<TextualHeader, SeisError> {
        let required = TEXTUAL_HEADER_SIZE + BINARY_HEADER_SIZE;
        if bytes.len() < required {
            return Err(SeisError::InvalidArgument(format!(
                "SEG-Y file header needs {} bytes, got {}",
                required,
                bytes.len()
            )));
        }
        TextualHeader::from_ebcdic(&bytes[..TEXTUAL_HEADER_SIZE])
    }

    /// Translates exactly the first 3200 EBCDIC bytes of `ebcdic`.
    pub fn from_ebcdic(ebcdic: &[u8]) -> Result<TextualHeader, SeisError> {
        if ebcdic.len() < TEXTUAL_HEADER_SIZE {
            return Err(SeisError::InsufficientBytes(ebcdic.len(), TEXTUAL_HEADER_SIZE));
        }
        let mut header = TextualHeader::new();
        header
            .text
            .copy_from_slice(&ebcdic::to_ascii(&ebcdic[..TEXTUAL_HEADER_SIZE]));
        Ok(header)
    }

    pub fn to_ebcdic(&self) -> Vec<u8> {
        ebcdic::to_ebcdic(&self.text)
    }

    /// Replaces the text, truncating past 3200 characters and padding with
    /// spaces. Characters outside Latin-1 become `?`.
    pub fn set_text(&mut self, text: &str) {
        self.text = [b' '; TEXTUAL_HEADER_SIZE];
        for (slot, c) in self.text.iter_mut().zip(text.chars()) {
            *slot = u8::try_from(c).unwrap_or(b'?');
        }
    }

    pub fn set_bytes(&mut self, ascii: &[u8]) {
        self.text = [b' '; TEXTUAL_HEADER_SIZE];
        let n = ascii.len().min(TEXTUAL_HEADER_SIZE);
        self.text[..n].copy_from_slice(&ascii[..n]);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// The header as text, one char per byte.
    pub fn text(&self) -> String {
        self.text.iter().map(|&b| b as char).collect()
    }

    /// The 40 card images of 80 columns each.
    pub fn lines(&self) -> Vec<String> {
        self.text
            .chunks(CARD_WIDTH)
            .map(|card| card.iter().map(|&b| b as char).collect())
            .collect()
    }
}

impl Default for TextualHeader {
    fn default() -> Self {
        TextualHeader::new()
    }
}

impl fmt::Debug for TextualHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TextualHeader")
            .field("first_card", &self.lines().first().map(|l| l.trim_end().to_string()))
            .finish()
    }
}
