//! ESC/POS byte encoding for receipt command sequences.
//!
//! Wire format produced by [`encode`]:
//!
//! ```text
//! ESC @            initialise printer
//! ESC t 2          select code page 850 (multilingual Latin-1)
//! <commands...>    one byte group per ReceiptCommand
//! ```
//!
//! Text is transcoded to code page 850 so Portuguese accents print
//! correctly. Characters with no CP850 glyph, and control characters that
//! would otherwise be interpreted as printer commands, become `?`.

use crate::receipt::{Align, Font, ReceiptCommand, Style};

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;
const LF: u8 = 0x0A;

/// Code page 850 selector for `ESC t`.
const CODE_PAGE_850: u8 = 2;

/// Byte written in place of characters the code page cannot represent.
const REPLACEMENT: u8 = b'?';

/// Returns the printer initialisation sequence (`ESC @`).
#[must_use]
pub const fn init() -> [u8; 2] {
    [ESC, b'@']
}

/// Returns the code page selection sequence for CP850 (`ESC t 2`).
#[must_use]
pub const fn select_code_page() -> [u8; 3] {
    [ESC, b't', CODE_PAGE_850]
}

/// Returns the feed-and-partial-cut sequence (`GS V 66 0`).
#[must_use]
pub const fn cut() -> [u8; 4] {
    [GS, b'V', 66, 0]
}

/// Returns the bytes that switch the printer to `style`.
///
/// Every attribute is emitted explicitly so a style never inherits state
/// from whatever was printed before it.
#[must_use]
pub fn style(style: &Style) -> Vec<u8> {
    let align = match style.align {
        Align::Left => 0,
        Align::Center => 1,
    };
    let font = match style.font {
        Font::A => 0,
        Font::B => 1,
    };
    let size = u8::from(style.double_height);
    vec![
        ESC,
        b'a',
        align,
        ESC,
        b'E',
        u8::from(style.bold),
        ESC,
        b'M',
        font,
        GS,
        b'!',
        size,
    ]
}

/// Transcodes a text line to CP850 bytes followed by a line feed.
#[must_use]
pub fn line(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 1);
    out.extend(text.chars().map(to_cp850));
    out.push(LF);
    out
}

/// Encodes a full receipt into the byte stream sent to the printer.
#[must_use]
pub fn encode(commands: &[ReceiptCommand]) -> Vec<u8> {
    let mut out = Vec::with_capacity(64 + commands.len() * 32);
    out.extend_from_slice(&init());
    out.extend_from_slice(&select_code_page());
    for command in commands {
        match command {
            ReceiptCommand::SetStyle(s) => out.extend(style(s)),
            ReceiptCommand::Line(text) => out.extend(line(text)),
            ReceiptCommand::Cut => out.extend_from_slice(&cut()),
        }
    }
    out
}

/// Maps a single character to its CP850 byte.
#[must_use]
pub fn to_cp850(c: char) -> u8 {
    if c.is_ascii() {
        return if c.is_ascii_control() {
            REPLACEMENT
        } else {
            // ASCII range is identical in CP850.
            u8::try_from(c).unwrap_or(REPLACEMENT)
        };
    }
    match c {
        'Ç' => 0x80,
        'ü' => 0x81,
        'é' => 0x82,
        'â' => 0x83,
        'ä' => 0x84,
        'à' => 0x85,
        'å' => 0x86,
        'ç' => 0x87,
        'ê' => 0x88,
        'ë' => 0x89,
        'è' => 0x8A,
        'ï' => 0x8B,
        'î' => 0x8C,
        'ì' => 0x8D,
        'Ä' => 0x8E,
        'Å' => 0x8F,
        'É' => 0x90,
        'æ' => 0x91,
        'Æ' => 0x92,
        'ô' => 0x93,
        'ö' => 0x94,
        'ò' => 0x95,
        'û' => 0x96,
        'ù' => 0x97,
        'ÿ' => 0x98,
        'Ö' => 0x99,
        'Ü' => 0x9A,
        'ø' => 0x9B,
        '£' => 0x9C,
        'Ø' => 0x9D,
        '×' => 0x9E,
        'á' => 0xA0,
        'í' => 0xA1,
        'ó' => 0xA2,
        'ú' => 0xA3,
        'ñ' => 0xA4,
        'Ñ' => 0xA5,
        'ª' => 0xA6,
        'º' => 0xA7,
        '¿' => 0xA8,
        '¡' => 0xAD,
        '«' => 0xAE,
        '»' => 0xAF,
        'Á' => 0xB5,
        'Â' => 0xB6,
        'À' => 0xB7,
        'ã' => 0xC6,
        'Ã' => 0xC7,
        'Ê' => 0xD2,
        'Ë' => 0xD3,
        'È' => 0xD4,
        'Í' => 0xD6,
        'Î' => 0xD7,
        'Ï' => 0xD8,
        'Ì' => 0xDE,
        'Ó' => 0xE0,
        'ß' => 0xE1,
        'Ô' => 0xE2,
        'Ò' => 0xE3,
        'õ' => 0xE4,
        'Õ' => 0xE5,
        'Ú' => 0xE9,
        'Û' => 0xEA,
        'Ù' => 0xEB,
        '°' => 0xF8,
        _ => REPLACEMENT,
    }
}
