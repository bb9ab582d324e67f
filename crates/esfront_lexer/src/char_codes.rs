//! Character classification used by the lexer.

use unicode_xid::UnicodeXID;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const ZWNJ: char = '\u{200C}';
pub const ZWJ: char = '\u{200D}';

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Check if a character is whitespace (not line break).
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200A}' // various spaces
            | '\u{202F}' // narrow no-break space
            | '\u{205F}' // medium mathematical space
            | '\u{3000}' // ideographic space
            | '\u{FEFF}' // BOM / zero-width no-break space
    )
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '$' || ch == '_'
    } else {
        ch.is_xid_start()
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '$' || ch == '_'
    } else {
        ch.is_xid_continue() || ch == ZWNJ || ch == ZWJ
    }
}

/// Check if a character is an octal digit (0-7).
#[inline]
pub fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

/// Whether `text` contains any line terminator.
pub fn contains_line_break(text: &str) -> bool {
    text.contains(['\n', '\r', LINE_SEPARATOR, PARAGRAPH_SEPARATOR])
}
