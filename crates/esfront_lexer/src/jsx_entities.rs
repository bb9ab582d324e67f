//! HTML character references in JSX text and attribute strings.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Longest entity name we try to match, `&` and `;` excluded.
const MAX_ENTITY_LEN: usize = 10;

static ENTITIES: Lazy<FxHashMap<&'static str, char>> = Lazy::new(|| {
    [
        ("quot", '\u{0022}'),
        ("amp", '\u{0026}'),
        ("apos", '\u{0027}'),
        ("lt", '\u{003C}'),
        ("gt", '\u{003E}'),
        ("nbsp", '\u{00A0}'),
        ("iexcl", '\u{00A1}'),
        ("cent", '\u{00A2}'),
        ("pound", '\u{00A3}'),
        ("curren", '\u{00A4}'),
        ("yen", '\u{00A5}'),
        ("brvbar", '\u{00A6}'),
        ("sect", '\u{00A7}'),
        ("uml", '\u{00A8}'),
        ("copy", '\u{00A9}'),
        ("ordf", '\u{00AA}'),
        ("laquo", '\u{00AB}'),
        ("not", '\u{00AC}'),
        ("shy", '\u{00AD}'),
        ("reg", '\u{00AE}'),
        ("macr", '\u{00AF}'),
        ("deg", '\u{00B0}'),
        ("plusmn", '\u{00B1}'),
        ("sup2", '\u{00B2}'),
        ("sup3", '\u{00B3}'),
        ("acute", '\u{00B4}'),
        ("micro", '\u{00B5}'),
        ("para", '\u{00B6}'),
        ("middot", '\u{00B7}'),
        ("raquo", '\u{00BB}'),
        ("frac12", '\u{00BD}'),
        ("times", '\u{00D7}'),
        ("divide", '\u{00F7}'),
        ("ndash", '\u{2013}'),
        ("mdash", '\u{2014}'),
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ldquo", '\u{201C}'),
        ("rdquo", '\u{201D}'),
        ("bull", '\u{2022}'),
        ("hellip", '\u{2026}'),
        ("prime", '\u{2032}'),
        ("euro", '\u{20AC}'),
        ("trade", '\u{2122}'),
        ("larr", '\u{2190}'),
        ("uarr", '\u{2191}'),
        ("rarr", '\u{2192}'),
        ("darr", '\u{2193}'),
        ("hearts", '\u{2665}'),
    ]
    .into_iter()
    .collect()
});

/// Resolve one entity body (the text between `&` and `;`).
fn resolve(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    ENTITIES.get(body).copied()
}

/// Decode the character references in `text`. Unknown or malformed
/// references are kept as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    let Some(first) = memchr::memchr(b'&', text.as_bytes()) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut rest = &text[first..];
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let window = &rest.as_bytes()[1..rest.len().min(MAX_ENTITY_LEN + 2)];
        let decoded = memchr::memchr(b';', window).and_then(|semi| {
            let body = &rest[1..1 + semi];
            resolve(body).map(|ch| (ch, semi + 2))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
