#![forbid(unsafe_code)]

//! In-band control codes of a rendered page.
//!
//! A rendered line is UTF-8 text interleaved with three kinds of code:
//!
//! | Code | Bytes | Meaning |
//! |------|-------|---------|
//! | font | `0x01 c` | change font (`I`/`i` italic, `B`/`b` bold, `F`/`P` fixed) |
//! | indent | `0x10 n` | leading indent of `n - 32` cells, first on every line |
//! | tag | `0xFE c payload 0xFE` | label `L`, hyperlink start `A`, hyperlink end `a` |
//!
//! A doubled code byte stands for itself. `0xFE` never occurs in UTF-8, so
//! text runs between codes are always valid strings.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

/// Font code introducer.
pub const FONT: u8 = 0x01;
/// Indent code introducer.
pub const INDENT: u8 = 0x10;
/// Tag code introducer and terminator.
pub const TAG: u8 = 0xFE;

/// Bias added to an indent length.
pub const INDENT_BIAS: u8 = b' ';
/// Largest encodable indent.
pub const MAX_INDENT: usize = 96;

/// Tag code for a named label.
pub const LABEL: u8 = b'L';
/// Tag code opening hyperlink `n`.
pub const SET_ANCHOR: u8 = b'A';
/// Tag code closing hyperlink `n`.
pub const CLEAR_ANCHOR: u8 = b'a';

/// A font change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    SetItalic,
    ClearItalic,
    SetBold,
    ClearBold,
    SetFixed,
    ClearFixed,
}

impl Font {
    /// Byte following [`FONT`].
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::SetItalic => b'I',
            Self::ClearItalic => b'i',
            Self::SetBold => b'B',
            Self::ClearBold => b'b',
            Self::SetFixed => b'F',
            Self::ClearFixed => b'P',
        }
    }

    /// Inverse of [`Font::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            b'I' => Self::SetItalic,
            b'i' => Self::ClearItalic,
            b'B' => Self::SetBold,
            b'b' => Self::ClearBold,
            b'F' => Self::SetFixed,
            b'P' => Self::ClearFixed,
            _ => return None,
        })
    }
}

/// One decoded piece of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text.
    Text(Cow<'a, str>),
    /// Font change.
    Font(Font),
    /// Named position in the document.
    Label(Cow<'a, str>),
    /// Following text belongs to hyperlink `n`.
    Anchor(usize),
    /// Following text belongs to no hyperlink.
    EndAnchor,
}

/// A rendered line split into its indent and its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    indent: usize,
    body: &'a [u8],
}

impl<'a> Line<'a> {
    /// Decode the leading indent code, if any.
    #[must_use]
    pub fn new(raw: &'a [u8]) -> Self {
        match raw {
            [INDENT, n, rest @ ..] if *n != INDENT => Self {
                indent: usize::from(n.saturating_sub(INDENT_BIAS)).min(MAX_INDENT),
                body: rest,
            },
            _ => Self {
                indent: 0,
                body: raw,
            },
        }
    }

    /// Leading blank cells.
    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    /// Bytes after the indent code.
    #[must_use]
    pub const fn body(&self) -> &'a [u8] {
        self.body
    }

    /// Decode the body.
    #[must_use]
    pub fn segments(&self) -> Segments<'a> {
        Segments { rest: self.body }
    }

    /// Text of the line with every code removed and the indent expanded.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = " ".repeat(self.indent);
        for segment in self.segments() {
            if let Segment::Text(text) = segment {
                out.push_str(&text);
            }
        }
        out
    }
}

/// Iterator over the [`Segment`]s of a line body.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        loop {
            let rest = self.rest;
            let (&first, tail) = rest.split_first()?;
            match first {
                FONT | INDENT => {
                    let Some((&code, after)) = tail.split_first() else {
                        self.rest = &[];
                        return None;
                    };
                    self.rest = after;
                    if code == first {
                        let literal = if first == FONT { "\u{1}" } else { "\u{10}" };
                        return Some(Segment::Text(Cow::Borrowed(literal)));
                    }
                    if first == FONT {
                        if let Some(font) = Font::from_code(code) {
                            return Some(Segment::Font(font));
                        }
                    }
                    // Stray indent codes mid-line carry no meaning.
                }
                TAG => {
                    let Some((&code, after)) = tail.split_first() else {
                        self.rest = &[];
                        return None;
                    };
                    if code == TAG {
                        self.rest = after;
                        return Some(Segment::Text(Cow::Borrowed("\u{FFFD}")));
                    }
                    let end = memchr(TAG, after).unwrap_or(after.len());
                    let payload = &after[..end];
                    self.rest = after.get(end + 1..).unwrap_or(&[]);
                    match code {
                        LABEL => return Some(Segment::Label(String::from_utf8_lossy(payload))),
                        SET_ANCHOR => {
                            if let Some(id) = parse_number(payload) {
                                return Some(Segment::Anchor(id));
                            }
                        }
                        CLEAR_ANCHOR => return Some(Segment::EndAnchor),
                        _ => {}
                    }
                }
                _ => {
                    let end = memchr3(FONT, INDENT, TAG, rest).unwrap_or(rest.len());
                    self.rest = &rest[end..];
                    return Some(Segment::Text(String::from_utf8_lossy(&rest[..end])));
                }
            }
        }
    }
}

fn parse_number(bytes: &[u8]) -> Option<usize> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// Append `text` to `out`, doubling any byte that would read as a code.
pub fn push_escaped(out: &mut Vec<u8>, text: &str) {
    for &b in text.as_bytes() {
        match b {
            b'\n' => {}
            FONT | INDENT | TAG => {
                out.push(b);
                out.push(b);
            }
            _ => out.push(b),
        }
    }
}

/// Append a font code.
pub fn push_font(out: &mut Vec<u8>, font: Font) {
    out.push(FONT);
    out.push(font.code());
}

/// Append a tag code with its payload.
pub fn push_tag(out: &mut Vec<u8>, code: u8, payload: &str) {
    out.push(TAG);
    out.push(code);
    out.extend(payload.bytes().filter(|&b| b != TAG));
    out.push(TAG);
}

/// Encode an indent byte.
#[must_use]
pub fn indent_byte(indent: usize) -> u8 {
    // MAX_INDENT + INDENT_BIAS fits in a byte.
    (indent.min(MAX_INDENT) as u8) + INDENT_BIAS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &[u8]) -> (usize, Vec<Segment<'_>>) {
        let line = Line::new(raw);
        (line.indent(), line.segments().collect())
    }

    #[test]
    fn font_codes_round_trip() {
        for font in [
            Font::SetItalic,
            Font::ClearItalic,
            Font::SetBold,
            Font::ClearBold,
            Font::SetFixed,
            Font::ClearFixed,
        ] {
            assert_eq!(Font::from_code(font.code()), Some(font));
        }
        assert_eq!(Font::from_code(b'z'), None);
    }

    #[test]
    fn indent_is_decoded_and_stripped() {
        let (indent, segs) = decode(b"\x10$hello");
        assert_eq!(indent, 4);
        assert_eq!(segs, vec![Segment::Text("hello".into())]);
    }

    #[test]
    fn line_without_indent() {
        let (indent, segs) = decode(b"plain");
        assert_eq!(indent, 0);
        assert_eq!(segs, vec![Segment::Text("plain".into())]);
    }

    #[test]
    fn mixed_codes() {
        let mut raw = vec![INDENT, b' '];
        push_font(&mut raw, Font::SetBold);
        raw.extend_from_slice(b"see ");
        push_tag(&mut raw, SET_ANCHOR, "3");
        raw.extend_from_slice(b"here");
        push_tag(&mut raw, CLEAR_ANCHOR, "3");
        push_tag(&mut raw, LABEL, "top");

        let (indent, segs) = decode(&raw);
        assert_eq!(indent, 0);
        assert_eq!(
            segs,
            vec![
                Segment::Font(Font::SetBold),
                Segment::Text("see ".into()),
                Segment::Anchor(3),
                Segment::Text("here".into()),
                Segment::EndAnchor,
                Segment::Label("top".into()),
            ]
        );
    }

    #[test]
    fn doubled_codes_are_literal() {
        let mut raw = Vec::new();
        push_escaped(&mut raw, "a\u{1}b\u{10}c");
        let text = Line::new(&raw).plain_text();
        assert_eq!(text, "a\u{1}b\u{10}c");
    }

    #[test]
    fn escaping_drops_newlines() {
        let mut raw = Vec::new();
        push_escaped(&mut raw, "a\nb");
        assert_eq!(raw, b"ab");
    }

    #[test]
    fn truncated_codes_end_the_line() {
        assert_eq!(decode(b"ab\x01").1, vec![Segment::Text("ab".into())]);
        assert_eq!(decode(b"ab\xFE").1, vec![Segment::Text("ab".into())]);
    }

    #[test]
    fn unterminated_tag_consumes_rest() {
        let (_, segs) = decode(b"x\xFELname");
        assert_eq!(
            segs,
            vec![Segment::Text("x".into()), Segment::Label("name".into())]
        );
    }

    #[test]
    fn plain_text_expands_indent() {
        let raw = [INDENT, indent_byte(2), b'h', b'i'];
        assert_eq!(Line::new(&raw).plain_text(), "  hi");
    }

    #[test]
    fn indent_byte_is_capped() {
        assert_eq!(indent_byte(500), 96 + 32);
        assert_eq!(indent_byte(0), b' ');
    }
}
