#![forbid(unsafe_code)]

//! Display-width measurement for prompts, titles, and labels.
//!
//! Widths are terminal cells, not bytes: wide CJK glyphs count two and
//! combining marks count zero. Truncation never splits a grapheme cluster.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a single-line string.
#[inline]
#[must_use]
pub fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Width of the widest line in a multi-line string.
#[must_use]
pub fn str_width(s: &str) -> usize {
    s.split('\n').map(width).max().unwrap_or(0)
}

/// Number of lines in a multi-line string.
///
/// A trailing partial line counts; a trailing newline does not open a new
/// line. The empty string has depth zero.
#[must_use]
pub fn str_depth(s: &str) -> usize {
    let newlines = count_newlines(s.as_bytes());
    if s.is_empty() || s.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Longest prefix of `s` that fits in `max` cells.
#[must_use]
pub fn truncate(s: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in s.grapheme_indices(true) {
        let w = width(grapheme);
        if used + w > max {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Suffix of `s` starting `skip` cells in.
///
/// A wide glyph straddling the cut is dropped entirely.
#[must_use]
pub fn skip(s: &str, skip: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in s.grapheme_indices(true) {
        if used >= skip {
            return &s[idx..];
        }
        used += width(grapheme);
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_of_longest_line() {
        assert_eq!(str_width("ab\nabcd\nx"), 4);
        assert_eq!(str_width(""), 0);
        assert_eq!(str_width("日本"), 4);
    }

    #[test]
    fn depth_counts_partial_lines() {
        assert_eq!(str_depth(""), 0);
        assert_eq!(str_depth("one"), 1);
        assert_eq!(str_depth("one\n"), 1);
        assert_eq!(str_depth("one\ntwo"), 2);
        assert_eq!(str_depth("one\ntwo\n"), 2);
        assert_eq!(str_depth("\n\n"), 2);
    }

    #[test]
    fn truncate_respects_wide_glyphs() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("日本語", 3), "日");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn skip_drops_straddling_glyph() {
        assert_eq!(skip("hello", 2), "llo");
        assert_eq!(skip("hello", 9), "");
        assert_eq!(skip("日本語", 1), "本語");
        assert_eq!(skip("日本語", 2), "本語");
    }
}
