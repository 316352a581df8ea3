#![forbid(unsafe_code)]

//! A rendered document.

use std::io;

use memchr::memchr_iter;

use crate::bytecode::{self, Line, Segment};

/// Title assigned to the page shown when a document cannot be read.
pub const NOT_FOUND_TITLE: &str = "File Not Found";

/// A rendered document: coded lines, title, and hyperlink targets.
///
/// Lines are indexed once at construction; line `i` never includes its
/// terminating newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    title: String,
    body: Vec<u8>,
    hrefs: Vec<String>,
    starts: Vec<usize>,
}

impl Page {
    /// Wrap a rendered body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: Vec<u8>, hrefs: Vec<String>) -> Self {
        let starts = index_lines(&body);
        Self {
            title: title.into(),
            body,
            hrefs,
            starts,
        }
    }

    /// The page shown in place of a document that could not be opened.
    #[must_use]
    pub fn not_found(filename: &str, err: &io::Error) -> Self {
        let mut body = vec![bytecode::INDENT, bytecode::INDENT_BIAS];
        bytecode::push_escaped(&mut body, &format!("{filename}: {err}"));
        body.push(b'\n');
        Self::new(NOT_FOUND_TITLE, body, Vec::new())
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Every hyperlink target, indexed by hyperlink id.
    #[must_use]
    pub fn hrefs(&self) -> &[String] {
        &self.hrefs
    }

    /// Target of hyperlink `id`.
    #[must_use]
    pub fn href(&self, id: usize) -> Option<&str> {
        self.hrefs.get(id).map(String::as_str)
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Raw bytes of line `index`.
    #[must_use]
    pub fn raw_line(&self, index: usize) -> Option<&[u8]> {
        let start = *self.starts.get(index)?;
        let end = self
            .starts
            .get(index + 1)
            .map_or(self.body.len(), |next| next - 1);
        let end = if end > start && self.body[end - 1] == b'\n' {
            end - 1
        } else {
            end
        };
        self.body.get(start..end)
    }

    /// Decoded line `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<Line<'_>> {
        self.raw_line(index).map(Line::new)
    }

    /// Iterate decoded lines.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        (0..self.line_count()).filter_map(|i| self.line(i))
    }

    /// Display width of the widest line, indent included.
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines()
            .map(|line| ndialog_core::measure::width(&line.plain_text()))
            .max()
            .unwrap_or(0)
    }

    /// Line holding the label `name`.
    #[must_use]
    pub fn find_label(&self, name: &str) -> Option<usize> {
        self.lines().position(|line| {
            line.segments()
                .any(|seg| matches!(seg, Segment::Label(label) if label == name))
        })
    }

    /// Text of every line with codes removed.
    #[must_use]
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines().map(|line| line.plain_text()).collect()
    }
}

fn index_lines(body: &[u8]) -> Vec<usize> {
    if body.is_empty() {
        return Vec::new();
    }
    let mut starts = vec![0];
    starts.extend(memchr_iter(b'\n', body).map(|nl| nl + 1));
    // A trailing newline does not open another line.
    if starts.last() == Some(&body.len()) {
        starts.pop();
    }
    starts
}
