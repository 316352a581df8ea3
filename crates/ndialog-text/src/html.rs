#![forbid(unsafe_code)]

//! HTML to [`Page`] renderer.
//!
//! Help documents use a small subset of HTML: `<title>`, paragraphs,
//! `<br>`, headers, `<blockquote>`, definition lists, `<pre>`, `<hr>`,
//! `<center>`, bold/italic/teletype, anchors with `name=`/`href=`, `id=` on
//! block tags, `align=` on paragraphs and headers, comments, and the
//! `&lt; &gt; &amp; &emdash; &#N;` entities. Anything else is skipped.
//!
//! The renderer is a recursive descent over a token stream: each block tag
//! saves the current format, parses until its end tag, and restores the
//! format. Words are filled into lines of the current width and every
//! finished line gets an indent code that encodes its indentation and
//! alignment. Lines start with the hyperlink and font codes in force, so a
//! viewer can draw any line without looking at the ones before it.

use std::fs;
use std::path::Path;

use crate::bytecode::{self, Font};
use crate::page::Page;

/// Render an HTML document for a viewport `width` cells wide.
#[must_use]
pub fn render(source: &str, width: usize) -> Page {
    let mut renderer = Renderer::new(source, width);
    renderer.parse(None, 0, TagSet::ALL);
    renderer.finish()
}

/// Render the document at `path`, or a "File Not Found" page naming it.
#[must_use]
pub fn render_file(path: &Path, width: usize) -> Page {
    match fs::read(path) {
        Ok(bytes) => render(&String::from_utf8_lossy(&bytes), width),
        Err(err) => {
            ndialog_core::warn!(path = %path.display(), error = %err, "help document unreadable");
            Page::not_found(&path.display().to_string(), &err)
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Tokens
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Html,
    Head,
    Title,
    Body,
    Para,
    A,
    Name,
    Href,
    Break,
    Id,
    Bold,
    Ital,
    Tt,
    Pre,
    Comment,
    CommentEnd,
    Quote,
    Align,
    Center,
    Left,
    Right,
    Rule,
    Header,
    DefList,
    DefTerm,
    DefText,
    Width,
}

impl Tag {
    const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Tags that only exist in their opening form.
    const fn open_only(self) -> bool {
        matches!(
            self,
            Self::Comment
                | Self::CommentEnd
                | Self::Align
                | Self::Break
                | Self::Href
                | Self::Id
                | Self::Left
                | Self::Right
                | Self::Name
                | Self::Width
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TagSet(u32);

impl TagSet {
    const ALL: Self = Self(u32::MAX);
    const BODY: Self = Self(u32::MAX & !(Tag::Title.bit() | Tag::Html.bit() | Tag::Head.bit()));

    const fn of(tags: &[Tag]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < tags.len() {
            bits |= tags[i].bit();
            i += 1;
        }
        Self(bits)
    }

    const fn with(self, tag: Tag) -> Self {
        Self(self.0 | tag.bit())
    }

    const fn contains(self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok {
    Eof,
    Word,
    Space,
    Lt,
    Gt,
    Eq,
    Open(Tag),
    Close(Tag),
}

fn lookup(word: &str, header_level: &mut u8) -> Tok {
    let (close, name) = match word.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, word),
    };
    let lower = name.to_ascii_lowercase();
    let tag = match lower.as_str() {
        "!--" => Tag::Comment,
        "--" => Tag::CommentEnd,
        "a" => Tag::A,
        "align" => Tag::Align,
        "b" => Tag::Bold,
        "br" => Tag::Break,
        "body" => Tag::Body,
        "blockquote" => Tag::Quote,
        "center" => Tag::Center,
        "dl" => Tag::DefList,
        "dt" => Tag::DefTerm,
        "dd" => Tag::DefText,
        "hr" => Tag::Rule,
        "href" => Tag::Href,
        "html" => Tag::Html,
        "head" => Tag::Head,
        "i" => Tag::Ital,
        "id" => Tag::Id,
        "left" => Tag::Left,
        "name" => Tag::Name,
        "p" => Tag::Para,
        "pre" => Tag::Pre,
        "right" => Tag::Right,
        "tt" => Tag::Tt,
        "title" => Tag::Title,
        "width" => Tag::Width,
        _ => match lower.as_bytes() {
            [b'h', d] if d.is_ascii_digit() => {
                *header_level = d - b'0';
                Tag::Header
            }
            _ => return Tok::Word,
        },
    };
    match (close, tag.open_only()) {
        (true, true) => Tok::Word,
        (true, false) => Tok::Close(tag),
        (false, _) => Tok::Open(tag),
    }
}

fn entity(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "lt" => "<".into(),
        "gt" => ">".into(),
        "amp" => "&".into(),
        "quot" => "\"".into(),
        "nbsp" => " ".into(),
        "emdash" => "--".into(),
        _ => {
            if let Some(code) = name.strip_prefix('#') {
                if let Some(c) = code.parse::<u32>().ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            format!("&{name}")
        }
    }
}

/// Longest word kept; the rest of an overlong run is dropped.
const MAX_WORD: usize = 2000;
/// Longest entity name looked at.
const MAX_ENTITY: usize = 19;

#[derive(Debug)]
struct Scanner<'a> {
    src: std::iter::Peekable<std::str::Chars<'a>>,
    text: String,
    pushback: Option<Tok>,
    braces: usize,
    header_level: u8,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            src: source.chars().peekable(),
            text: String::new(),
            pushback: None,
            braces: 0,
            header_level: 0,
        }
    }

    /// Push back a token; only the last one pushed is kept.
    fn unscan(&mut self, tok: Tok) {
        self.pushback = Some(tok);
    }

    fn push(&mut self, c: char) {
        if self.text.len() < MAX_WORD {
            self.text.push(c);
        }
    }

    fn scan(&mut self) -> Tok {
        if let Some(tok) = self.pushback.take() {
            return tok;
        }
        self.text.clear();
        let mut escaped = false;

        while let Some(&c) = self.src.peek() {
            if c.is_whitespace() {
                if !self.text.is_empty() {
                    break;
                }
                while let Some(&c) = self.src.peek() {
                    if !c.is_whitespace() {
                        break;
                    }
                    self.push(c);
                    self.src.next();
                }
                return Tok::Space;
            }
            match c {
                '<' | '>' | '=' => {
                    if !self.text.is_empty() {
                        break;
                    }
                    self.src.next();
                    self.push(c);
                    return match c {
                        '<' => {
                            self.braces += 1;
                            Tok::Lt
                        }
                        '>' => {
                            self.braces = self.braces.saturating_sub(1);
                            Tok::Gt
                        }
                        _ => Tok::Eq,
                    };
                }
                '&' => {
                    if !self.text.is_empty() {
                        break;
                    }
                    self.src.next();
                    escaped = true;
                    let mut name = String::new();
                    while let Some(&c) = self.src.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        self.src.next();
                        if c == ';' {
                            break;
                        }
                        if name.len() < MAX_ENTITY {
                            name.push(c);
                        }
                    }
                    for c in entity(&name).chars() {
                        self.push(c);
                    }
                }
                '"' if self.braces > 0 => {
                    if !self.text.is_empty() {
                        break;
                    }
                    self.src.next();
                    while let Some(c) = self.src.next() {
                        if c == '"' {
                            break;
                        }
                        self.push(c);
                    }
                }
                _ => {
                    self.src.next();
                    self.push(c);
                }
            }
        }

        if self.text.is_empty() && self.src.peek().is_none() {
            return Tok::Eof;
        }
        if escaped {
            Tok::Word
        } else {
            lookup(&self.text, &mut self.header_level)
        }
    }

    /// Next token that is not whitespace.
    fn scan_nonspace(&mut self) -> Tok {
        loop {
            let tok = self.scan();
            if tok != Tok::Space {
                return tok;
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Formatting state
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Title,
    Pre,
}

/// Layout in force for the block being parsed.
#[derive(Debug, Clone, Copy)]
struct Format {
    indent: usize,
    width: usize,
    align: Align,
    mode: Mode,
    caps: bool,
    anchor: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct FontState {
    bold: bool,
    italic: bool,
    fixed: bool,
}

struct Renderer<'a> {
    scan: Scanner<'a>,
    format: Format,
    saved: Vec<Format>,
    body: Vec<u8>,
    title: String,
    hrefs: Vec<String>,
    /// Offset of the current line's indent code.
    line_start: usize,
    /// Cells used on the current line.
    xp: usize,
    last_was_space: bool,
    at_line_start: bool,
    font: FontState,
}

impl<'a> Renderer<'a> {
    fn new(source: &'a str, width: usize) -> Self {
        Self {
            scan: Scanner::new(source),
            format: Format {
                indent: 0,
                width,
                align: Align::Left,
                mode: Mode::Normal,
                caps: false,
                anchor: None,
            },
            saved: Vec::new(),
            body: vec![bytecode::INDENT, bytecode::INDENT_BIAS],
            title: String::new(),
            hrefs: Vec::new(),
            line_start: 0,
            xp: 0,
            last_was_space: false,
            at_line_start: true,
            font: FontState::default(),
        }
    }

    fn finish(mut self) -> Page {
        if self.xp > 0 {
            self.trim_trailing_space();
            self.set_indent(self.aligned_indent());
        }
        // Trailing empty lines carry nothing.
        let empty_line = [b'\n', bytecode::INDENT, bytecode::INDENT_BIAS];
        while self.body.ends_with(&empty_line) {
            self.body.truncate(self.body.len() - empty_line.len());
        }
        ndialog_core::debug!(
            bytes = self.body.len(),
            hrefs = self.hrefs.len(),
            "rendered help page"
        );
        Page::new(self.title.trim().to_string(), self.body, self.hrefs)
    }

    fn save(&mut self) {
        self.saved.push(self.format);
    }

    fn restore(&mut self) {
        if let Some(format) = self.saved.pop() {
            self.format = format;
        }
    }

    fn parent(&self) -> Format {
        self.saved.last().copied().unwrap_or(self.format)
    }

    // ── Output ──────────────────────────────────────────────────────────

    /// Re-emit the hyperlink and fonts in force at the start of a line.
    fn line_start(&mut self) {
        if !self.at_line_start {
            return;
        }
        self.at_line_start = false;
        let mut last = None;
        for anchor in self
            .saved
            .iter()
            .chain(std::iter::once(&self.format))
            .filter_map(|f| f.anchor)
        {
            if last != Some(anchor) {
                bytecode::push_tag(&mut self.body, bytecode::SET_ANCHOR, &anchor.to_string());
                last = Some(anchor);
            }
        }
        if self.font.bold {
            bytecode::push_font(&mut self.body, Font::SetBold);
        }
        if self.font.italic {
            bytecode::push_font(&mut self.body, Font::SetItalic);
        }
        if self.font.fixed {
            bytecode::push_font(&mut self.body, Font::SetFixed);
        }
    }

    fn set_font(&mut self, font: Font) {
        self.line_start();
        match font {
            Font::SetBold => self.font.bold = true,
            Font::ClearBold => self.font.bold = false,
            Font::SetItalic => self.font.italic = true,
            Font::ClearItalic => self.font.italic = false,
            Font::SetFixed => self.font.fixed = true,
            Font::ClearFixed => self.font.fixed = false,
        }
        bytecode::push_font(&mut self.body, font);
    }

    fn add_tag(&mut self, code: u8, payload: &str) {
        self.line_start();
        bytecode::push_tag(&mut self.body, code, payload);
    }

    fn add_label(&mut self, name: &str) {
        self.add_tag(bytecode::LABEL, name);
    }

    fn add_href(&mut self, target: &str) -> usize {
        let id = self.hrefs.len();
        self.hrefs.push(target.to_string());
        self.add_tag(bytecode::SET_ANCHOR, &id.to_string());
        id
    }

    fn end_href(&mut self, id: usize) {
        self.add_tag(bytecode::CLEAR_ANCHOR, &id.to_string());
    }

    fn set_indent(&mut self, indent: usize) {
        if let Some(slot) = self.body.get_mut(self.line_start + 1) {
            *slot = bytecode::indent_byte(indent);
        }
    }

    fn add_newline(&mut self) {
        self.body.push(b'\n');
        self.xp = 0;
        self.last_was_space = false;
        self.line_start = self.body.len();
        self.body.push(bytecode::INDENT);
        self.body.push(bytecode::INDENT_BIAS);
        self.at_line_start = true;
    }

    fn aligned_indent(&self) -> usize {
        let Format {
            indent,
            width,
            align,
            ..
        } = self.format;
        if self.xp >= width {
            return indent;
        }
        match align {
            Align::Left => indent,
            Align::Right => indent + (width - self.xp),
            Align::Center => indent + (width - self.xp) / 2,
        }
    }

    fn trim_trailing_space(&mut self) {
        while self.xp > 0
            && self.body.len() > self.line_start + 2
            && self.body.last() == Some(&b' ')
        {
            self.body.pop();
            self.xp -= 1;
        }
    }

    /// Finish the current line if it holds anything.
    fn flush_line(&mut self) -> bool {
        if self.xp == 0 {
            return false;
        }
        self.trim_trailing_space();
        self.set_indent(self.aligned_indent());
        self.add_newline();
        true
    }

    fn break_line(&mut self) {
        self.flush_line();
    }

    /// Finish the current line, emitting an empty one if it was empty.
    fn newline(&mut self) {
        if !self.flush_line() {
            self.add_newline();
        }
    }

    fn add_word(&mut self, word: &str) {
        let size = ndialog_core::measure::width(word);
        match self.format.mode {
            Mode::Pre => {
                self.line_start();
                bytecode::push_escaped(&mut self.body, word);
                self.xp += size;
            }
            Mode::Title => self.title.push_str(word),
            Mode::Normal => {
                if self.xp + size > self.format.width {
                    self.break_line();
                }
                self.line_start();
                if self.format.caps {
                    bytecode::push_escaped(&mut self.body, &word.to_uppercase());
                } else {
                    bytecode::push_escaped(&mut self.body, word);
                }
                self.xp += size;
            }
        }
        self.last_was_space = false;
    }

    fn add_space(&mut self, space: &str) {
        match self.format.mode {
            Mode::Pre => {
                for c in space.chars() {
                    if c == '\n' {
                        self.add_newline();
                    } else {
                        self.line_start();
                        let mut tmp = [0u8; 4];
                        bytecode::push_escaped(&mut self.body, c.encode_utf8(&mut tmp));
                        self.xp += 1;
                    }
                }
            }
            Mode::Title => {
                if !self.last_was_space {
                    self.title.push(' ');
                }
            }
            Mode::Normal => {
                if !self.last_was_space {
                    if self.xp >= self.format.width {
                        self.break_line();
                    } else if self.xp > 0 {
                        self.line_start();
                        self.body.push(b' ');
                        self.xp += 1;
                    }
                }
            }
        }
        self.last_was_space = true;
    }

    // ── Parser ──────────────────────────────────────────────────────────

    /// Swallow the rest of a tag.
    fn eat_tag(&mut self) {
        loop {
            match self.scan.scan() {
                Tok::Gt | Tok::Eof => return,
                _ => {}
            }
        }
    }

    /// Read `= value` after an attribute name.
    fn attribute_value(&mut self) -> Option<Tok> {
        let tok = self.scan.scan_nonspace();
        if tok != Tok::Eq {
            self.scan.unscan(tok);
            return None;
        }
        let tok = self.scan.scan_nonspace();
        if matches!(tok, Tok::Gt | Tok::Eof) {
            self.scan.unscan(tok);
            return None;
        }
        Some(tok)
    }

    /// Attributes of a block tag: `id=` labels and, when allowed, `align=`.
    fn block_header(&mut self, allow_align: bool) {
        loop {
            match self.scan.scan_nonspace() {
                Tok::Gt | Tok::Eof => return,
                Tok::Open(Tag::Id) => {
                    if self.attribute_value().is_some() {
                        let name = self.scan.text.clone();
                        self.add_label(&name);
                    }
                }
                Tok::Open(Tag::Align) if allow_align => match self.attribute_value() {
                    Some(Tok::Open(Tag::Left)) => self.format.align = Align::Left,
                    Some(Tok::Open(Tag::Right)) => self.format.align = Align::Right,
                    Some(Tok::Open(Tag::Center)) => self.format.align = Align::Center,
                    Some(other) => self.scan.unscan(other),
                    None => {}
                },
                _ => {}
            }
        }
    }

    /// Attributes of an anchor; returns the hyperlink opened, if any.
    fn anchor_header(&mut self) -> Option<usize> {
        let mut opened = None;
        loop {
            match self.scan.scan_nonspace() {
                Tok::Gt | Tok::Eof => return opened,
                Tok::Open(Tag::Name) => {
                    if self.attribute_value().is_some() {
                        let name = self.scan.text.clone();
                        self.add_label(&name);
                    }
                }
                Tok::Open(Tag::Href) => {
                    if self.attribute_value().is_some() && opened.is_none() {
                        let target = self.scan.text.clone();
                        let id = self.add_href(&target);
                        self.format.anchor = Some(id);
                        opened = Some(id);
                    }
                }
                _ => {}
            }
        }
    }

    fn parse(&mut self, end: Option<Tok>, level: u8, allowed: TagSet) {
        let allowed = allowed.with(Tag::Comment);
        loop {
            match self.scan.scan() {
                Tok::Eof => return,
                Tok::Lt => {}
                Tok::Space => {
                    let text = std::mem::take(&mut self.scan.text);
                    self.add_space(&text);
                    self.scan.text = text;
                    continue;
                }
                _ => {
                    let text = std::mem::take(&mut self.scan.text);
                    self.add_word(&text);
                    self.scan.text = text;
                    continue;
                }
            }

            let tok = self.scan.scan();
            if Some(tok) == end
                && (tok != Tok::Close(Tag::Header) || level == self.scan.header_level)
            {
                self.eat_tag();
                return;
            }
            if let Tok::Open(tag) | Tok::Close(tag) = tok {
                if !allowed.contains(tag) {
                    self.eat_tag();
                    continue;
                }
            }

            match tok {
                Tok::Open(Tag::Comment) => self.skip_comment(),
                Tok::Open(Tag::Html) => {
                    self.block_header(false);
                    self.parse(
                        Some(Tok::Close(Tag::Html)),
                        0,
                        TagSet::of(&[Tag::Head, Tag::Body]),
                    );
                }
                Tok::Open(Tag::Head) => {
                    self.block_header(false);
                    self.parse(Some(Tok::Close(Tag::Head)), 0, TagSet::of(&[Tag::Title]));
                }
                Tok::Open(Tag::Body) => {
                    self.block_header(false);
                    self.parse(Some(Tok::Close(Tag::Body)), 0, TagSet::BODY);
                }
                Tok::Open(Tag::DefList) => self.definition_list(),
                Tok::Open(Tag::DefTerm) => {
                    self.break_line();
                    let parent = self.parent();
                    self.format.indent = parent.indent;
                    self.format.width = parent.width;
                    self.eat_tag();
                }
                Tok::Open(Tag::DefText) => {
                    self.break_line();
                    let parent = self.parent();
                    self.format.indent = parent.indent + 10;
                    self.format.width = parent.width.saturating_sub(10).max(1);
                    self.eat_tag();
                }
                Tok::Open(tag @ (Tag::Para | Tag::Center)) => self.paragraph(tag),
                Tok::Open(Tag::Header) => {
                    let level = self.scan.header_level;
                    self.header(level);
                }
                Tok::Open(Tag::Break) => {
                    self.newline();
                    self.eat_tag();
                }
                Tok::Open(Tag::Title) => self.title_block(),
                Tok::Open(Tag::A) => self.anchor(),
                Tok::Open(Tag::Pre) => self.preformatted(),
                Tok::Open(Tag::Rule) => self.rule(),
                Tok::Open(Tag::Quote) => self.blockquote(),
                Tok::Open(Tag::Bold) => {
                    self.set_font(Font::SetBold);
                    self.eat_tag();
                }
                Tok::Close(Tag::Bold) => {
                    self.set_font(Font::ClearBold);
                    self.eat_tag();
                }
                Tok::Open(Tag::Ital) => {
                    self.set_font(Font::SetItalic);
                    self.eat_tag();
                }
                Tok::Close(Tag::Ital) => {
                    self.set_font(Font::ClearItalic);
                    self.eat_tag();
                }
                Tok::Open(Tag::Tt) => {
                    self.set_font(Font::SetFixed);
                    self.eat_tag();
                }
                Tok::Close(Tag::Tt) => {
                    self.set_font(Font::ClearFixed);
                    self.eat_tag();
                }
                Tok::Gt | Tok::Eof => {}
                _ => self.eat_tag(),
            }
        }
    }

    fn skip_comment(&mut self) {
        loop {
            match self.scan.scan() {
                Tok::Eof => return,
                Tok::Open(Tag::CommentEnd) => {
                    if matches!(self.scan.scan(), Tok::Gt | Tok::Eof) {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn header(&mut self, level: u8) {
        self.save();
        self.format.align = Align::Center;
        self.format.caps = level < 2;
        self.block_header(true);
        self.break_line();
        let bold = level < 4;
        if bold {
            self.set_font(Font::SetBold);
        }
        self.parse(Some(Tok::Close(Tag::Header)), level, TagSet::BODY);
        if bold {
            self.set_font(Font::ClearBold);
        }
        self.break_line();
        self.restore();
    }

    fn title_block(&mut self) {
        self.save();
        self.format.mode = Mode::Title;
        self.title.clear();
        self.block_header(false);
        self.parse(Some(Tok::Close(Tag::Title)), 0, TagSet::of(&[Tag::Title]));
        self.restore();
    }

    fn anchor(&mut self) {
        self.save();
        self.format.anchor = None;
        let opened = self.anchor_header();
        self.parse(Some(Tok::Close(Tag::A)), 0, TagSet::BODY);
        if let Some(id) = opened {
            self.end_href(id);
        }
        self.restore();
    }

    fn preformatted(&mut self) {
        self.save();
        self.break_line();
        self.format.mode = Mode::Pre;
        self.set_font(Font::SetFixed);
        self.block_header(false);
        self.parse(
            Some(Tok::Close(Tag::Pre)),
            0,
            TagSet::of(&[Tag::Ital, Tag::Tt, Tag::Bold, Tag::Rule]),
        );
        self.set_font(Font::ClearFixed);
        self.restore();
        self.break_line();
    }

    fn blockquote(&mut self) {
        self.save();
        self.break_line();
        if self.format.width > 8 {
            self.format.indent += 4;
            self.format.width -= 8;
        }
        self.block_header(true);
        self.parse(Some(Tok::Close(Tag::Quote)), 0, TagSet::BODY);
        self.break_line();
        self.newline();
        self.restore();
    }

    fn paragraph(&mut self, tag: Tag) {
        self.break_line();
        self.save();
        if tag == Tag::Center {
            self.format.align = Align::Center;
        }
        self.block_header(true);
        self.parse(Some(Tok::Close(tag)), 0, TagSet::BODY);
        self.break_line();
        self.newline();
        self.restore();
    }

    fn definition_list(&mut self) {
        self.break_line();
        self.save();
        self.format.caps = false;
        self.format.anchor = None;
        self.eat_tag();
        self.parse(Some(Tok::Close(Tag::DefList)), 0, TagSet::BODY);
        self.break_line();
        self.newline();
        self.restore();
    }

    fn rule(&mut self) {
        let mut percent = 100usize;
        loop {
            match self.scan.scan_nonspace() {
                Tok::Gt | Tok::Eof => break,
                Tok::Open(Tag::Width) => {
                    if let Some(Tok::Word) = self.attribute_value() {
                        if self.scan.text.contains('%') {
                            let digits: String = self
                                .scan
                                .text
                                .chars()
                                .take_while(char::is_ascii_digit)
                                .collect();
                            percent = digits.parse().unwrap_or(0);
                        }
                    }
                }
                _ => {}
            }
        }
        let width = (self.format.width.saturating_mul(percent) / 100).min(200);
        self.save();
        self.break_line();
        self.format.align = Align::Center;
        self.add_word(&"-".repeat(width));
        self.break_line();
        self.restore();
    }
}
