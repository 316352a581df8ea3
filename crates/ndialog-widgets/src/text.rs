#![forbid(unsafe_code)]

//! Read-only text viewers.
//!
//! A [`TextView`] scrolls and pans a viewport over either plain lines or a
//! rendered help [`Page`]. Page viewers also track a current hyperlink.
//! Which hyperlink sits under which cell is a function of the page and the
//! viewport alone, so [`TextView::link_map`] recomputes it on demand
//! rather than caching it during drawing.

use std::path::Path;

use ndialog_core::event::KeyCode;
use ndialog_core::measure;
use ndialog_render::Role;
use ndialog_text::{Font, Page, Segment, html};

use crate::callback::{self, Verdict};
use crate::edit::{self, Common};
use crate::error::{Error, Result};
use crate::object::{Decor, Kind, Obj, cells};
use crate::screen::{Canvas, Display, EditCode, Pointer, Screen};

/// What a viewer shows.
#[derive(Debug, Clone)]
pub enum Source {
    Plain(Vec<String>),
    Page(Page),
}

/// Direction of a hyperlink search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Saved viewing position of a help page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelpCursor {
    pub top: usize,
    pub pan: usize,
    pub href: Option<usize>,
}

/// One drawable character of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    col: usize,
    ch: char,
    bold: bool,
    dim: bool,
    href: Option<usize>,
}

/// State of a text viewer.
#[derive(Debug, Clone)]
pub struct TextView {
    source: Source,
    top: usize,
    pan: usize,
    rows: usize,
    cols: usize,
    href: Option<usize>,
    text_width: usize,
    document: Option<String>,
}

impl TextView {
    fn new(source: Source, cols: usize, rows: usize) -> Self {
        let text_width = source_width(&source);
        Self {
            source,
            top: 0,
            pan: 0,
            rows,
            cols,
            href: None,
            text_width,
            document: None,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// Whether this viewer shows a rendered page.
    #[must_use]
    pub const fn is_page(&self) -> bool {
        matches!(self.source, Source::Page(_))
    }

    #[must_use]
    pub fn page(&self) -> Option<&Page> {
        match &self.source {
            Source::Page(page) => Some(page),
            Source::Plain(_) => None,
        }
    }

    /// File the page was loaded from.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        match &self.source {
            Source::Plain(lines) => lines.len(),
            Source::Page(page) => page.line_count(),
        }
    }

    /// First visible line.
    #[must_use]
    pub const fn top(&self) -> usize {
        self.top
    }

    /// First visible column.
    #[must_use]
    pub const fn pan(&self) -> usize {
        self.pan
    }

    /// Current hyperlink id.
    #[must_use]
    pub const fn href(&self) -> Option<usize> {
        self.href
    }

    /// Target of the current hyperlink.
    #[must_use]
    pub fn current_target(&self) -> Option<&str> {
        self.page()?.href(self.href?)
    }

    fn max_top(&self) -> usize {
        self.line_count().saturating_sub(self.rows)
    }

    pub fn set_top(&mut self, top: usize) -> Result<()> {
        if top > self.line_count() {
            return Err(Error::Range);
        }
        self.top = top;
        Ok(())
    }

    pub(crate) fn rebind_lines(&mut self, lines: Vec<String>) {
        self.source = Source::Plain(lines);
        self.text_width = source_width(&self.source);
        self.top = 0;
        self.pan = 0;
        self.href = None;
    }

    #[must_use]
    pub const fn help_cursor(&self) -> HelpCursor {
        HelpCursor {
            top: self.top,
            pan: self.pan,
            href: self.href,
        }
    }

    /// Restore a saved position; one past the end of the page is refused.
    pub fn set_help_cursor(&mut self, cursor: HelpCursor) -> Result<()> {
        if cursor.top > self.line_count() {
            return Err(Error::Range);
        }
        self.top = cursor.top;
        self.pan = cursor.pan;
        self.href = cursor.href;
        Ok(())
    }

    /// Jump to the end (`-1`) or the top (`0`). Pages then select the
    /// first visible hyperlink.
    pub fn set_text_cursor(&mut self, position: i32) -> Result<()> {
        match position {
            -1 => self.top = self.max_top(),
            0 => self.top = 0,
            _ => return Err(Error::Range),
        }
        self.pan = 0;
        if self.is_page() {
            self.href = None;
            self.scan_for_tag(Direction::Forward);
        }
        Ok(())
    }

    pub fn scroll_up(&mut self) -> bool {
        if self.top == 0 {
            return false;
        }
        self.top -= 1;
        true
    }

    pub fn scroll_down(&mut self) -> bool {
        if self.top >= self.max_top() {
            return false;
        }
        self.top += 1;
        true
    }

    pub fn page_up(&mut self) {
        self.top = self.top.saturating_sub(self.rows);
    }

    pub fn page_down(&mut self) {
        self.top = (self.top + self.rows).min(self.max_top());
    }

    pub fn home(&mut self) {
        self.top = 0;
    }

    pub fn end(&mut self) {
        self.top = self.max_top();
    }

    pub fn pan_left(&mut self) -> bool {
        if self.pan == 0 {
            return false;
        }
        self.pan -= 1;
        true
    }

    pub fn pan_right(&mut self) -> bool {
        if self.pan + self.cols >= self.text_width {
            return false;
        }
        self.pan += 1;
        true
    }

    fn glyphs(&self, index: usize) -> Vec<Glyph> {
        let mut out = Vec::new();
        match &self.source {
            Source::Plain(lines) => {
                let mut col = 0;
                for ch in lines.get(index).map_or("", String::as_str).chars() {
                    out.push(Glyph {
                        col,
                        ch,
                        bold: false,
                        dim: false,
                        href: None,
                    });
                    col += char_width(ch);
                }
            }
            Source::Page(page) => {
                let Some(line) = page.line(index) else {
                    return out;
                };
                let mut col = line.indent();
                let (mut bold, mut dim, mut href) = (false, false, None);
                for segment in line.segments() {
                    match segment {
                        Segment::Text(text) => {
                            for ch in text.chars() {
                                out.push(Glyph {
                                    col,
                                    ch,
                                    bold,
                                    dim,
                                    href,
                                });
                                col += char_width(ch);
                            }
                        }
                        Segment::Font(Font::SetBold) => bold = true,
                        Segment::Font(Font::ClearBold) => bold = false,
                        Segment::Font(Font::SetItalic) => dim = true,
                        Segment::Font(Font::ClearItalic) => dim = false,
                        Segment::Font(_) | Segment::Label(_) => {}
                        Segment::Anchor(id) => href = Some(id),
                        Segment::EndAnchor => href = None,
                    }
                }
            }
        }
        out
    }

    /// Visible glyphs as (row, column in viewport, glyph).
    fn visible(&self) -> impl Iterator<Item = (usize, usize, Glyph)> + '_ {
        (0..self.rows).flat_map(move |row| {
            self.glyphs(self.top + row)
                .into_iter()
                .filter(|g| g.col >= self.pan && g.col < self.pan + self.cols)
                .map(move |g| (row, g.col - self.pan, g))
        })
    }

    /// Hyperlink under every viewport cell, row by row.
    #[must_use]
    pub fn link_map(&self) -> Vec<Option<usize>> {
        let mut map = vec![None; self.rows * self.cols];
        for (row, col, glyph) in self.visible() {
            map[row * self.cols + col] = glyph.href;
        }
        map
    }

    /// Hyperlink under viewport cell (`col`, `row`).
    #[must_use]
    pub fn link_at(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.link_map()[row * self.cols + col]
    }

    /// Whether hyperlink `id` has a cell in the viewport.
    #[must_use]
    pub fn is_visible(&self, id: usize) -> bool {
        self.link_map().contains(&Some(id))
    }

    /// Move the current hyperlink to another one in the viewport.
    ///
    /// With no current hyperlink the first one met wins. Otherwise the scan
    /// looks for an id past the current one in the scan direction; if the
    /// current hyperlink is not in view at all, the first one met wins.
    /// Returns whether the current hyperlink changed.
    pub fn scan_for_tag(&mut self, direction: Direction) -> bool {
        let map = self.link_map();
        let cells: Box<dyn Iterator<Item = &Option<usize>>> = match direction {
            Direction::Forward => Box::new(map.iter()),
            Direction::Backward => Box::new(map.iter().rev()),
        };
        let mut first = None;
        let mut current_here = false;
        for id in cells.flatten().copied() {
            let Some(current) = self.href else {
                self.href = Some(id);
                return true;
            };
            first.get_or_insert(id);
            let past = match direction {
                Direction::Forward => id > current,
                Direction::Backward => id < current,
            };
            if id == current {
                current_here = true;
            } else if past {
                self.href = Some(id);
                return true;
            }
        }
        match first {
            Some(id) if !current_here => {
                self.href = Some(id);
                true
            }
            _ => false,
        }
    }
}

fn char_width(ch: char) -> usize {
    measure::width(ch.encode_utf8(&mut [0u8; 4]))
}

fn source_width(source: &Source) -> usize {
    match source {
        Source::Plain(lines) => lines.iter().map(|l| measure::width(l)).max().unwrap_or(0),
        Source::Page(page) => page.width(),
    }
}

impl Obj {
    /// A plain text viewer.
    pub fn text(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        lines: Vec<String>,
        decor: Decor,
    ) -> Result<Self> {
        Self::viewer(x, y, width, depth, Source::Plain(lines), decor)
    }

    /// A viewer over an already rendered page.
    pub fn page(x: i32, y: i32, width: i32, depth: i32, page: Page, decor: Decor) -> Result<Self> {
        Self::viewer(x, y, width, depth, Source::Page(page), decor)
    }

    /// A help viewer over `"document#label"`.
    ///
    /// The document is rendered at the viewer's width. An unreadable file
    /// yields a one-line "File Not Found" page; an unknown label leaves the
    /// view at the top.
    pub fn help_viewer(x: i32, y: i32, width: i32, depth: i32, document: &str) -> Result<Self> {
        let (file, label) = match document.split_once('#') {
            Some((file, label)) => (file, Some(label)),
            None => (document, None),
        };
        let cols = usize::try_from(width).unwrap_or(0).max(1);
        let page = html::render_file(Path::new(file), cols);
        let top = label.and_then(|label| page.find_label(label));
        let mut obj = Self::page(x, y, width, depth, page, Decor::framed())?;
        if let Some(view) = obj.as_text_mut() {
            view.document = Some(file.to_owned());
            view.top = top.unwrap_or(0);
        }
        Ok(obj)
    }

    fn viewer(x: i32, y: i32, width: i32, depth: i32, source: Source, decor: Decor) -> Result<Self> {
        let (Ok(cols), Ok(rows)) = (usize::try_from(width), usize::try_from(depth)) else {
            return Err(Error::InvalidArgument("text viewer needs a positive size"));
        };
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidArgument("text viewer needs a positive size"));
        }
        let view = TextView::new(source, cols, rows);
        let mut obj = Self::base(Kind::Text(view), x, y, width, depth, decor);
        obj.hit = obj.hit.expand(1, 1);
        Ok(obj)
    }
}

pub(crate) fn draw(obj: &Obj, view: &TextView, canvas: &mut Canvas<'_>) {
    obj.draw_decor(canvas);
    let area = obj.content_area();
    let window = canvas.style(Role::Window);
    for row in 0..area.height {
        canvas.blank(area.x, area.y + row, area.width, window);
    }
    for (row, col, glyph) in view.visible() {
        let mut style = window;
        if glyph.bold {
            style = style.bold();
        }
        if glyph.dim {
            style = style.dim();
        }
        if let Some(id) = glyph.href {
            style = if view.href == Some(id) {
                style.reverse()
            } else {
                style.underline()
            };
        }
        let (Ok(dx), Ok(dy)) = (i32::try_from(col), i32::try_from(row)) else {
            continue;
        };
        canvas.put_char(area.x + dx, area.y + dy, glyph.ch, style);
    }

    let lines = view.line_count();
    if area.width > 3 {
        let tab = canvas.style(Role::Widget);
        if view.top > 0 {
            canvas.put_str(area.x + area.width - 3, area.y - 1, "(-)", tab);
        }
        if view.top + view.rows < lines {
            canvas.put_str(area.x + area.width - 3, area.y + area.height, "(+)", tab);
        }
        let chars = *canvas.theme().chars();
        let last = area.y + area.height - 1;
        if view.pan > 0 {
            canvas.put_char(area.x - 1, last, chars.left_arrow, tab);
        }
        if view.pan + view.cols < view.text_width {
            canvas.put_char(area.x + area.width, last, chars.right_arrow, tab);
        }
    }
    if area.width > 8 && lines > 0 {
        let percent = ((view.top + view.rows) * 100 / lines).min(100);
        let label = format!("{percent}%");
        canvas.put_str(
            area.x + area.width - (3 + cells(&label)),
            area.y + area.height,
            &label,
            window,
        );
    }
}

fn view_mut(obj: &mut Obj) -> Option<&mut TextView> {
    obj.as_text_mut()
}

/// Fire the callback on the current hyperlink.
fn follow(obj: &mut Obj, screen: &mut Screen<'_>) -> Option<EditCode> {
    match callback::run(obj, screen) {
        Verdict::Reject => None,
        Verdict::Accept => Some(EditCode::Return),
        Verdict::AcceptAndExit => Some(EditCode::ExitForm),
    }
}

/// Handle the press that brought focus here.
fn enter_with(obj: &mut Obj, screen: &mut Screen<'_>, p: Pointer) -> Option<EditCode> {
    let area = obj.content_area();
    let (dx, dy) = (p.x - area.x, p.y - area.y);
    let view = view_mut(obj)?;
    let half = view.cols / 2;
    if dy < 0 {
        view.page_up();
    } else if dy >= area.height {
        view.page_down();
    } else if dx < 0 {
        view.pan = view.pan.saturating_sub(half);
    } else if dx >= area.width {
        if view.pan + view.cols < view.text_width {
            view.pan += half;
        }
    } else if view.is_page() {
        let (col, row) = (usize::try_from(dx).ok()?, usize::try_from(dy).ok()?);
        if let Some(id) = view.link_at(col, row) {
            view.href = Some(id);
            if p.double {
                return follow(obj, screen);
            }
        }
    }
    None
}

pub(crate) fn edit(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    entry: Option<Pointer>,
) -> EditCode {
    screen.hide_cursor();
    if let Some(p) = entry {
        if let Some(code) = enter_with(obj, screen, p) {
            return code;
        }
        screen.draw(display, obj);
    }
    let is_page = obj.as_text().is_some_and(TextView::is_page);
    loop {
        let key = match edit::key_or_code(screen.read(display)) {
            Ok(key) => key,
            Err(code) => return code,
        };
        match edit::common(&key) {
            Some(Common::Help) => {
                edit::show_help(obj, screen);
                continue;
            }
            Some(Common::Refresh) => return EditCode::Refresh,
            Some(Common::Escape) => return EditCode::Escape,
            None => {}
        }
        let outcome = if is_page {
            page_key(obj, screen, key.code, key.ctrl())
        } else {
            plain_key(obj, key.code, key.ctrl())
        };
        match outcome {
            Outcome::Stay => {}
            Outcome::Redraw => screen.draw(display, obj),
            Outcome::Done(code) => return code,
        }
    }
}

enum Outcome {
    Stay,
    Redraw,
    Done(EditCode),
}

/// Paging keys shared by both viewers. `None` when `code` is not one.
fn paging(view: &mut TextView, code: KeyCode, ctrl: bool) -> Option<Outcome> {
    match code {
        KeyCode::PageUp => view.page_up(),
        KeyCode::Char('u') if ctrl => view.page_up(),
        KeyCode::PageDown => view.page_down(),
        KeyCode::Char('d') if ctrl => view.page_down(),
        KeyCode::Home => view.home(),
        KeyCode::End => view.end(),
        KeyCode::Char('<') if !ctrl => {
            return Some(if view.pan_left() { Outcome::Redraw } else { Outcome::Stay });
        }
        KeyCode::Char('>') if !ctrl => {
            return Some(if view.pan_right() { Outcome::Redraw } else { Outcome::Stay });
        }
        _ => return None,
    }
    Some(Outcome::Redraw)
}

fn plain_key(obj: &mut Obj, code: KeyCode, ctrl: bool) -> Outcome {
    let Some(view) = view_mut(obj) else {
        return Outcome::Done(EditCode::Error);
    };
    if let Some(outcome) = paging(view, code, ctrl) {
        return outcome;
    }
    let moved = match code {
        KeyCode::Char('Q') if !ctrl => return Outcome::Done(EditCode::Escape),
        KeyCode::BackTab | KeyCode::Left => return Outcome::Done(EditCode::BackTab),
        KeyCode::Right | KeyCode::Tab => return Outcome::Done(EditCode::Tab),
        KeyCode::Up => view.scroll_up(),
        KeyCode::Char('-') if !ctrl => view.scroll_up(),
        KeyCode::Down => view.scroll_down(),
        KeyCode::Char('+') if !ctrl => view.scroll_down(),
        _ => false,
    };
    if moved { Outcome::Redraw } else { Outcome::Stay }
}

fn page_key(obj: &mut Obj, screen: &mut Screen<'_>, code: KeyCode, ctrl: bool) -> Outcome {
    let Some(view) = view_mut(obj) else {
        return Outcome::Done(EditCode::Error);
    };
    if let Some(outcome) = paging(view, code, ctrl) {
        return outcome;
    }
    match code {
        KeyCode::Left => Outcome::Done(EditCode::Escape),
        KeyCode::Right | KeyCode::Enter => {
            let shown = view.href.is_some_and(|id| view.is_visible(id));
            if !shown {
                return Outcome::Stay;
            }
            match follow(obj, screen) {
                Some(code) => Outcome::Done(code),
                None => Outcome::Stay,
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if !view.scan_for_tag(Direction::Backward) {
                view.page_up();
                view.scan_for_tag(Direction::Backward);
            }
            Outcome::Redraw
        }
        KeyCode::Tab | KeyCode::Down => {
            if !view.scan_for_tag(Direction::Forward) {
                view.page_down();
                view.scan_for_tag(Direction::Forward);
            }
            Outcome::Redraw
        }
        _ => Outcome::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    fn plain(n: usize, rows: i32) -> TextView {
        Obj::text(0, 0, 20, rows, lines(n), Decor::new())
            .expect("valid")
            .as_text()
            .expect("text")
            .clone()
    }

    fn two_links() -> TextView {
        let page = html::render(
            "<a href=\"first.html\">one</a> and <a href=\"second.html\">two</a>",
            40,
        );
        Obj::page(0, 0, 40, 3, page, Decor::framed())
            .expect("valid")
            .as_text()
            .expect("text")
            .clone()
    }

    #[test]
    fn text_is_always_framed() {
        let obj = Obj::text(0, 0, 10, 3, lines(2), Decor::new()).expect("valid");
        assert!(obj.is_boxed());
        assert_eq!(obj.natural_size(), (12, 5));
        assert!(Obj::text(0, 0, 0, 3, lines(2), Decor::new()).is_err());
    }

    #[test]
    fn scrolling_stops_at_the_last_page() {
        let mut view = plain(10, 4);
        view.page_down();
        assert_eq!(view.top(), 4);
        view.page_down();
        assert_eq!(view.top(), 6);
        assert!(!view.scroll_down());
        view.home();
        assert!(!view.scroll_up());
        view.end();
        assert_eq!(view.top(), 6);
    }

    #[test]
    fn panning_is_bounded_by_widest_line() {
        let mut view = Obj::text(0, 0, 4, 1, vec!["abcdef".into()], Decor::new())
            .expect("valid")
            .as_text()
            .expect("text")
            .clone();
        assert!(view.pan_right());
        assert!(view.pan_right());
        assert!(!view.pan_right());
        assert_eq!(view.pan(), 2);
        assert!(view.pan_left());
    }

    #[test]
    fn text_cursor_accepts_only_ends() {
        let mut view = plain(10, 4);
        view.set_text_cursor(-1).expect("end");
        assert_eq!(view.top(), 6);
        view.set_text_cursor(0).expect("top");
        assert_eq!(view.top(), 0);
        assert!(matches!(view.set_text_cursor(3), Err(Error::Range)));
    }

    #[test]
    fn set_top_rejects_past_end() {
        let mut view = plain(3, 2);
        assert!(view.set_top(3).is_ok());
        assert!(matches!(view.set_top(4), Err(Error::Range)));
    }

    #[test]
    fn forward_scans_walk_visible_links() {
        let mut view = two_links();
        assert_eq!(view.href(), None);
        assert!(view.scan_for_tag(Direction::Forward));
        assert_eq!(view.href(), Some(0));
        assert_eq!(view.current_target(), Some("first.html"));
        assert!(view.scan_for_tag(Direction::Forward));
        assert_eq!(view.href(), Some(1));
        assert!(!view.scan_for_tag(Direction::Forward));
        assert!(view.scan_for_tag(Direction::Backward));
        assert_eq!(view.href(), Some(0));
    }

    #[test]
    fn link_map_marks_anchor_cells() {
        let view = two_links();
        let map = view.link_map();
        assert_eq!(map[0], Some(0));
        assert_eq!(map[2], Some(0));
        assert_eq!(view.link_at(8, 0), Some(1));
        assert_eq!(view.link_at(8, 5), None);
    }

    #[test]
    fn help_cursor_round_trips_position() {
        let mut view = two_links();
        view.scan_for_tag(Direction::Forward);
        let saved = view.help_cursor();
        view.set_text_cursor(0).expect("top");
        view.href = None;
        view.set_help_cursor(saved).expect("in range");
        assert_eq!(view.href(), Some(0));
        let far = HelpCursor {
            top: 99,
            ..saved
        };
        assert!(matches!(view.set_help_cursor(far), Err(Error::Range)));
    }

    #[test]
    fn missing_help_document_names_the_file() {
        let obj = Obj::help_viewer(0, 0, 40, 5, "/nonexistent/ndialog-help.html#top")
            .expect("valid")
            .with_help("index.html");
        assert_eq!(obj.help(), Some("index.html"));
        let view = obj.as_text().expect("text");
        assert_eq!(view.page().map(Page::title), Some(ndialog_text::page::NOT_FOUND_TITLE));
        assert_eq!(view.document(), Some("/nonexistent/ndialog-help.html"));
        assert_eq!(view.top(), 0);
        assert_eq!(obj.id(), "help");
    }
}
