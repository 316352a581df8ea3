#![forbid(unsafe_code)]

//! Presenter: state-tracked terminal output.
//!
//! Turns a composed screen [`Buffer`] into crossterm commands. The previous
//! frame is kept so only changed runs are emitted; the current style is
//! tracked so SGR sequences are written only when the style changes.
//! [`Presenter::invalidate`] drops the previous frame, forcing the next
//! present to clear and repaint everything.

use std::io::{self, Write};

use crossterm::style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, style, terminal};

use crate::buffer::Buffer;
use crate::cell::{Color, Style, StyleFlags};
use crate::diff::changed_runs;

/// Diffing frame writer.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
    previous: Option<Buffer>,
    current_style: Option<Style>,
}

impl<W: Write> Presenter<W> {
    /// Wrap a writer; the first present repaints in full.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            previous: None,
            current_style: None,
        }
    }

    /// Forget the previous frame.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Emit `frame` and place (or hide) the cursor.
    pub fn present(&mut self, frame: &Buffer, cursor_at: Option<(u16, u16)>) -> io::Result<()> {
        queue!(self.writer, cursor::Hide)?;
        match self.previous.as_ref().and_then(|prev| changed_runs(prev, frame)) {
            Some(runs) => {
                for run in runs {
                    self.emit_run(frame, run.y, run.x0, run.x1)?;
                }
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(width = frame.width(), height = frame.height(), "full repaint");
                self.current_style = None;
                queue!(self.writer, style::ResetColor, terminal::Clear(terminal::ClearType::All))?;
                for y in 0..frame.height() {
                    if frame.width() > 0 {
                        self.emit_run(frame, y, 0, frame.width() - 1)?;
                    }
                }
            }
        }
        if let Some((x, y)) = cursor_at {
            queue!(self.writer, cursor::MoveTo(x, y), cursor::Show)?;
        }
        self.writer.flush()?;
        self.previous = Some(frame.clone());
        Ok(())
    }

    fn emit_run(&mut self, frame: &Buffer, y: u16, x0: u16, x1: u16) -> io::Result<()> {
        // Never start a run on the trailing half of a wide glyph.
        let mut start = x0;
        while start > 0
            && frame
                .get(i32::from(start), i32::from(y))
                .is_some_and(|c| c.is_continuation())
        {
            start -= 1;
        }
        queue!(self.writer, cursor::MoveTo(start, y))?;
        for x in start..=x1 {
            let Some(cell) = frame.get(i32::from(x), i32::from(y)) else {
                continue;
            };
            if cell.is_continuation() {
                continue;
            }
            self.emit_style(cell.style)?;
            queue!(self.writer, style::Print(cell.ch))?;
        }
        Ok(())
    }

    fn emit_style(&mut self, next: Style) -> io::Result<()> {
        if self.current_style == Some(next) {
            return Ok(());
        }
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        queue!(
            self.writer,
            SetForegroundColor(map_color(next.fg)),
            SetBackgroundColor(map_color(next.bg))
        )?;
        for (flag, attr) in [
            (StyleFlags::BOLD, Attribute::Bold),
            (StyleFlags::DIM, Attribute::Dim),
            (StyleFlags::UNDERLINE, Attribute::Underlined),
            (StyleFlags::REVERSE, Attribute::Reverse),
            (StyleFlags::BLINK, Attribute::SlowBlink),
        ] {
            if next.flags.contains(flag) {
                queue!(self.writer, SetAttribute(attr))?;
            }
        }
        self.current_style = Some(next);
        Ok(())
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn map_color(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(p: Presenter<Vec<u8>>) -> String {
        String::from_utf8_lossy(&p.into_inner()).into_owned()
    }

    #[test]
    fn first_present_clears_screen() {
        let mut p = Presenter::new(Vec::new());
        let mut frame = Buffer::new(3, 1);
        frame.put_str(0, 0, "abc", Style::PLAIN);
        p.present(&frame, None).expect("present");
        let out = output(p);
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("abc"));
    }

    #[test]
    fn second_present_only_emits_changes() {
        let mut p = Presenter::new(Vec::new());
        let mut frame = Buffer::new(4, 1);
        frame.put_str(0, 0, "abcd", Style::PLAIN);
        p.present(&frame, None).expect("present");
        let before = p.writer.len();
        frame.put_str(2, 0, "X", Style::PLAIN);
        p.present(&frame, None).expect("present");
        let tail = String::from_utf8_lossy(&p.writer[before..]).into_owned();
        assert!(tail.contains('X'));
        assert!(!tail.contains('a'));
        assert!(!tail.contains("\x1b[2J"));
    }

    #[test]
    fn invalidate_forces_repaint() {
        let mut p = Presenter::new(Vec::new());
        let frame = Buffer::new(2, 1);
        p.present(&frame, None).expect("present");
        p.invalidate();
        let before = p.writer.len();
        p.present(&frame, None).expect("present");
        let tail = String::from_utf8_lossy(&p.writer[before..]).into_owned();
        assert!(tail.contains("\x1b[2J"));
    }

    #[test]
    fn cursor_is_shown_when_requested() {
        let mut p = Presenter::new(Vec::new());
        p.present(&Buffer::new(2, 2), Some((1, 1))).expect("present");
        assert!(output(p).contains("\x1b[?25h"));
    }
}
