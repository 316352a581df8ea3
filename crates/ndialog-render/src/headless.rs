#![forbid(unsafe_code)]

//! A scripted, in-memory surface.
//!
//! [`HeadlessSurface`] replays a queue of input events and records what a
//! real terminal would have shown: the composed screen after the last
//! present, bells, pauses, and how many windows were ever opened. When the
//! script runs dry, reads report end of input.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use ndialog_core::event::Event;
use ndialog_core::geometry::Rect;
use ndialog_core::input::KeyTranslator;

use crate::buffer::Buffer;
use crate::panel::{PanelStack, WindowId};
use crate::surface::Surface;
use crate::theme::Theme;

/// Scripted surface for tests and non-interactive runs.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    panels: PanelStack,
    theme: Theme,
    script: VecDeque<Event>,
    translator: KeyTranslator,
    screen: Buffer,
    cursor: Option<(u16, u16)>,
    beeps: usize,
    paused: Duration,
    presents: usize,
    full_repaints: usize,
    windows_opened: usize,
}

impl HeadlessSurface {
    /// A `cols` x `rows` screen with no scripted input.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            panels: PanelStack::new(cols, rows),
            theme: Theme::monochrome(),
            script: VecDeque::new(),
            translator: KeyTranslator::new(),
            screen: Buffer::new(cols, rows),
            cursor: None,
            beeps: 0,
            paused: Duration::ZERO,
            presents: 0,
            full_repaints: 0,
            windows_opened: 0,
        }
    }

    /// Use a different theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Append events to the input script.
    #[must_use]
    pub fn with_events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.script.extend(events);
        self
    }

    /// Append one event to the input script.
    pub fn push_event(&mut self, event: Event) {
        self.script.push_back(event);
    }

    /// Type a string as individual character keys.
    pub fn type_str(&mut self, text: &str) {
        self.script.extend(text.chars().map(Event::char));
    }

    /// Events not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// The screen as of the last present.
    #[must_use]
    pub fn screen(&self) -> &Buffer {
        &self.screen
    }

    /// Text rows of the last presented screen.
    #[must_use]
    pub fn screen_text(&self) -> Vec<String> {
        self.screen.lines()
    }

    /// Whether any row of the last presented screen contains `needle`.
    #[must_use]
    pub fn shows(&self, needle: &str) -> bool {
        self.screen.lines().iter().any(|l| l.contains(needle))
    }

    /// Where the cursor was last placed.
    #[must_use]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Number of bells rung.
    #[must_use]
    pub const fn beeps(&self) -> usize {
        self.beeps
    }

    /// Total requested pause time (never actually slept).
    #[must_use]
    pub const fn paused(&self) -> Duration {
        self.paused
    }

    /// Number of presents.
    #[must_use]
    pub const fn presents(&self) -> usize {
        self.presents
    }

    /// Number of full recompositions triggered by restack records.
    #[must_use]
    pub const fn full_repaints(&self) -> usize {
        self.full_repaints
    }

    /// Number of windows ever opened.
    #[must_use]
    pub const fn windows_opened(&self) -> usize {
        self.windows_opened
    }

    /// Windows currently open.
    #[must_use]
    pub fn open_windows(&self) -> usize {
        self.panels.depth()
    }
}

impl Surface for HeadlessSurface {
    fn panels(&self) -> &PanelStack {
        &self.panels
    }

    fn panels_mut(&mut self) -> &mut PanelStack {
        &mut self.panels
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn present(&mut self) -> io::Result<()> {
        self.screen = self.panels.compose(&self.theme);
        self.presents += 1;
        Ok(())
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        if self.panels.take_restack() {
            self.full_repaints += 1;
            self.present()?;
        }
        while let Some(event) = self.script.pop_front() {
            if let Event::Resize { width, height } = event {
                self.panels.resize(width, height);
                return Ok(Some(event));
            }
            if let Some(event) = self.translator.feed(event) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }

    fn set_cursor(&mut self, at: Option<(u16, u16)>) {
        self.cursor = at;
    }

    fn open_window(&mut self, area: Rect) -> io::Result<WindowId> {
        let (cols, rows) = self.size();
        if area.is_empty() || area.right() > cols || area.bottom() > rows {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("window {area:?} does not fit a {cols}x{rows} screen"),
            ));
        }
        self.windows_opened += 1;
        Ok(self.panels.push(area))
    }
}
