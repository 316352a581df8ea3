#![forbid(unsafe_code)]

//! The crossterm-backed surface.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use ndialog_core::event::Event;
use ndialog_core::input::{ClickTracker, KeyTranslator};
use ndialog_core::terminal_session::{SessionOptions, TerminalSession};

use crate::panel::PanelStack;
use crate::presenter::Presenter;
use crate::surface::Surface;
use crate::theme::Theme;

/// A surface drawing on the controlling terminal.
///
/// Owns the [`TerminalSession`]; dropping the surface restores the terminal.
#[derive(Debug)]
pub struct TerminalSurface {
    session: TerminalSession,
    presenter: Presenter<Stdout>,
    panels: PanelStack,
    theme: Theme,
    translator: KeyTranslator,
    clicks: ClickTracker,
    cursor: Option<(u16, u16)>,
}

impl TerminalSurface {
    /// Take over the terminal.
    pub fn new(options: SessionOptions, theme: Theme) -> io::Result<Self> {
        let session = TerminalSession::new(options)?;
        let (cols, rows) = session.size()?;
        Ok(Self {
            session,
            presenter: Presenter::new(io::stdout()),
            panels: PanelStack::new(cols, rows),
            theme,
            translator: KeyTranslator::new(),
            clicks: ClickTracker::default(),
            cursor: None,
        })
    }
}

impl Surface for TerminalSurface {
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
        let frame = self.panels.compose(&self.theme);
        self.presenter.present(&frame, self.cursor)
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            if self.panels.take_restack() {
                self.presenter.invalidate();
                self.present()?;
            }
            let Some(event) = self.session.read_event()? else {
                continue;
            };
            let event = match event {
                Event::Mouse(mouse) => Event::Mouse(self.clicks.observe(mouse, Instant::now())),
                Event::Resize { width, height } => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(width, height, "terminal resized");
                    self.panels.resize(width, height);
                    return Ok(Some(event));
                }
                key => key,
            };
            if let Some(event) = self.translator.feed(event) {
                return Ok(Some(event));
            }
        }
    }

    fn beep(&mut self) {
        let _ = self.session.beep();
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn set_cursor(&mut self, at: Option<(u16, u16)>) {
        self.cursor = at;
    }
}
