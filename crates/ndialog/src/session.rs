#![forbid(unsafe_code)]

//! One application run.
//!
//! A [`Session`] owns the surface every box of the run draws on and the
//! help root from the configuration. It is the only place the terminal is
//! taken over; dropping the session gives it back.

use std::io;
use std::path::{Path, PathBuf};

use ndialog_render::Surface;
use ndialog_render::terminal::TerminalSurface;
use ndialog_widgets::Screen;

use crate::config::DialogConfig;

/// A surface plus the settings boxes need from the configuration.
#[derive(Debug)]
pub struct Session<S: Surface = TerminalSurface> {
    surface: S,
    help_root: Option<PathBuf>,
}

impl Session<TerminalSurface> {
    /// Take over the controlling terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the terminal size is unavailable.
    pub fn open(config: &DialogConfig) -> io::Result<Self> {
        let surface = TerminalSurface::new(config.session_options(), config.theme())?;
        ndialog_core::info!(
            palette = ?config.palette,
            mouse = config.mouse,
            "dialog session opened"
        );
        Ok(Self::with_surface(surface, config))
    }
}

impl<S: Surface> Session<S> {
    /// Run on an existing surface; its theme is left as is.
    #[must_use]
    pub fn with_surface(surface: S, config: &DialogConfig) -> Self {
        Self {
            surface,
            help_root: config.help_root.clone(),
        }
    }

    /// A screen for one or more forms.
    pub fn screen(&mut self) -> Screen<'_> {
        let screen = Screen::new(&mut self.surface);
        match &self.help_root {
            Some(root) => screen.with_help_root(root.clone()),
            None => screen,
        }
    }

    #[must_use]
    pub fn help_root(&self) -> Option<&Path> {
        self.help_root.as_deref()
    }

    pub fn set_help_root(&mut self, root: Option<PathBuf>) {
        self.help_root = root;
    }

    /// Show `text` centred on the bottom row under every box, or clear it.
    pub fn set_helpline(&mut self, text: Option<&str>) {
        self.surface.set_helpline(text);
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// End the session and hand back the surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        ndialog_core::debug!("dialog session closed");
        self.surface
    }
}
