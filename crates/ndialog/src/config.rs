#![forbid(unsafe_code)]

//! Run-wide configuration.
//!
//! One [`DialogConfig`] is built per application run, from defaults plus
//! environment overrides, then handed to [`crate::Session`]. Command-line
//! flags are applied on top by the caller.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `NDIALOG_PALETTE` | `color`, `peacock` or `mono` |
//! | `NO_COLOR` | any non-empty value forces `mono` |
//! | `NDIALOG_HELP_ROOT` | directory relative help topics are read from |
//! | `NDIALOG_MOUSE` | `0`, `off`, `no` or `false` disables mouse capture |

use std::env;
use std::path::PathBuf;

use ndialog_core::terminal_session::SessionOptions;
use ndialog_render::{Palette, Theme};

pub const PALETTE_ENV: &str = "NDIALOG_PALETTE";
pub const NO_COLOR_ENV: &str = "NO_COLOR";
pub const HELP_ROOT_ENV: &str = "NDIALOG_HELP_ROOT";
pub const MOUSE_ENV: &str = "NDIALOG_MOUSE";

/// Palette, input, and help settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub palette: Palette,
    /// Capture mouse presses.
    pub mouse: bool,
    /// Where relative help topics are looked up.
    pub help_root: Option<PathBuf>,
    /// Draw on the alternate screen so the shell's scrollback survives.
    pub alternate_screen: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            palette: Palette::Color,
            mouse: true,
            help_root: None,
            alternate_screen: true,
        }
    }
}

impl DialogConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env(|key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    ///
    /// Unrecognised palette names are logged and ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(name) = lookup(PALETTE_ENV) {
            match name.parse() {
                Ok(palette) => self.palette = palette,
                Err(_err) => {
                    ndialog_core::warn!(error = %_err, "ignoring {}", PALETTE_ENV);
                }
            }
        }
        if lookup(NO_COLOR_ENV).is_some_and(|v| !v.is_empty()) {
            self.palette = Palette::Mono;
        }
        if let Some(root) = lookup(HELP_ROOT_ENV).filter(|v| !v.is_empty()) {
            self.help_root = Some(PathBuf::from(root));
        }
        if let Some(value) = lookup(MOUSE_ENV) {
            self.mouse = !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "0" | "off" | "no" | "false"
            );
        }
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_help_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.help_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_palette(self.palette)
    }

    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            alternate_screen: self.alternate_screen,
            mouse_capture: self.mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = DialogConfig::default();
        assert_eq!(config.palette, Palette::Color);
        assert!(config.mouse);
        assert!(config.help_root.is_none());
        assert!(config.session_options().alternate_screen);
    }

    #[test]
    fn palette_from_env() {
        let config = DialogConfig::default().with_env(lookup(&[(PALETTE_ENV, "peacock")]));
        assert_eq!(config.palette, Palette::Peacock);
    }

    #[test]
    fn unknown_palette_is_ignored() {
        let config = DialogConfig::default().with_env(lookup(&[(PALETTE_ENV, "plaid")]));
        assert_eq!(config.palette, Palette::Color);
    }

    #[test]
    fn no_color_wins_over_palette() {
        let config = DialogConfig::default()
            .with_env(lookup(&[(PALETTE_ENV, "peacock"), (NO_COLOR_ENV, "1")]));
        assert_eq!(config.palette, Palette::Mono);
        let empty = DialogConfig::default().with_env(lookup(&[(NO_COLOR_ENV, "")]));
        assert_eq!(empty.palette, Palette::Color);
    }

    #[test]
    fn mouse_and_help_root() {
        let config = DialogConfig::default()
            .with_env(lookup(&[(MOUSE_ENV, "Off"), (HELP_ROOT_ENV, "/usr/share/help")]));
        assert!(!config.mouse);
        assert!(!config.session_options().mouse_capture);
        assert_eq!(config.help_root, Some(PathBuf::from("/usr/share/help")));
        let on = DialogConfig::default().with_env(lookup(&[(MOUSE_ENV, "1")]));
        assert!(on.mouse);
    }
}
