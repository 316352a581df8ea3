#![forbid(unsafe_code)]

//! The fixed dialog palette.
//!
//! Every styled element of a form asks for a [`Role`]; a [`Theme`] maps
//! roles to styles. Three palettes exist: the classic colour scheme, the
//! black-on-cyan "peacock" scheme, and a monochrome scheme for terminals
//! without colour (or when `NO_COLOR` is set).

use std::fmt;
use std::str::FromStr;

use crate::cell::{Color, Style};
use crate::drawing::BoxChars;

/// Styled element of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Form body and plain text.
    Window,
    /// Screen background behind all forms.
    Background,
    /// Button labels.
    Button,
    /// A button while it is being pressed.
    Pressed,
    /// The current item of a list, the focused field.
    Selected,
    /// Decorations inside widgets (identifiers, scroll tabs).
    Widget,
    /// Form and widget titles.
    Title,
    /// Brackets of the focused button.
    Active,
    /// Light edge of 3-D frames.
    Relief,
    /// Hot-key letters.
    Hotkey,
    /// Prompts of error forms.
    Error,
}

impl Role {
    /// Every role, in palette order.
    pub const ALL: [Role; 11] = [
        Role::Window,
        Role::Background,
        Role::Button,
        Role::Pressed,
        Role::Selected,
        Role::Widget,
        Role::Title,
        Role::Active,
        Role::Relief,
        Role::Hotkey,
        Role::Error,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Named palette choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    #[default]
    Color,
    Peacock,
    Mono,
}

impl FromStr for Palette {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" | "default" => Ok(Self::Color),
            "peacock" => Ok(Self::Peacock),
            "mono" | "monochrome" | "none" => Ok(Self::Mono),
            _ => Err(UnknownPalette(s.to_string())),
        }
    }
}

/// Error for an unrecognised palette name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPalette(pub String);

impl fmt::Display for UnknownPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown palette `{}` (expected color, peacock or mono)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPalette {}

/// Role-to-style table plus the frame character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    styles: [Style; 11],
    chars: BoxChars,
}

impl Default for Theme {
    fn default() -> Self {
        Self::color()
    }
}

impl Theme {
    /// Build the theme for a palette.
    #[must_use]
    pub fn from_palette(palette: Palette) -> Self {
        match palette {
            Palette::Color => Self::color(),
            Palette::Peacock => Self::peacock(),
            Palette::Mono => Self::monochrome(),
        }
    }

    /// Cyan on black with red buttons.
    #[must_use]
    pub fn color() -> Self {
        let window = Style::new(Color::Cyan, Color::Black);
        let white = Style::new(Color::White, Color::Black);
        let red = Style::new(Color::Red, Color::Black);
        Self {
            styles: [
                window,
                window,
                red,
                white,
                window.reverse(),
                Style::new(Color::Yellow, Color::Black),
                white,
                white,
                white.bold(),
                red,
                red.bold(),
            ],
            chars: BoxChars::SQUARE,
        }
    }

    /// Black on cyan.
    #[must_use]
    pub fn peacock() -> Self {
        let window = Style::new(Color::Black, Color::Cyan);
        let pressed = Style::new(Color::Black, Color::White);
        let title = Style::new(Color::White, Color::Cyan);
        let hot = Style::new(Color::Red, Color::Cyan);
        Self {
            styles: [
                window,
                window,
                Style::new(Color::Cyan, Color::Black),
                pressed,
                pressed,
                Style::new(Color::Yellow, Color::Cyan),
                title,
                title,
                title.bold(),
                hot,
                hot.bold(),
            ],
            chars: BoxChars::SQUARE,
        }
    }

    /// Attributes only.
    #[must_use]
    pub fn monochrome() -> Self {
        let plain = Style::PLAIN;
        let standout = Style::PLAIN.reverse();
        Self {
            styles: [
                plain,
                plain,
                plain,
                standout,
                standout,
                plain,
                plain,
                plain.bold(),
                plain,
                standout,
                plain.bold(),
            ],
            chars: BoxChars::SQUARE,
        }
    }

    /// Style for a role.
    #[must_use]
    pub const fn style(&self, role: Role) -> Style {
        self.styles[role.index()]
    }

    /// Override one role.
    #[must_use]
    pub const fn with_style(mut self, role: Role, style: Style) -> Self {
        self.styles[role.index()] = style;
        self
    }

    /// Frame characters.
    #[must_use]
    pub const fn chars(&self) -> &BoxChars {
        &self.chars
    }

    /// Use a different frame character set.
    #[must_use]
    pub const fn with_chars(mut self, chars: BoxChars) -> Self {
        self.chars = chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleFlags;

    #[test]
    fn palette_parses_aliases() {
        assert_eq!("Peacock".parse::<Palette>(), Ok(Palette::Peacock));
        assert_eq!("monochrome".parse::<Palette>(), Ok(Palette::Mono));
        assert_eq!(" colour ".parse::<Palette>(), Ok(Palette::Color));
        assert!("plaid".parse::<Palette>().is_err());
    }

    #[test]
    fn color_scheme_roles() {
        let t = Theme::color();
        assert_eq!(t.style(Role::Window), Style::new(Color::Cyan, Color::Black));
        assert!(t.style(Role::Selected).flags.contains(StyleFlags::REVERSE));
        assert!(t.style(Role::Error).flags.contains(StyleFlags::BOLD));
        assert_eq!(t.style(Role::Button).fg, Color::Red);
    }

    #[test]
    fn mono_uses_attributes_only() {
        let t = Theme::monochrome();
        for role in Role::ALL {
            let s = t.style(role);
            assert_eq!((s.fg, s.bg), (Color::Reset, Color::Reset), "{role:?}");
        }
        assert!(t.style(Role::Pressed).flags.contains(StyleFlags::REVERSE));
    }

    #[test]
    fn override_one_role() {
        let t = Theme::color().with_style(Role::Title, Style::PLAIN);
        assert_eq!(t.style(Role::Title), Style::PLAIN);
        assert_eq!(t.style(Role::Window), Theme::color().style(Role::Window));
    }
}
