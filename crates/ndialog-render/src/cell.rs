#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] is one character position on a window: a `char` plus the
//! [`Style`] it is drawn with. Wide glyphs occupy their own cell followed by
//! [`Cell::CONTINUATION`] cells, which presenters skip.

/// The eight ANSI colours plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default colour.
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

bitflags::bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
        /// Reverse video (swap fg and bg).
        const REVERSE   = 0b0000_1000;
        /// Blinking text.
        const BLINK     = 0b0001_0000;
    }
}

/// Foreground, background and attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub flags: StyleFlags,
}

impl Style {
    /// The terminal's default style.
    pub const PLAIN: Self = Self::new(Color::Reset, Color::Reset);

    /// A colour pair without attributes.
    #[must_use]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            flags: StyleFlags::empty(),
        }
    }

    /// Add attributes.
    #[must_use]
    pub const fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Remove attributes.
    #[must_use]
    pub const fn without_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = self.flags.difference(flags);
        self
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        self.with_flags(StyleFlags::BOLD)
    }

    #[must_use]
    pub const fn dim(self) -> Self {
        self.with_flags(StyleFlags::DIM)
    }

    #[must_use]
    pub const fn reverse(self) -> Self {
        self.with_flags(StyleFlags::REVERSE)
    }

    #[must_use]
    pub const fn underline(self) -> Self {
        self.with_flags(StyleFlags::UNDERLINE)
    }
}

/// One character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Style::PLAIN)
    }
}

impl Cell {
    /// Trailing half of a wide glyph.
    pub const CONTINUATION: Self = Self {
        ch: '\0',
        style: Style::PLAIN,
    };

    /// A cell holding `ch`.
    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// A space in `style`.
    #[must_use]
    pub const fn blank(style: Style) -> Self {
        Self::new(' ', style)
    }

    /// Whether this cell is the trailing half of a wide glyph.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }
}
