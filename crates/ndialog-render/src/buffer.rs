#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! A [`Buffer`] is the backing store of one window. Widgets address it with
//! signed window-relative coordinates; anything outside the grid is clipped
//! silently, so a widget partly off its window never panics.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. A wide glyph is always followed by exactly one continuation cell; a
//!    glyph that would straddle the right edge is not drawn

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, Style};

/// A 2D grid of cells.
///
/// # Example
///
/// ```
/// use ndialog_render::buffer::Buffer;
/// use ndialog_render::cell::Style;
///
/// let mut buffer = Buffer::new(10, 2);
/// let end = buffer.put_str(1, 0, "Hi", Style::PLAIN);
/// assert_eq!(end, 3);
/// assert_eq!(buffer.row_text(0), " Hi       ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer of blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::default())
    }

    /// Create a buffer with every cell set to `cell`.
    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at a position, if inside the grid.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at a position, if inside the grid.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set one cell; out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Change the style of one cell, keeping its character.
    pub fn restyle(&mut self, x: i32, y: i32, style: Style) {
        if let Some(slot) = self.get_mut(x, y) {
            slot.style = style;
        }
    }

    /// Draw a string starting at `(x, y)`.
    ///
    /// Returns the column after the last cell written (or skipped by
    /// clipping), which is where the next string would continue.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: Style) -> i32 {
        self.put_str_max(x, y, s, style, usize::MAX)
    }

    /// Draw at most `max` cells of a string.
    pub fn put_str_max(&mut self, x: i32, y: i32, s: &str, style: Style, max: usize) -> i32 {
        let mut col = x;
        let mut used = 0usize;
        for grapheme in s.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme);
            if w == 0 {
                continue;
            }
            if used + w > max {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            if w == 2 && col + 1 >= i32::from(self.width) {
                // Would straddle the right edge.
                self.set(col, y, Cell::blank(style));
            } else {
                self.set(col, y, Cell::new(ch, style));
                if w == 2 {
                    self.set(col + 1, y, Cell::CONTINUATION);
                }
            }
            col += w as i32;
            used += w;
        }
        col
    }

    /// Draw one character; returns the columns it occupies.
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: Style) -> i32 {
        let mut tmp = [0u8; 4];
        self.put_str(x, y, ch.encode_utf8(&mut tmp), style) - x
    }

    /// Fill a rectangle; clipped to the grid.
    pub fn fill(&mut self, x: i32, y: i32, width: i32, height: i32, cell: Cell) {
        for row in y..y + height {
            for col in x..x + width {
                self.set(col, row, cell);
            }
        }
    }

    /// Blank every cell with `style`.
    pub fn clear(&mut self, style: Style) {
        self.cells.fill(Cell::blank(style));
    }

    /// Copy `src` onto this buffer with its origin at `(x, y)`.
    pub fn blit(&mut self, src: &Buffer, x: i32, y: i32) {
        for row in 0..i32::from(src.height) {
            for col in 0..i32::from(src.width) {
                if let Some(cell) = src.get(col, row) {
                    self.set(x + col, y + row, *cell);
                }
            }
        }
    }

    /// Text of one row with continuation cells removed.
    #[must_use]
    pub fn row_text(&self, y: i32) -> String {
        (0..i32::from(self.width))
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    /// Text of every row.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..i32::from(self.height)).map(|y| self.row_text(y)).collect()
    }

    /// Iterate `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| ((i % width as usize) as u16, (i / width as usize) as u16, c))
    }
}
