#![forbid(unsafe_code)]

//! Box drawing.
//!
//! Dialog frames get a cheap 3-D look by drawing the top and left edges in a
//! "sunlight" style and the bottom and right edges in a "shade" style. A box
//! may carry a horizontal divider (the line above a button bar) joined to
//! the sides with tee pieces.

use crate::buffer::Buffer;
use crate::cell::{Cell, Style};

/// Characters used to draw frames, dividers and scroll arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub left_tee: char,
    pub right_tee: char,
    pub left_arrow: char,
    pub right_arrow: char,
}

impl BoxChars {
    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        left_tee: '├',
        right_tee: '┤',
        left_arrow: '<',
        right_arrow: '>',
    };

    /// ASCII-only frame.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
        left_tee: '+',
        right_tee: '+',
        left_arrow: '<',
        right_arrow: '>',
    };
}

/// Geometry and styling of one framed box.
#[derive(Debug, Clone, Copy)]
pub struct FrameSpec {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Row (relative to the box top) of a divider; 0 means none.
    pub slice: i32,
    pub sunlight: Style,
    pub shade: Style,
    /// Style the interior is blanked with.
    pub fill: Style,
}

/// Draw a framed box, blanking its interior.
pub fn draw_box(buf: &mut Buffer, spec: &FrameSpec, chars: &BoxChars) {
    let right = spec.width - 1;
    let bottom = spec.height - 1;
    for i in 0..spec.height {
        let y = spec.y + i;
        for j in 0..spec.width {
            let x = spec.x + j;
            let (ch, style) = if i == 0 {
                if j == 0 {
                    (chars.top_left, spec.sunlight)
                } else if j == right {
                    (chars.top_right, spec.shade)
                } else {
                    (chars.horizontal, spec.sunlight)
                }
            } else if i == bottom {
                if j == 0 {
                    (chars.bottom_left, spec.sunlight)
                } else if j == right {
                    (chars.bottom_right, spec.shade)
                } else {
                    (chars.horizontal, spec.shade)
                }
            } else if i == spec.slice {
                if j == 0 {
                    (chars.left_tee, spec.sunlight)
                } else if j == right {
                    (chars.right_tee, spec.shade)
                } else {
                    (chars.horizontal, spec.sunlight)
                }
            } else if j == 0 {
                (chars.vertical, spec.sunlight)
            } else if j == right {
                (chars.vertical, spec.shade)
            } else {
                (' ', spec.fill)
            };
            buf.set(x, y, Cell::new(ch, style));
        }
    }
}

/// Draw a horizontal run of `ch`.
pub fn hline(buf: &mut Buffer, x: i32, y: i32, width: i32, ch: char, style: Style) {
    for col in x..x + width {
        buf.set(col, y, Cell::new(ch, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Color;

    fn spec(width: i32, height: i32, slice: i32) -> FrameSpec {
        FrameSpec {
            x: 0,
            y: 0,
            width,
            height,
            slice,
            sunlight: Style::PLAIN,
            shade: Style::PLAIN,
            fill: Style::PLAIN,
        }
    }

    #[test]
    fn plain_box() {
        let mut b = Buffer::new(4, 3);
        draw_box(&mut b, &spec(4, 3, 0), &BoxChars::ASCII);
        assert_eq!(b.lines(), vec!["+--+", "|  |", "+--+"]);
    }

    #[test]
    fn box_with_divider() {
        let mut b = Buffer::new(4, 5);
        draw_box(&mut b, &spec(4, 5, 2), &BoxChars::SQUARE);
        assert_eq!(b.lines(), vec!["┌──┐", "│  │", "├──┤", "│  │", "└──┘"]);
    }

    #[test]
    fn shade_lands_on_bottom_right() {
        let shade = Style::new(Color::White, Color::Black).bold();
        let mut b = Buffer::new(3, 3);
        draw_box(
            &mut b,
            &FrameSpec {
                shade,
                ..spec(3, 3, 0)
            },
            &BoxChars::ASCII,
        );
        assert_eq!(b.get(2, 0).map(|c| c.style), Some(shade));
        assert_eq!(b.get(1, 2).map(|c| c.style), Some(shade));
        assert_eq!(b.get(0, 1).map(|c| c.style), Some(Style::PLAIN));
    }

    #[test]
    fn hline_draws_run() {
        let mut b = Buffer::new(5, 1);
        hline(&mut b, 1, 0, 3, '-', Style::PLAIN);
        assert_eq!(b.row_text(0), " --- ");
    }
}
