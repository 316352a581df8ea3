#![forbid(unsafe_code)]

//! Form geometry.
//!
//! [`plan`] turns a chain and a [`Form`] description into the window a
//! form occupies and the origin its items are drawn relative to. Along the
//! way it centres free-floating items (negative `x`) and lays buttons out
//! on the bottom row.
//!
//! Window anatomy, top to bottom: the frame row carrying the title, the
//! prompt rows, the items, then (with buttons) a divider row and the
//! button row, then the bottom frame row. A fancy form adds an embossed
//! inner frame around the items, one cell in from the outer frame.

use ndialog_core::geometry::Rect;
use ndialog_core::measure;

use crate::chain::{Chain, ObjId};
use crate::error::{Error, Result};
use crate::form::{Form, FormFlags};
use crate::object::cells;

/// Where a form goes and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Screen rectangle of the form's window.
    pub window: Rect,
    /// Window cell of form coordinate (0, 0).
    pub origin: (i32, i32),
    /// Window width.
    pub width: i32,
    /// Window depth.
    pub depth: i32,
    /// The form covers the screen and has no frame.
    pub whole_screen: bool,
    /// An embossed inner frame is drawn.
    pub fancy: bool,
    /// A divider and button row are reserved.
    pub has_buttons: bool,
    pub prompt_width: i32,
    pub prompt_depth: i32,
}

fn prompt_size(form: &Form) -> (i32, i32) {
    let prompt = form.prompt().unwrap_or("");
    let to_i32 = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
    (
        to_i32(measure::str_width(prompt)),
        to_i32(measure::str_depth(prompt)),
    )
}

/// Smallest window that holds every non-button item at its natural size,
/// the prompt, the title, the button rows, and the frame.
#[must_use]
pub fn minimum_size(chain: &Chain, form: &Form) -> (i32, i32) {
    let mut width = 0;
    let mut depth = 0;
    let mut buttons = false;
    for (_, obj) in chain.iter() {
        if obj.is_button() {
            buttons = true;
            continue;
        }
        let (dx, dy) = obj.natural_size();
        let (x, y) = obj.layout_origin();
        width = width.max(if x >= 0 { x + dx } else { dx });
        depth = depth.max(y + dy);
    }
    if buttons {
        // divider and button row
        depth += 2;
    }
    let (prompt_width, prompt_depth) = prompt_size(form);
    width = width.max(prompt_width);
    if let Some(title) = form.title() {
        width = width.max(cells(title));
    }
    depth += prompt_depth;
    (width + 2, depth + 2)
}

/// Size the form, centre floating items, and place the buttons.
///
/// # Errors
///
/// [`Error::Overflow`] when the form does not fit the screen, an explicit
/// size is smaller than the items need, or the buttons do not fit a form
/// of explicit width.
pub fn plan(chain: &mut Chain, form: &Form, screen: (i32, i32)) -> Result<Layout> {
    let (cols, rows) = screen;
    let (prompt_width, prompt_depth) = prompt_size(form);
    let mut origin = (1, 1 + prompt_depth);
    let whole_screen = form.width() == 0 && form.depth() == 0;

    let (min_width, min_depth) = minimum_size(chain, form);
    let auto_width = form.width() < 0;
    let (mut width, depth) = if whole_screen {
        (cols, rows)
    } else {
        let width = if auto_width { min_width } else { form.width() };
        let depth = if form.depth() < 0 { min_depth } else { form.depth() };
        if width < min_width || depth < min_depth {
            return Err(Error::Overflow {
                needed: (min_width, min_depth),
                available: (width, depth),
            });
        }
        (width, depth)
    };

    let buttons: Vec<ObjId> = chain
        .iter()
        .filter(|(_, obj)| obj.is_button())
        .map(|(id, _)| id)
        .collect();
    let has_buttons = !buttons.is_empty();
    if has_buttons {
        let count = i32::try_from(buttons.len()).unwrap_or(i32::MAX);
        let button_width = buttons
            .iter()
            .filter_map(|&id| chain.get(id))
            .map(|obj| obj.width() + 2)
            .max()
            .unwrap_or(0);
        if button_width > (width - 2) / count {
            let needed = button_width.saturating_mul(count).saturating_add(2);
            if !auto_width {
                return Err(Error::Overflow {
                    needed: (needed, depth),
                    available: (width, depth),
                });
            }
            ndialog_core::debug!(from = width, to = needed, "widening form for buttons");
            width = needed;
        }
    }

    if width > cols || depth > rows {
        return Err(Error::Overflow {
            needed: (width, depth),
            available: (cols, rows),
        });
    }

    let interior = if whole_screen { width } else { width - 2 };
    let fancy = form.flags().contains(FormFlags::FANCY)
        && !whole_screen
        && width < cols - 2
        && depth < rows - 2;
    let (width, depth) = if fancy {
        origin.0 += 1;
        origin.1 += 1;
        (width + 2, depth + 2)
    } else {
        (width, depth)
    };

    // Floating items are centred in the interior.
    let left = i32::from(!whole_screen) + i32::from(fancy);
    for id in chain.ids() {
        let Some(obj) = chain.get_mut(id) else { continue };
        if obj.is_button() || obj.position().0 >= 0 {
            continue;
        }
        let (natural, _) = obj.natural_size();
        let x = (left + (interior - natural) / 2 - origin.0).max(0);
        let y = obj.position().1;
        obj.set_position(x, y);
    }

    if has_buttons {
        let count = i32::try_from(buttons.len()).unwrap_or(i32::MAX);
        let spacing = (width - 2) / count;
        let row = if whole_screen { depth - 1 } else { depth - 2 };
        let mut slot = 1;
        for &id in &buttons {
            if let Some(obj) = chain.get_mut(id) {
                let label = obj.width();
                obj.place_content(slot + (spacing - label) / 2 - origin.0, row - origin.1);
            }
            slot += spacing;
        }
    }

    let fit = |n: i32| u16::try_from(n).ok();
    let window = match (
        fit((cols - width) / 2),
        fit((rows - depth) / 2),
        fit(width),
        fit(depth),
    ) {
        (Some(x), Some(y), Some(w), Some(h)) => Rect::new(x, y, w, h),
        _ => {
            return Err(Error::Overflow {
                needed: (width, depth),
                available: (cols, rows),
            });
        }
    };

    ndialog_core::debug!(
        width,
        depth,
        fancy,
        whole_screen,
        buttons = buttons.len(),
        "form laid out"
    );

    Ok(Layout {
        window,
        origin,
        width,
        depth,
        whole_screen,
        fancy,
        has_buttons,
        prompt_width,
        prompt_depth,
    })
}
