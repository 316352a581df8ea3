#![forbid(unsafe_code)]

//! Progress gauges.

use ndialog_render::Role;

use crate::binding::Binding;
use crate::error::{Error, Result};
use crate::object::{Decor, Kind, Obj};
use crate::screen::Canvas;

/// A bar filled in proportion to a bound percentage.
#[derive(Debug, Clone)]
pub struct Gauge {
    percent: Binding<i32>,
}

impl Gauge {
    #[must_use]
    pub const fn value(&self) -> &Binding<i32> {
        &self.percent
    }

    /// Current percentage, clamped to 0..=100.
    #[must_use]
    pub fn percent(&self) -> i32 {
        self.percent.get().clamp(0, 100)
    }

    pub(crate) fn rebind(&mut self, percent: Binding<i32>) {
        self.percent = percent;
    }

    /// Cells of a `width`-cell bar that are filled.
    #[must_use]
    pub fn filled(&self, width: i32) -> i32 {
        width * self.percent() / 100
    }
}

impl Obj {
    /// A one-row gauge. Gauges never take focus.
    pub fn gauge(x: i32, y: i32, width: i32, percent: Binding<i32>, decor: Decor) -> Result<Self> {
        if width <= 0 {
            return Err(Error::InvalidArgument("gauge needs a positive width"));
        }
        Ok(Self::base(Kind::Gauge(Gauge { percent }), x, y, width, 1, decor).read_only())
    }
}

pub(crate) fn draw(obj: &Obj, gauge: &Gauge, canvas: &mut Canvas<'_>) {
    obj.draw_decor(canvas);
    let area = obj.content_area();
    let style = canvas.style(Role::Widget);
    canvas.blank(area.x, area.y, area.width, style);
    let pct = gauge.percent();
    if area.width > 4 {
        let label = format!("{pct}%");
        let len = crate::object::cells(&label);
        canvas.put_str(area.x + (area.width - len) / 2, area.y, &label, style);
    }
    for dx in 0..gauge.filled(area.width) {
        canvas.restyle(area.x + dx, area.y, style.reverse());
    }
}
