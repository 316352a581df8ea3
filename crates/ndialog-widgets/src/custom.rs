#![forbid(unsafe_code)]

//! Third-party widget kinds.
//!
//! Built-in kinds are a closed enum. A program that needs something else
//! registers a kind name in a [`Registry`] and implements
//! [`CustomWidget`]; the form engine then draws, edits, and sizes the
//! widget through the trait like any other object.

use std::fmt;

use ndialog_core::geometry::Region;

use crate::error::{Error, Result};
use crate::object::{Decor, Kind, Obj};
use crate::screen::{Canvas, Display, EditCode, Pointer, Screen};

/// Slots in a registry, built-ins included.
pub const REGISTRY_CAPACITY: usize = 50;

const BUILT_IN: [&str; 8] = [
    "string",
    "check",
    "button",
    "list",
    "gauge",
    "text",
    "list-editor",
    "indexed-menu",
];

/// Handle of a registered kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(u16);

impl KindId {
    #[must_use]
    pub const fn index(self) -> u16 {
        self.0
    }
}

/// Table of widget kind names.
#[derive(Debug, Clone)]
pub struct Registry {
    names: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding the built-in kinds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: BUILT_IN.iter().map(|&name| name.to_owned()).collect(),
        }
    }

    /// Register a kind; registering a known name returns its handle.
    pub fn register(&mut self, name: &str) -> Result<KindId> {
        if let Some(id) = self.lookup(name) {
            return Ok(id);
        }
        if self.names.len() >= REGISTRY_CAPACITY {
            ndialog_core::warn!(kind = name, "widget registry full");
            return Err(Error::RegistryFull);
        }
        self.names.push(name.to_owned());
        let index = u16::try_from(self.names.len() - 1).map_err(|_| Error::RegistryFull)?;
        Ok(KindId(index))
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<KindId> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| u16::try_from(i).ok())
            .map(KindId)
    }

    pub fn name(&self, id: KindId) -> Result<&str> {
        self.names
            .get(usize::from(id.0))
            .map(String::as_str)
            .ok_or(Error::UnknownKind(id.0))
    }

    /// Whether `id` names a kind added by [`Registry::register`].
    #[must_use]
    pub fn is_custom(&self, id: KindId) -> bool {
        usize::from(id.0) >= BUILT_IN.len() && usize::from(id.0) < self.names.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Behaviour of a custom widget.
pub trait CustomWidget {
    /// Identification string.
    fn id(&self) -> &str;

    /// Draw the content into `area` (form coordinates).
    fn draw(&self, area: Region, focused: bool, canvas: &mut Canvas<'_>);

    /// Take input until focus should move on.
    fn edit(
        &mut self,
        area: Region,
        screen: &mut Screen<'_>,
        display: &Display,
        entry: Option<Pointer>,
    ) -> EditCode;

    /// Content size for layout, given the size the object was made with.
    fn size(&self, width: i32, depth: i32) -> (i32, i32) {
        (width, depth)
    }

    fn cursor(&self) -> Option<usize> {
        None
    }

    fn set_cursor(&mut self, _pos: usize) -> Result<()> {
        Err(Error::Range)
    }
}

/// A custom widget with its registered kind.
pub struct CustomKind {
    kind: KindId,
    widget: Box<dyn CustomWidget>,
}

impl fmt::Debug for CustomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomKind")
            .field("kind", &self.kind)
            .field("id", &self.widget.id())
            .finish()
    }
}

impl CustomKind {
    #[must_use]
    pub const fn kind(&self) -> KindId {
        self.kind
    }

    #[must_use]
    pub fn widget(&self) -> &dyn CustomWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn CustomWidget {
        self.widget.as_mut()
    }
}

impl Obj {
    /// Wrap a custom widget of a registered kind.
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        registry: &Registry,
        kind: KindId,
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        widget: Box<dyn CustomWidget>,
        decor: Decor,
    ) -> Result<Self> {
        if !registry.is_custom(kind) {
            return Err(Error::UnknownKind(kind.0));
        }
        if width < 0 || depth < 0 {
            return Err(Error::InvalidArgument("custom widget needs a size"));
        }
        Ok(Self::base(
            Kind::Custom(Box::new(CustomKind { kind, widget })),
            x,
            y,
            width,
            depth,
            decor,
        ))
    }
}

pub(crate) fn edit(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    entry: Option<Pointer>,
) -> EditCode {
    let area = obj.content_area();
    match &mut obj.kind {
        Kind::Custom(custom) => custom.widget.edit(area, screen, display, entry),
        _ => EditCode::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndialog_render::Role;

    struct Spinner {
        value: usize,
    }

    impl CustomWidget for Spinner {
        fn id(&self) -> &str {
            "spinner"
        }

        fn draw(&self, area: Region, _focused: bool, canvas: &mut Canvas<'_>) {
            let style = canvas.style(Role::Widget);
            canvas.put_str(area.x, area.y, &self.value.to_string(), style);
        }

        fn edit(
            &mut self,
            _area: Region,
            _screen: &mut Screen<'_>,
            _display: &Display,
            _entry: Option<Pointer>,
        ) -> EditCode {
            self.value += 1;
            EditCode::Tab
        }

        fn size(&self, width: i32, _depth: i32) -> (i32, i32) {
            (width, 1)
        }

        fn cursor(&self) -> Option<usize> {
            Some(self.value)
        }

        fn set_cursor(&mut self, pos: usize) -> Result<()> {
            self.value = pos;
            Ok(())
        }
    }

    #[test]
    fn builtins_are_preregistered() {
        let reg = Registry::new();
        assert_eq!(reg.len(), BUILT_IN.len());
        assert_eq!(reg.lookup("list").map(KindId::index), Some(3));
        assert!(!reg.is_custom(KindId(0)));
    }

    #[test]
    fn register_is_idempotent_and_bounded() {
        let mut reg = Registry::new();
        let a = reg.register("spinner").expect("room");
        assert_eq!(reg.register("spinner").expect("known"), a);
        assert_eq!(reg.name(a).expect("known"), "spinner");
        for i in reg.len()..REGISTRY_CAPACITY {
            reg.register(&format!("kind{i}")).expect("room");
        }
        assert!(matches!(reg.register("one-too-many"), Err(Error::RegistryFull)));
        assert!(matches!(reg.name(KindId(60)), Err(Error::UnknownKind(60))));
    }

    #[test]
    fn custom_objects_dispatch_through_the_trait() {
        let mut reg = Registry::new();
        let kind = reg.register("spinner").expect("room");
        let mut obj = Obj::custom(
            &reg,
            kind,
            0,
            0,
            5,
            3,
            Box::new(Spinner { value: 7 }),
            Decor::new(),
        )
        .expect("registered");
        assert_eq!(obj.id(), "spinner");
        assert_eq!(obj.natural_size(), (5, 1));
        assert_eq!(obj.cursor(), Some(7));
        obj.set_cursor(2).expect("settable");
        assert_eq!(obj.cursor(), Some(2));
        assert!(matches!(
            Obj::custom(&reg, KindId(1), 0, 0, 1, 1, Box::new(Spinner { value: 0 }), Decor::new()),
            Err(Error::UnknownKind(1))
        ));
    }
}
