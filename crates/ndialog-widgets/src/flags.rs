#![forbid(unsafe_code)]

//! Object flag words.
//!
//! One 32-bit word per object, split into three disjoint ranges:
//!
//! | Range | Bits | Holds |
//! |-------|------|-------|
//! | meta | `0xFF00_0000` | how the object is owned |
//! | generic | `0x00FF_0000` | state every kind shares |
//! | subclass | `0x0000_FFFF` | per-kind options |
//!
//! Subclass bits of different kinds may reuse the same values.

use bitflags::bitflags;

bitflags! {
    /// Flags carried by every object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjFlags: u32 {
        /// Sub-widget of a composite; drawn and edited by its owner.
        const EMBEDDED       = 0x0100_0000;

        /// Accepts focus.
        const WRITABLE       = 0x0001_0000;
        /// Needs a redraw after the current dispatch.
        const WRITTEN        = 0x0002_0000;
        /// Neither drawn nor focused.
        const HIDDEN         = 0x0004_0000;
        /// Holds focus.
        const CURRENT        = 0x0008_0000;
        /// A button being pressed.
        const CLICKED        = 0x0010_0000;
        /// Content changed since focus arrived.
        const DIRTY          = 0x0020_0000;

        /// String: echo `*` instead of the text.
        const PASSWORD       = 0x0001;
        /// String: typing inserts instead of overwriting.
        const INSERT         = 0x0002;

        /// List: show item identifiers.
        const SHOW_IDS       = 0x0004;
        /// List: letters do not jump to items.
        const NO_HOTKEYS     = 0x0008;
        /// List: refuse a width narrower than the items.
        const DONT_CLIP      = 0x0010;
        /// List: Backspace and Delete toggle.
        const DEL_LIST       = 0x0020;
        /// List: highlight the current item even without focus.
        const ALWAYS_HIGHLIT = 0x0040;
        /// List: Return and Space toggle.
        const CR_LIST        = 0x0080;
        /// List: exactly one item selected.
        const RADIO_LIST     = 0x0100;
        /// List: selecting an item commits it.
        const MENU_LIST      = 0x0200;
    }
}

impl ObjFlags {
    /// Mask of the meta range.
    pub const META_MASK: u32 = 0xFF00_0000;
    /// Mask of the generic range.
    pub const GENERIC_MASK: u32 = 0x00FF_0000;
    /// Mask of the subclass range.
    pub const SUBCLASS_MASK: u32 = 0x0000_FFFF;

    /// The meta bits alone.
    #[must_use]
    pub const fn meta(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::META_MASK)
    }

    /// The generic bits alone.
    #[must_use]
    pub const fn generic(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::GENERIC_MASK)
    }

    /// The subclass bits alone.
    #[must_use]
    pub const fn subclass(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::SUBCLASS_MASK)
    }
}

bitflags! {
    /// Display options a caller passes when building a list.
    ///
    /// The low two bits pick the rendering: none for a checklist,
    /// [`ListStyle::HIGHLIGHT`] or [`ListStyle::MENU`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListStyle: u32 {
        const HIGHLIGHT      = 0x01;
        const MENU           = 0x02;
        const SHOW_IDS       = 0x04;
        const NO_HOTKEYS     = 0x08;
        const DONT_CLIP      = 0x10;
        const DEL_LIST       = 0x20;
        const ALWAYS_HIGHLIT = 0x40;
        const CR_LIST        = 0x80;
    }
}

/// How list items are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListMode {
    /// `[X] item` rows.
    #[default]
    Check,
    /// Arrows around the current row.
    Highlight,
    /// A selection bar.
    Menu,
}

impl ListStyle {
    /// Rendering picked by the low bits.
    #[must_use]
    pub fn mode(self) -> ListMode {
        match self.bits() & 0x03 {
            0x01 => ListMode::Highlight,
            0x02 => ListMode::Menu,
            _ => ListMode::Check,
        }
    }

    /// The options that carry over into object flags.
    #[must_use]
    pub fn object_flags(self) -> ObjFlags {
        ObjFlags::from_bits_retain(self.bits() & 0xFC)
    }
}

/// What pressing a button means to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonRole {
    /// Return commits and moves on.
    #[default]
    Regular,
    /// Return closes the form with [`MenuResult::Ok`](crate::MenuResult::Ok).
    Confirm,
    /// Return closes the form with [`MenuResult::Cancel`](crate::MenuResult::Cancel).
    Cancel,
}
