#![forbid(unsafe_code)]

//! Commit callbacks.

use crate::object::Obj;
use crate::screen::Screen;

/// What a commit callback decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Undo the tentative change and keep editing.
    Reject,
    /// Keep the change and carry on with the form.
    Accept,
    /// Keep the change and close the form as if confirmed.
    AcceptAndExit,
}

impl Verdict {
    /// Read a signed return code: zero rejects, positive accepts, negative
    /// exits.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        if code == 0 {
            Self::Reject
        } else if code > 0 {
            Self::Accept
        } else {
            Self::AcceptAndExit
        }
    }

    /// The signed code for this verdict.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Reject => 0,
            Self::Accept => 1,
            Self::AcceptAndExit => -1,
        }
    }
}

/// Called when the user commits a value.
///
/// The callback receives the object being edited, so it can inspect or
/// adjust its content, and the screen, so it can open nested forms.
pub type Callback = Box<dyn FnMut(&mut Obj, &mut Screen<'_>) -> Verdict>;

/// Run an object's callback; objects without one accept everything.
pub(crate) fn run(obj: &mut Obj, screen: &mut Screen<'_>) -> Verdict {
    let Some(mut callback) = obj.callback.take() else {
        return Verdict::Accept;
    };
    let verdict = callback(obj, screen);
    // The callback may have installed a replacement.
    if obj.callback.is_none() {
        obj.callback = Some(callback);
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_verdicts() {
        assert_eq!(Verdict::from_code(0), Verdict::Reject);
        assert_eq!(Verdict::from_code(7), Verdict::Accept);
        assert_eq!(Verdict::from_code(-3), Verdict::AcceptAndExit);
        for v in [Verdict::Reject, Verdict::Accept, Verdict::AcceptAndExit] {
            assert_eq!(Verdict::from_code(v.code()), v);
        }
    }
}
