#![forbid(unsafe_code)]

//! The help browser.
//!
//! F1 on any item opens its help topic here: a `"file#label"` document
//! shown in a form of its own, a viewer above a "Done" button. Following a
//! hyperlink opens the target on top of a history stack; Escape goes back
//! one document and puts the view back where it was; Done leaves the
//! browser from any depth.
//!
//! Link targets resolve as follows: `#label` stays in the same document,
//! an absolute path is used as is, and anything else is relative to the
//! directory of the current document. Only the opening topic is looked up
//! under the screen's help root.

use std::path::{Path, PathBuf};

use crate::callback::Verdict;
use crate::chain::Chain;
use crate::error::Result;
use crate::form::{self, Form, MenuResult};
use crate::object::Obj;
use crate::screen::Screen;
use crate::text::{HelpCursor, TextView};

/// Title of a help form whose document has none.
pub const DEFAULT_TITLE: &str = "Help";

const MIN_WIDTH: i32 = 20;
const MIN_DEPTH: i32 = 3;

/// One document on the history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Visit {
    path: PathBuf,
    label: Option<String>,
    cursor: Option<HelpCursor>,
}

impl Visit {
    fn document(&self) -> String {
        let path = self.path.display();
        match &self.label {
            Some(label) => format!("{path}#{label}"),
            None => path.to_string(),
        }
    }
}

enum Shown {
    Followed { target: String, cursor: HelpCursor },
    Back,
    Done,
}

fn split(topic: &str) -> (&str, Option<String>) {
    match topic.split_once('#') {
        Some((file, label)) => (file, Some(label.to_owned())),
        None => (topic, None),
    }
}

/// Where a hyperlink in `current` leads.
fn resolve(current: &Path, target: &str) -> Visit {
    let (file, label) = split(target);
    let path = if file.is_empty() {
        current.to_path_buf()
    } else {
        let file = Path::new(file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            current
                .parent()
                .map_or_else(|| file.to_path_buf(), |dir| dir.join(file))
        }
    };
    Visit {
        path,
        label,
        cursor: None,
    }
}

/// Browse `topic` until the user is done.
///
/// Failures to build or show a help form are logged and end the browse;
/// a document that cannot be read shows as a "File Not Found" page.
pub fn browse(screen: &mut Screen<'_>, topic: &str) {
    let (file, label) = split(topic);
    let mut path = PathBuf::from(file);
    if path.is_relative() {
        if let Some(root) = screen.help_root() {
            path = root.join(path);
        }
    }
    let mut current = Visit {
        path,
        label,
        cursor: None,
    };
    let mut history: Vec<Visit> = Vec::new();

    loop {
        match show(screen, &current) {
            Ok(Shown::Followed { target, cursor }) => {
                let next = resolve(&current.path, &target);
                current.cursor = Some(cursor);
                ndialog_core::debug!(
                    from = %current.path.display(),
                    to = %next.path.display(),
                    depth = history.len() + 1,
                    "help link followed"
                );
                history.push(std::mem::replace(&mut current, next));
            }
            Ok(Shown::Back) => match history.pop() {
                Some(previous) => current = previous,
                None => return,
            },
            Ok(Shown::Done) => return,
            Err(_err) => {
                ndialog_core::warn!(error = %_err, topic, "help form failed");
                return;
            }
        }
    }
}

fn show(screen: &mut Screen<'_>, visit: &Visit) -> Result<Shown> {
    let (cols, rows) = screen.size();
    let width = (cols * 3 / 4).max(MIN_WIDTH);
    let depth = (rows - 10).max(MIN_DEPTH);

    let mut viewer = Obj::help_viewer(0, 0, width, depth, &visit.document())?
        .with_callback(|_, _| Verdict::AcceptAndExit);
    if let (Some(cursor), Some(view)) = (visit.cursor, viewer.as_text_mut()) {
        if view.set_help_cursor(cursor).is_err() {
            ndialog_core::debug!("saved help position no longer fits the page");
        }
    }
    let title = viewer
        .as_text()
        .and_then(TextView::page)
        .map(|page| page.title().trim())
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_owned();

    let mut chain = Chain::new();
    let viewer = chain.push(viewer);
    chain.push(Obj::cancel_button(0, "Done")?);

    let result = form::menu(&mut chain, screen, &Form::new().with_title(title))?;
    Ok(match result {
        MenuResult::Ok => chain
            .get(viewer)
            .and_then(Obj::as_text)
            .and_then(|view| {
                view.current_target().map(|target| Shown::Followed {
                    target: target.to_owned(),
                    cursor: view.help_cursor(),
                })
            })
            .unwrap_or(Shown::Done),
        MenuResult::Cancel => Shown::Done,
        MenuResult::Escape => Shown::Back,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndialog_core::event::{Event, KeyCode};
    use ndialog_render::headless::HeadlessSurface;

    #[test]
    fn anchors_stay_in_the_document() {
        let visit = resolve(Path::new("/help/index.html"), "#usage");
        assert_eq!(visit.path, PathBuf::from("/help/index.html"));
        assert_eq!(visit.label.as_deref(), Some("usage"));
    }

    #[test]
    fn relative_links_follow_the_current_directory() {
        let visit = resolve(Path::new("/help/topics/index.html"), "keys.html#f1");
        assert_eq!(visit.path, PathBuf::from("/help/topics/keys.html"));
        assert_eq!(visit.label.as_deref(), Some("f1"));
        let bare = resolve(Path::new("index.html"), "keys.html");
        assert_eq!(bare.path, PathBuf::from("keys.html"));
    }

    #[test]
    fn absolute_links_are_kept() {
        let visit = resolve(Path::new("/help/index.html"), "/etc/other.html");
        assert_eq!(visit.path, PathBuf::from("/etc/other.html"));
        assert_eq!(visit.label, None);
    }

    #[test]
    fn document_joins_label() {
        let visit = Visit {
            path: PathBuf::from("a/b.html"),
            label: Some("x".into()),
            cursor: None,
        };
        assert_eq!(visit.document(), "a/b.html#x");
    }

    #[test]
    fn follow_then_escape_back_out() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("index.html"),
            "<title>Index</title><a href=\"second.html\">next</a>",
        )
        .expect("write index");
        std::fs::write(
            dir.path().join("second.html"),
            "<title>Second</title>second page",
        )
        .expect("write second");

        let mut surface = HeadlessSurface::new(80, 24).with_events([
            Event::key(KeyCode::Tab),
            Event::key(KeyCode::Enter),
            Event::key(KeyCode::Escape),
            Event::key(KeyCode::Escape),
        ]);
        let mut screen = Screen::new(&mut surface).with_help_root(dir.path());
        browse(&mut screen, "index.html");
        // index, second, index again
        assert_eq!(surface.windows_opened(), 3);
        assert_eq!(surface.open_windows(), 0);
    }

    #[test]
    fn missing_document_still_opens() {
        let mut surface = HeadlessSurface::new(80, 24).with_events([Event::key(KeyCode::Escape)]);
        let mut screen = Screen::new(&mut surface);
        browse(&mut screen, "/nonexistent/help.html");
        assert_eq!(surface.windows_opened(), 1);
        assert!(surface.shows("File Not Found"));
    }
}
