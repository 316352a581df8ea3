#![forbid(unsafe_code)]

//! Command-line front end for the `dialog` binary.
//!
//! Parses args manually (no external dependencies). Shared flags come
//! first; the box flag takes every remaining argument. Box sizes below the
//! minimum are raised to it, and negative sizes mean "fit the content".

use std::fmt;

use ndialog_core::measure;
use ndialog_render::Surface;

use crate::Error;
use crate::boxes::{self, BoxSpec, ListEntry, ListKind, ListRequest};
use crate::session::Session;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
dialog: ask questions from shell scripts

USAGE:
    dialog --clear
    dialog [--title TITLE] [--clear] [--hline LINE] [--hfile FILE] BOX ARGS...

OPTIONS:
    --clear              Clear the screen when finished
    --title TITLE        Title of the dialog box
    --hline LINE         Help line shown at the bottom of the screen
    --hfile FILE         Help document opened by F1
    --help, -h           Show this help message
    --version, -V        Show version

BOXES:
    --yesno     TEXT HEIGHT WIDTH
    --msgbox    TEXT HEIGHT WIDTH
    --infobox   TEXT HEIGHT WIDTH
    --inputbox  TEXT HEIGHT WIDTH
    --textbox   FILE HEIGHT WIDTH
    --menu      TEXT HEIGHT WIDTH [TAG ITEM]...
    --checklist TEXT HEIGHT WIDTH [TAG ITEM STATUS]...
    --radiolist TEXT HEIGHT WIDTH [TAG ITEM STATUS]...

EXIT STATUS:
    0 OK or Yes, 1 Cancel or No (and usage errors), 2 Escape, 255 failure.
    Input and choices are printed on standard output.

ENVIRONMENT VARIABLES:
    NDIALOG_PALETTE      color, peacock or mono
    NO_COLOR             Force the mono palette
    NDIALOG_HELP_ROOT    Directory relative help topics are read from
    NDIALOG_MOUSE        0/off disables mouse capture
    NDIALOG_LOG          Log filter (with the tracing-json feature)";

const MIN_HEIGHT: i32 = 7;
const MIN_INFO_HEIGHT: i32 = 3;
const MIN_WIDTH: i32 = 2;

/// Exit code for a box that could not run.
pub const FAILURE: i32 = 255;

/// One of the boxes the command can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxKind {
    YesNo,
    MsgBox,
    InfoBox,
    InputBox,
    TextBox,
    Menu,
    CheckList,
    RadioList,
}

impl BoxKind {
    pub const ALL: [Self; 8] = [
        Self::YesNo,
        Self::MsgBox,
        Self::InfoBox,
        Self::InputBox,
        Self::TextBox,
        Self::Menu,
        Self::CheckList,
        Self::RadioList,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::YesNo => "yesno",
            Self::MsgBox => "msgbox",
            Self::InfoBox => "infobox",
            Self::InputBox => "inputbox",
            Self::TextBox => "textbox",
            Self::Menu => "menu",
            Self::CheckList => "checklist",
            Self::RadioList => "radiolist",
        }
    }

    fn from_flag(flag: &str) -> Option<Self> {
        let name = flag.strip_prefix("--")?;
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    const fn min_height(self) -> i32 {
        match self {
            Self::InfoBox => MIN_INFO_HEIGHT,
            _ => MIN_HEIGHT,
        }
    }
}

/// A box and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxArgs {
    pub kind: BoxKind,
    /// Prompt text, or the file for a text box.
    pub text: String,
    pub height: i32,
    pub width: i32,
    /// Tag/item pairs or tag/item/status triples.
    pub data: Vec<String>,
}

/// Everything one run of the command asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub clear: bool,
    pub title: Option<String>,
    pub hline: Option<String>,
    pub hfile: Option<String>,
    pub dialog: Option<BoxArgs>,
}

/// What the command line asks the binary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Run(Invocation),
}

/// A command line that cannot be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

fn usage(msg: impl Into<String>) -> UsageError {
    UsageError(msg.into())
}

/// Parse the arguments after the program name.
pub fn parse<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut inv = Invocation::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--clear" => inv.clear = true,
            "--title" | "--hline" | "--hfile" => {
                let value = args
                    .get(i + 1)
                    .cloned()
                    .ok_or_else(|| usage(format!("{arg} needs a value")))?;
                set_option(&mut inv, arg, value);
                i += 1;
            }
            other => {
                if let Some((flag, value)) = other.split_once('=')
                    && matches!(flag, "--title" | "--hline" | "--hfile")
                {
                    set_option(&mut inv, flag, value.to_string());
                } else if let Some(kind) = BoxKind::from_flag(other) {
                    inv.dialog = Some(box_args(kind, &args[i + 1..])?);
                    break;
                } else {
                    return Err(usage(format!("unknown argument: {other}")));
                }
            }
        }
        i += 1;
    }
    if inv.dialog.is_none() && !inv.clear {
        return Err(usage("no box requested"));
    }
    Ok(Command::Run(inv))
}

fn set_option(inv: &mut Invocation, flag: &str, value: String) {
    match flag {
        "--title" => inv.title = Some(value),
        "--hline" => inv.hline = Some(value),
        _ => inv.hfile = Some(value),
    }
}

fn box_args(kind: BoxKind, rest: &[String]) -> Result<BoxArgs, UsageError> {
    let count = rest.len();
    let ok = match kind {
        BoxKind::Menu => count >= 5 && count % 2 == 1,
        BoxKind::CheckList | BoxKind::RadioList => count >= 6 && count % 3 == 0,
        _ => count == 3,
    };
    if !ok {
        let tail = match kind {
            BoxKind::Menu => " [TAG ITEM]...",
            BoxKind::CheckList | BoxKind::RadioList => " [TAG ITEM STATUS]...",
            _ => "",
        };
        let first = if kind == BoxKind::TextBox { "FILE" } else { "TEXT" };
        return Err(usage(format!(
            "usage: dialog --{} {first} HEIGHT WIDTH{tail}",
            kind.name()
        )));
    }
    Ok(BoxArgs {
        kind,
        text: rest[0].clone(),
        height: size_arg(&rest[1], kind.min_height())?,
        width: size_arg(&rest[2], MIN_WIDTH)?,
        data: rest[3..].to_vec(),
    })
}

/// Negative sizes pass through; others are raised to `min`.
fn size_arg(arg: &str, min: i32) -> Result<i32, UsageError> {
    let n: i32 = arg
        .trim()
        .parse()
        .map_err(|_| usage(format!("not a size: {arg}")))?;
    Ok(if n < 0 { n } else { n.max(min) })
}

/// Exit code and standard output of one box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    pub output: Option<String>,
}

impl Outcome {
    const fn code(code: i32) -> Self {
        Self { code, output: None }
    }
}

/// Show the requested box on `session`.
///
/// Failures other than Escape are announced in an error box and reported
/// as [`FAILURE`].
pub fn run_box<S: Surface>(session: &mut Session<S>, inv: &Invocation, args: &BoxArgs) -> Outcome {
    let mut spec = BoxSpec::new(args.text.clone()).with_size(args.width, args.height);
    spec.title = inv.title.clone();
    spec.help = inv.hfile.clone();
    if inv.hline.is_some() {
        session.set_helpline(inv.hline.as_deref());
    }

    let mut screen = session.screen();
    let result = show(&mut screen, &spec, args);
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(Error::Escaped) => Outcome::code(2),
        Err(err) => {
            let message = format!("dialog --{} failed", args.kind.name());
            if let Err(_shown) = boxes::error_box(&mut screen, &message, Some(&err as &dyn std::error::Error)) {
                ndialog_core::warn!(error = %_shown, "could not show the error box");
            }
            Outcome::code(FAILURE)
        }
    };
    ndialog_core::debug!(kind = args.kind.name(), code = outcome.code, "box finished");
    outcome
}

fn show(
    screen: &mut ndialog_widgets::Screen<'_>,
    spec: &BoxSpec,
    args: &BoxArgs,
) -> crate::Result<Outcome> {
    let yes_no = |yes: bool| Outcome::code(if yes { 0 } else { 1 });
    match args.kind {
        BoxKind::YesNo => boxes::yesno(screen, spec).map(yes_no),
        BoxKind::MsgBox => boxes::mesgbox(screen, spec).map(|()| Outcome::code(0)),
        BoxKind::InfoBox => boxes::infobox(screen, spec).map(|()| Outcome::code(0)),
        BoxKind::TextBox => {
            let spec = BoxSpec {
                prompt: Some(args.text.clone()),
                ..spec.clone()
            };
            boxes::textbox(screen, &spec, std::path::Path::new(&args.text)).map(yes_no)
        }
        BoxKind::InputBox => Ok(match boxes::inputbox(screen, spec, "")? {
            Some(text) => Outcome {
                code: 0,
                output: Some(text),
            },
            None => Outcome::code(1),
        }),
        BoxKind::Menu | BoxKind::CheckList | BoxKind::RadioList => {
            let (kind, entries) = list_entries(args);
            let request = ListRequest::new(kind, &entries).with_list_height(list_height(spec));
            let choice = boxes::list(screen, spec, &request)?;
            Ok(if choice.confirmed {
                Outcome {
                    code: 0,
                    output: Some(choice.text()),
                }
            } else {
                Outcome::code(1)
            })
        }
    }
}

fn list_entries(args: &BoxArgs) -> (ListKind, Vec<ListEntry>) {
    match args.kind {
        BoxKind::Menu => (
            ListKind::Menu,
            args.data
                .chunks_exact(2)
                .map(|pair| ListEntry::new(pair[0].clone(), pair[1].clone()))
                .collect(),
        ),
        kind => (
            if kind == BoxKind::RadioList {
                ListKind::Radio
            } else {
                ListKind::Check
            },
            args.data
                .chunks_exact(3)
                .map(|t| {
                    ListEntry::new(t[0].clone(), t[1].clone())
                        .with_on(t[2].eq_ignore_ascii_case("on"))
                })
                .collect(),
        ),
    }
}

/// Visible list rows for a box of the requested height.
///
/// An explicit height leaves room for the prompt, the list frame, the
/// button bar, and the box frame; an automatic one shows every entry.
fn list_height(spec: &BoxSpec) -> i32 {
    if spec.height <= 0 {
        return -1;
    }
    let prompt_depth = spec
        .prompt
        .as_deref()
        .map_or(0, |p| i32::try_from(measure::str_depth(p)).unwrap_or(0));
    (spec.height - prompt_depth - 6).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn run_of(list: &[&str]) -> Invocation {
        match parse(args(list)) {
            Ok(Command::Run(inv)) => inv,
            other => panic!("expected a run, got {other:?}"),
        }
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(args(&["--help"])), Ok(Command::Help));
        assert_eq!(parse(args(&["-V"])), Ok(Command::Version));
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_lists_every_box() {
        for kind in BoxKind::ALL {
            assert!(HELP_TEXT.contains(&format!("--{}", kind.name())), "{kind:?}");
        }
    }

    #[test]
    fn shared_flags_then_box() {
        let inv = run_of(&["--title", "Pick", "--clear", "--yesno", "Sure?", "8", "30"]);
        assert!(inv.clear);
        assert_eq!(inv.title.as_deref(), Some("Pick"));
        let dialog = inv.dialog.expect("box");
        assert_eq!(dialog.kind, BoxKind::YesNo);
        assert_eq!((dialog.text.as_str(), dialog.height, dialog.width), ("Sure?", 8, 30));
    }

    #[test]
    fn equals_form_is_accepted() {
        let inv = run_of(&["--hline=press F1", "--msgbox", "hi", "-1", "-1"]);
        assert_eq!(inv.hline.as_deref(), Some("press F1"));
    }

    #[test]
    fn sizes_are_raised_to_minimums() {
        let inv = run_of(&["--msgbox", "hi", "2", "1"]);
        let dialog = inv.dialog.expect("box");
        assert_eq!((dialog.height, dialog.width), (7, 2));
        let info = run_of(&["--infobox", "hi", "1", "-1"]).dialog.expect("box");
        assert_eq!((info.height, info.width), (3, -1));
    }

    #[test]
    fn argument_counts_are_checked() {
        assert!(parse(args(&["--yesno", "a", "1"])).is_err());
        assert!(parse(args(&["--menu", "t", "10", "30", "a"])).is_err());
        assert!(parse(args(&["--menu", "t", "10", "30", "a", "b", "c"])).is_err());
        assert!(parse(args(&["--menu", "t", "10", "30", "a", "alpha"])).is_ok());
        assert!(parse(args(&["--checklist", "t", "10", "30", "a", "alpha"])).is_err());
        assert!(parse(args(&["--radiolist", "t", "10", "30", "a", "alpha", "on"])).is_ok());
    }

    #[test]
    fn nothing_to_do_is_an_error() {
        assert!(parse(args(&[])).is_err());
        assert!(parse(args(&["--title", "x"])).is_err());
        assert!(parse(args(&["--title"])).is_err());
        assert!(parse(args(&["--bogus"])).is_err());
        assert!(matches!(parse(args(&["--clear"])), Ok(Command::Run(_))));
    }

    #[test]
    fn sizes_must_be_numbers() {
        assert!(parse(args(&["--msgbox", "hi", "tall", "20"])).is_err());
    }

    #[test]
    fn list_height_follows_the_box() {
        assert_eq!(list_height(&BoxSpec::new("pick")), -1);
        assert_eq!(list_height(&BoxSpec::new("pick").with_size(40, 12)), 5);
        assert_eq!(list_height(&BoxSpec::new("a\nb").with_size(40, 7)), 1);
    }

    #[test]
    fn list_triples_read_status() {
        let dialog = BoxArgs {
            kind: BoxKind::CheckList,
            text: String::new(),
            height: -1,
            width: -1,
            data: args(&["a", "alpha", "ON", "b", "beta", "off"]),
        };
        let (kind, entries) = list_entries(&dialog);
        assert_eq!(kind, ListKind::Check);
        assert!(entries[0].on);
        assert!(!entries[1].on);
    }
}
