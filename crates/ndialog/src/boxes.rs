#![forbid(unsafe_code)]

//! Ready-made dialog boxes.
//!
//! Each box builds a conventional chain (content plus OK/Cancel buttons),
//! runs it through [`menu`], and reads the answer back from its widgets.
//! Escape out of any box is reported as [`Error::Escaped`].
//!
//! Button labels passed as strings may carry their position in the button
//! row as an `"N:label"` prefix: `"2:OK"` and `"1:CANCEL"` put Cancel on
//! the left.

use std::fs;
use std::path::Path;

use ndialog_core::measure;
use ndialog_widgets::{
    Binding, Chain, Decor, Form, FormFlags, ListItem, ListItems, ListStyle, MenuResult, Obj,
    Screen, Verdict, menu,
};

use crate::{Error, Result};

/// Title, prompt, size and help topic shared by every box.
///
/// A width or height of `-1` sizes the box to its content; `0` takes the
/// whole screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxSpec {
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub width: i32,
    pub height: i32,
    /// Topic F1 opens from any item of the box.
    pub help: Option<String>,
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            title: None,
            prompt: None,
            width: -1,
            height: -1,
            help: None,
        }
    }
}

impl BoxSpec {
    /// An auto-sized box showing `prompt`.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_help(mut self, topic: impl Into<String>) -> Self {
        self.help = Some(topic.into());
        self
    }

    fn form(&self) -> Form {
        let mut form = Form::new().with_size(self.width, self.height);
        if let Some(title) = &self.title {
            form = form.with_title(title.clone());
        }
        if let Some(prompt) = &self.prompt {
            form = form.with_prompt(prompt.clone());
        }
        form
    }

    fn prompt_size(&self) -> (i32, i32) {
        self.prompt.as_deref().map_or((0, 0), |p| {
            (cells(measure::str_width(p)), cells(measure::str_depth(p)))
        })
    }

    fn dress(&self, obj: Obj) -> Obj {
        match &self.help {
            Some(topic) => obj.with_help(topic.clone()),
            None => obj,
        }
    }
}

fn cells(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Split an `"N:label"` button label into its order and text.
///
/// A label without `:` gets `default_order`; an unreadable number counts
/// as 0.
#[must_use]
pub fn parse_button(label: &str, default_order: i32) -> (i32, &str) {
    match label.split_once(':') {
        Some((order, text)) => (order.trim().parse().unwrap_or(0), text),
        None => (default_order, label),
    }
}

fn ok_button(spec: &BoxSpec, label: &str, default_order: i32) -> Result<Obj> {
    let (order, text) = parse_button(label, default_order);
    Ok(spec.dress(Obj::ok_button(order, text)?))
}

fn cancel_button(spec: &BoxSpec, label: &str, default_order: i32) -> Result<Obj> {
    let (order, text) = parse_button(label, default_order);
    Ok(spec.dress(Obj::cancel_button(order, text)?))
}

fn run(chain: &mut Chain, screen: &mut Screen<'_>, form: &Form) -> Result<MenuResult> {
    match menu(chain, screen, form)? {
        MenuResult::Escape => Err(Error::Escaped),
        result => Ok(result),
    }
}

// --- Announcements ---------------------------------------------------------

/// Yes/No question; `true` for yes.
pub fn yesno(screen: &mut Screen<'_>, spec: &BoxSpec) -> Result<bool> {
    yesno_with(screen, spec, "1:YES", "2:NO")
}

/// Yes/No question with custom labels.
pub fn yesno_with(
    screen: &mut Screen<'_>,
    spec: &BoxSpec,
    yes: &str,
    no: &str,
) -> Result<bool> {
    let mut chain = Chain::new();
    chain.push(ok_button(spec, yes, 1)?);
    chain.push(cancel_button(spec, no, 2)?);
    Ok(run(&mut chain, screen, &spec.form())? == MenuResult::Ok)
}

/// Show a message and wait for OK.
pub fn mesgbox(screen: &mut Screen<'_>, spec: &BoxSpec) -> Result<()> {
    let mut chain = Chain::new();
    chain.push(ok_button(spec, "  OK  ", 0)?);
    run(&mut chain, screen, &spec.form()).map(drop)
}

/// Show a message, waiting for OK only when `wait` is set.
pub fn msgbox(screen: &mut Screen<'_>, spec: &BoxSpec, wait: bool) -> Result<()> {
    if wait {
        return mesgbox(screen, spec);
    }
    run(&mut Chain::new(), screen, &spec.form()).map(drop)
}

/// Show a message and return at once.
pub fn infobox(screen: &mut Screen<'_>, spec: &BoxSpec) -> Result<()> {
    msgbox(screen, spec, false)
}

/// A plain "Message" box with an OK button.
pub fn notify(screen: &mut Screen<'_>, message: &str) -> Result<()> {
    mesgbox(screen, &BoxSpec::new(message).with_title("Message"))
}

/// Show `message` in an error-coloured box, followed by the error text.
pub fn error_box(
    screen: &mut Screen<'_>,
    message: &str,
    cause: Option<&dyn std::error::Error>,
) -> Result<()> {
    let text = match cause {
        Some(err) => format!("{message}\n{err}"),
        None => message.to_owned(),
    };
    ndialog_core::warn!(text = %text, "error box");
    let mut chain = Chain::new();
    chain.push(Obj::ok_button(0, "OK")?);
    let form = Form::new()
        .with_title("Error")
        .with_prompt(text)
        .with_flags(FormFlags::ERROR);
    menu(&mut chain, screen, &form)?;
    Ok(())
}

// --- Input -----------------------------------------------------------------

/// Ask for a line of text.
///
/// The entry is four columns narrower than the box, or than the screen
/// when the box is auto-sized. Returns the text on OK, `None` on Cancel.
pub fn inputbox(screen: &mut Screen<'_>, spec: &BoxSpec, initial: &str) -> Result<Option<String>> {
    let width = if spec.width < 0 {
        screen.size().0 - 4
    } else {
        spec.width - 4
    };
    let max_len = usize::try_from(width)
        .ok()
        .filter(|&w| w > 0)
        .ok_or(Error::Invalid("input box is too narrow"))?;
    let value = Binding::new(initial.to_owned());

    let mut chain = Chain::new();
    chain.push(spec.dress(Obj::string(
        0,
        0,
        width,
        max_len,
        value.clone(),
        Decor::framed(),
    )?));
    chain.push(ok_button(spec, "OK", 0)?);
    chain.push(cancel_button(spec, "CANCEL", 1)?);

    Ok(match run(&mut chain, screen, &spec.form())? {
        MenuResult::Ok => Some(value.get()),
        _ => None,
    })
}

/// A progress bar at `percent`; returns as soon as it is drawn.
pub fn gauge(screen: &mut Screen<'_>, spec: &BoxSpec, percent: i32) -> Result<()> {
    if spec.width < 0 {
        return Err(Error::Invalid("a gauge needs an explicit width"));
    }
    let mut chain = Chain::new();
    chain.push(Obj::gauge(
        0,
        0,
        spec.width,
        Binding::new(percent.clamp(0, 100)),
        Decor::framed(),
    )?);
    run(&mut chain, screen, &spec.form().with_size(-1, -1)).map(drop)
}

/// Page through a file. `true` when left with OK.
///
/// The viewer is `width` by `height` cells; auto dimensions fit the file
/// to the screen.
pub fn textbox(screen: &mut Screen<'_>, spec: &BoxSpec, path: &Path) -> Result<bool> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<String> = text.lines().map(|l| l.replace('\t', "        ")).collect();
    let lines = if lines.is_empty() { vec![String::new()] } else { lines };

    let (cols, rows) = screen.size();
    let (_, prompt_depth) = spec.prompt_size();
    let width = if spec.width < 0 {
        let widest = lines.iter().map(|l| cells(measure::str_width(l))).max().unwrap_or(1);
        widest.clamp(1, (cols - 6).max(1))
    } else {
        spec.width
    };
    let height = if spec.height < 0 {
        cells(lines.len()).clamp(1, (rows - 6 - prompt_depth).max(1))
    } else {
        spec.height
    };

    let mut chain = Chain::new();
    chain.push(ok_button(spec, "OK", 1)?);
    chain.push(spec.dress(Obj::text(0, 0, width, height, lines, Decor::new())?));
    chain.push(cancel_button(spec, "CANCEL", 2)?);

    let form = spec.form().with_size(-1, -1);
    Ok(run(&mut chain, screen, &form)? == MenuResult::Ok)
}

// --- Lists -----------------------------------------------------------------

/// Which list box to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Pick one entry; choosing closes the box.
    Menu,
    /// Any number of entries.
    Check,
    /// Exactly one entry.
    Radio,
}

/// One row of a list box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub tag: String,
    pub item: String,
    /// Initially selected (ignored by menus).
    pub on: bool,
}

impl ListEntry {
    #[must_use]
    pub fn new(tag: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            item: item.into(),
            on: false,
        }
    }

    #[must_use]
    pub const fn with_on(mut self, on: bool) -> Self {
        self.on = on;
        self
    }
}

/// A list box request.
#[derive(Debug, Clone)]
pub struct ListRequest<'a> {
    pub kind: ListKind,
    pub entries: &'a [ListEntry],
    /// Visible rows; `-1` shows every entry.
    pub list_height: i32,
    /// Entry the cursor starts on (and, for menus, the initial choice).
    pub current: usize,
    /// OK button label, or none for no OK button.
    pub ok: Option<&'a str>,
    /// Cancel button label, or none for no Cancel button.
    pub cancel: Option<&'a str>,
}

impl<'a> ListRequest<'a> {
    /// The conventional buttons for `kind`: menus have Cancel only.
    #[must_use]
    pub const fn new(kind: ListKind, entries: &'a [ListEntry]) -> Self {
        let ok = match kind {
            ListKind::Menu => None,
            ListKind::Check | ListKind::Radio => Some("1:  OK  "),
        };
        let cancel = match kind {
            ListKind::Menu => Some("1:CANCEL"),
            ListKind::Check | ListKind::Radio => Some("2:CANCEL"),
        };
        Self {
            kind,
            entries,
            list_height: -1,
            current: 0,
            ok,
            cancel,
        }
    }

    #[must_use]
    pub const fn with_list_height(mut self, rows: i32) -> Self {
        self.list_height = rows;
        self
    }

    #[must_use]
    pub const fn with_current(mut self, current: usize) -> Self {
        self.current = current;
        self
    }
}

/// What the user picked from a list box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Left with OK (or a menu choice) rather than Cancel.
    pub confirmed: bool,
    /// Tags of the selected entries; empty unless confirmed.
    pub selected: Vec<String>,
    /// Entry the cursor was on when the box closed.
    pub cursor: usize,
}

impl Choice {
    /// Selected tags, each followed by a newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.selected.iter().map(|tag| format!("{tag}\n")).collect()
    }
}

/// Show a menu, checklist, or radio list.
///
/// # Errors
///
/// [`Error::Invalid`] when a radio list does not have exactly one entry
/// on, or when an explicit box size cannot hold the list, prompt, and
/// buttons.
pub fn list(screen: &mut Screen<'_>, spec: &BoxSpec, request: &ListRequest<'_>) -> Result<Choice> {
    let kind = request.kind;
    let items: ListItems = request
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let on = match kind {
                ListKind::Menu => idx == request.current,
                ListKind::Check | ListKind::Radio => entry.on,
            };
            ListItem::new(entry.tag.clone(), entry.item.clone()).with_selected(on)
        })
        .collect();

    if kind == ListKind::Radio && items.selected().len() != 1 {
        return Err(Error::Invalid("a radio list needs exactly one entry on"));
    }
    check_fit(spec, request)?;

    let style = ListStyle::SHOW_IDS;
    let depth = request.list_height;
    let list = match kind {
        ListKind::Menu => Obj::menu_list(-1, 0, -1, depth, items, Decor::framed(), style)?
            .with_callback(|_, _| Verdict::AcceptAndExit),
        ListKind::Radio => Obj::radio_list(-1, 0, -1, depth, items, Decor::framed(), style)?,
        ListKind::Check => Obj::list(-1, 0, -1, depth, items, Decor::framed(), style)?,
    };
    let mut list = spec.dress(list);
    if request.current < request.entries.len() {
        list.set_cursor(request.current)?;
    }

    let mut chain = Chain::new();
    let id = chain.push(list);
    if let Some(label) = request.ok {
        chain.push(ok_button(spec, label, 1)?);
    }
    if let Some(label) = request.cancel {
        chain.push(cancel_button(spec, label, 2)?);
    }

    let result = run(&mut chain, screen, &spec.form())?;
    let list = chain.get(id);
    let cursor = list.and_then(Obj::cursor).unwrap_or(0);
    let confirmed = result == MenuResult::Ok;
    let selected: Vec<String> = if confirmed {
        list.and_then(Obj::as_list)
            .map(|l| l.items().selected_ids().into_iter().map(str::to_owned).collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    ndialog_core::debug!(?kind, confirmed, count = selected.len(), "list box closed");
    Ok(Choice {
        confirmed,
        selected,
        cursor,
    })
}

/// Reject explicit sizes too small for the list, prompt, and buttons.
fn check_fit(spec: &BoxSpec, request: &ListRequest<'_>) -> Result<()> {
    let (prompt_width, prompt_depth) = spec.prompt_size();
    let entries = request.entries;
    let tag_width = entries.iter().map(|e| cells(measure::str_width(&e.tag))).max();
    let item_width = entries.iter().map(|e| cells(measure::str_width(&e.item))).max();
    let mut list_width = tag_width.unwrap_or(0) + 2 + item_width.unwrap_or(0) + 2;
    if request.kind != ListKind::Menu {
        list_width += 4;
    }
    let label_width = |label: Option<&str>| {
        label.map_or(0, |l| cells(measure::str_width(parse_button(l, 0).1)) + 2)
    };
    let mut buttons = label_width(request.cancel);
    if request.kind != ListKind::Menu {
        buttons += label_width(request.ok);
    }
    let frame_width = list_width.max(prompt_width).max(buttons);

    if spec.height > 0 && spec.height < request.list_height + prompt_depth + 2 {
        return Err(Error::Invalid("box is too short for its list"));
    }
    if spec.width > 0 && spec.width < frame_width {
        return Err(Error::Invalid("box is too narrow for its list"));
    }
    Ok(())
}

/// Pick one entry; `current` starts selected.
pub fn menu_box(
    screen: &mut Screen<'_>,
    spec: &BoxSpec,
    list_height: i32,
    entries: &[ListEntry],
    current: usize,
) -> Result<Choice> {
    let request = ListRequest::new(ListKind::Menu, entries)
        .with_list_height(list_height)
        .with_current(current);
    list(screen, spec, &request)
}

/// Pick any number of entries.
pub fn checklist(
    screen: &mut Screen<'_>,
    spec: &BoxSpec,
    list_height: i32,
    entries: &[ListEntry],
) -> Result<Choice> {
    let request = ListRequest::new(ListKind::Check, entries).with_list_height(list_height);
    list(screen, spec, &request)
}

/// Pick exactly one entry.
pub fn radiolist(
    screen: &mut Screen<'_>,
    spec: &BoxSpec,
    list_height: i32,
    entries: &[ListEntry],
) -> Result<Choice> {
    let request = ListRequest::new(ListKind::Radio, entries).with_list_height(list_height);
    list(screen, spec, &request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_labels_carry_their_order() {
        assert_eq!(parse_button("2:OK", 1), (2, "OK"));
        assert_eq!(parse_button("CANCEL", 1), (1, "CANCEL"));
        assert_eq!(parse_button("x:Go", 5), (0, "Go"));
    }

    #[test]
    fn choice_text_ends_each_tag() {
        let choice = Choice {
            confirmed: true,
            selected: vec!["a".into(), "b".into()],
            cursor: 0,
        };
        assert_eq!(choice.text(), "a\nb\n");
    }

    #[test]
    fn default_buttons_per_kind() {
        let entries = [ListEntry::new("a", "alpha")];
        let menu = ListRequest::new(ListKind::Menu, &entries);
        assert_eq!(menu.ok, None);
        assert_eq!(menu.cancel, Some("1:CANCEL"));
        let check = ListRequest::new(ListKind::Check, &entries);
        assert_eq!(check.ok, Some("1:  OK  "));
    }

    #[test]
    fn fit_check_counts_prompt_and_buttons() {
        let entries = [ListEntry::new("tag", "an item")];
        let request = ListRequest::new(ListKind::Check, &entries).with_list_height(3);
        let short = BoxSpec::new("one\ntwo").with_size(40, 6);
        assert!(matches!(check_fit(&short, &request), Err(Error::Invalid(_))));
        let narrow = BoxSpec::new("p").with_size(10, 20);
        assert!(matches!(check_fit(&narrow, &request), Err(Error::Invalid(_))));
        let fine = BoxSpec::new("p").with_size(40, 20);
        assert!(check_fit(&fine, &request).is_ok());
    }
}
