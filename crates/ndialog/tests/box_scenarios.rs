//! Ready-made boxes driven through a headless session.

use ndialog::boxes::{self, BoxSpec, ListEntry, ListKind, ListRequest};
use ndialog::cli::{self, BoxArgs, BoxKind, Invocation};
use ndialog::{DialogConfig, Error, Event, HeadlessSurface, KeyCode, Session};

fn session(events: impl IntoIterator<Item = Event>) -> Session<HeadlessSurface> {
    Session::with_surface(
        HeadlessSurface::new(80, 24).with_events(events),
        &DialogConfig::default(),
    )
}

fn entries() -> Vec<ListEntry> {
    vec![
        ListEntry::new("a", "alpha"),
        ListEntry::new("b", "beta").with_on(true),
        ListEntry::new("c", "gamma"),
    ]
}

#[test]
fn yes_is_the_first_button() {
    let mut s = session([Event::key(KeyCode::Enter)]);
    let answer = boxes::yesno(&mut s.screen(), &BoxSpec::new("Continue?")).expect("runs");
    assert!(answer);
    assert!(s.surface().shows("YES"));
    assert_eq!(s.surface().open_windows(), 0);
}

#[test]
fn tab_to_no() {
    let mut s = session([Event::key(KeyCode::Tab), Event::key(KeyCode::Enter)]);
    let answer = boxes::yesno(&mut s.screen(), &BoxSpec::new("Continue?")).expect("runs");
    assert!(!answer);
}

#[test]
fn escape_is_reported() {
    let mut s = session([Event::key(KeyCode::Escape)]);
    let err = boxes::mesgbox(&mut s.screen(), &BoxSpec::new("Hello")).unwrap_err();
    assert!(matches!(err, Error::Escaped));
}

#[test]
fn infobox_does_not_wait() {
    let mut s = session([]);
    boxes::infobox(&mut s.screen(), &BoxSpec::new("Working...").with_title("Info"))
        .expect("runs");
    assert!(s.surface().shows("Working..."));
    assert_eq!(s.surface().windows_opened(), 1);
}

#[test]
fn inputbox_returns_typed_text() {
    let mut surface = HeadlessSurface::new(80, 24);
    surface.type_str("hello");
    surface.push_event(Event::key(KeyCode::Enter));
    surface.push_event(Event::key(KeyCode::Enter));
    let mut s = Session::with_surface(surface, &DialogConfig::default());
    let spec = BoxSpec::new("Name?").with_size(30, -1);
    let text = boxes::inputbox(&mut s.screen(), &spec, "").expect("runs");
    assert_eq!(text.as_deref(), Some("hello"));
}

#[test]
fn inputbox_needs_room() {
    let mut s = session([]);
    let spec = BoxSpec::new("Name?").with_size(4, -1);
    assert!(matches!(
        boxes::inputbox(&mut s.screen(), &spec, ""),
        Err(Error::Invalid(_))
    ));
}

#[test]
fn gauge_shows_percentage() {
    let mut s = session([]);
    boxes::gauge(&mut s.screen(), &BoxSpec::new("Copying").with_size(30, -1), 42).expect("runs");
    assert!(s.surface().shows("42%"));
    assert!(boxes::gauge(&mut s.screen(), &BoxSpec::new("x"), 10).is_err());
}

#[test]
fn error_box_uses_the_error_title() {
    let mut s = session([Event::key(KeyCode::Enter)]);
    let cause = std::io::Error::other("disk on fire");
    boxes::error_box(&mut s.screen(), "Copy failed", Some(&cause)).expect("runs");
    assert!(s.surface().shows("Error"));
    assert!(s.surface().shows("disk on fire"));
}

#[test]
fn textbox_pages_a_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "first line\nsecond line\n").expect("write");
    let mut s = session([Event::key(KeyCode::Tab), Event::key(KeyCode::Enter)]);
    let ok = boxes::textbox(&mut s.screen(), &BoxSpec::new("notes"), &path).expect("runs");
    assert!(ok);
    assert!(s.surface().shows("second line"));
}

#[test]
fn textbox_reports_missing_files() {
    let mut s = session([]);
    let result = boxes::textbox(
        &mut s.screen(),
        &BoxSpec::new("x"),
        std::path::Path::new("/nonexistent/notes.txt"),
    );
    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(s.surface().windows_opened(), 0);
}

#[test]
fn checklist_returns_selected_tags() {
    let items = entries();
    let mut s = session([
        Event::char(' '),
        Event::key(KeyCode::Tab),
        Event::key(KeyCode::Enter),
    ]);
    let choice = boxes::checklist(&mut s.screen(), &BoxSpec::new("Pick"), -1, &items)
        .expect("runs");
    assert!(choice.confirmed);
    assert_eq!(choice.selected, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(choice.text(), "a\nb\n");
}

#[test]
fn radio_needs_exactly_one_on() {
    let items = vec![ListEntry::new("a", "alpha"), ListEntry::new("b", "beta")];
    let mut s = session([]);
    let result = boxes::radiolist(&mut s.screen(), &BoxSpec::new("Pick"), -1, &items);
    assert!(matches!(result, Err(Error::Invalid(_))));
    assert_eq!(s.surface().windows_opened(), 0);
}

#[test]
fn menu_choice_closes_the_box() {
    let items = entries();
    let mut s = session([Event::key(KeyCode::Down), Event::key(KeyCode::Enter)]);
    let choice = boxes::menu_box(&mut s.screen(), &BoxSpec::new("Go"), -1, &items, 0)
        .expect("runs");
    assert!(choice.confirmed);
    assert_eq!(choice.selected, vec!["b".to_string()]);
    assert_eq!(choice.cursor, 1);
}

#[test]
fn cancelled_list_selects_nothing() {
    let items = entries();
    let mut s = session([Event::key(KeyCode::Tab), Event::key(KeyCode::Tab), Event::key(KeyCode::Enter)]);
    let request = ListRequest::new(ListKind::Check, &items);
    let choice = boxes::list(&mut s.screen(), &BoxSpec::new("Pick"), &request).expect("runs");
    assert!(!choice.confirmed);
    assert!(choice.selected.is_empty());
}

#[test]
fn cli_menu_prints_the_tag() {
    let inv = Invocation {
        title: Some("Fruit".into()),
        ..Invocation::default()
    };
    let args = BoxArgs {
        kind: BoxKind::Menu,
        text: "Pick one".into(),
        height: -1,
        width: -1,
        data: vec!["a".into(), "apple".into(), "p".into(), "pear".into()],
    };
    let mut s = session([Event::key(KeyCode::Down), Event::key(KeyCode::Enter)]);
    let outcome = cli::run_box(&mut s, &inv, &args);
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.output.as_deref(), Some("p\n"));
}

#[test]
fn cli_escape_exits_with_two() {
    let inv = Invocation::default();
    let args = BoxArgs {
        kind: BoxKind::YesNo,
        text: "Sure?".into(),
        height: -1,
        width: -1,
        data: Vec::new(),
    };
    let mut s = session([Event::key(KeyCode::Escape)]);
    assert_eq!(cli::run_box(&mut s, &inv, &args).code, 2);
}

#[test]
fn cli_failure_is_announced() {
    let inv = Invocation::default();
    let args = BoxArgs {
        kind: BoxKind::TextBox,
        text: "/nonexistent/file.txt".into(),
        height: -1,
        width: -1,
        data: Vec::new(),
    };
    let mut s = session([Event::key(KeyCode::Enter)]);
    assert_eq!(cli::run_box(&mut s, &inv, &args).code, cli::FAILURE);
    assert!(s.surface().shows("Error"));
}
