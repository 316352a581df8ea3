//! End-to-end form runs against the headless surface.

use std::io;
use std::time::Duration;

use ndialog_core::event::{Event, KeyCode};
use ndialog_render::headless::HeadlessSurface;
use ndialog_render::panel::PanelStack;
use ndialog_render::{Surface, Theme};
use ndialog_text::html;
use ndialog_widgets::text::Direction;
use ndialog_widgets::{
    Binding, Chain, Decor, Error, Form, ListItem, ListItems, ListStyle, MenuResult, Obj, Screen,
    Verdict, menu,
};

fn three_items(selected: usize) -> ListItems {
    ["alpha", "beta", "gamma"]
        .into_iter()
        .enumerate()
        .map(|(i, text)| ListItem::new(i.to_string(), text).with_selected(i == selected))
        .collect()
}

#[test]
fn typed_string_is_kept_on_ok() {
    let value = Binding::new(String::new());
    let mut chain = Chain::new();
    chain.push(Obj::string(0, 0, 20, 20, value.clone(), Decor::new()).expect("valid"));
    chain.push(Obj::ok_button(0, "OK").expect("valid"));

    let mut surface = HeadlessSurface::new(60, 16);
    surface.type_str("abc");
    surface.push_event(Event::key(KeyCode::Enter));
    surface.push_event(Event::key(KeyCode::Enter));
    let mut screen = Screen::new(&mut surface);

    let result = menu(&mut chain, &mut screen, &Form::new().with_title("Entry")).expect("runs");
    assert_eq!(result, MenuResult::Ok);
    assert_eq!(value.get(), "abc");
    assert_eq!(surface.open_windows(), 0);
}

#[test]
fn string_follows_a_value_cleared_by_a_button() {
    let value = Binding::new(String::new());
    let reset = value.clone();
    let mut chain = Chain::new();
    let field = chain.push(Obj::string(0, 0, 20, 20, value.clone(), Decor::new()).expect("valid"));
    chain.push(
        Obj::button(0, "Clear")
            .expect("valid")
            .with_callback(move |_, _| {
                reset.set(String::new());
                Verdict::Accept
            }),
    );
    chain.push(Obj::ok_button(1, "OK").expect("valid"));

    let mut surface = HeadlessSurface::new(60, 16);
    surface.type_str("abc");
    // Tab to Clear, press it; focus moves on to OK, Tab wraps to the field.
    surface.push_event(Event::key(KeyCode::Tab));
    surface.push_event(Event::key(KeyCode::Enter));
    surface.push_event(Event::key(KeyCode::Tab));
    surface.push_event(Event::key(KeyCode::Backspace));
    surface.type_str("xy");
    surface.push_event(Event::key(KeyCode::Tab));
    surface.push_event(Event::key(KeyCode::Tab));
    surface.push_event(Event::key(KeyCode::Enter));
    let mut screen = Screen::new(&mut surface);

    let result = menu(&mut chain, &mut screen, &Form::new()).expect("runs");
    assert_eq!(result, MenuResult::Ok);
    assert_eq!(value.get(), "xy");
    let string = chain.get(field).and_then(Obj::as_string).expect("string");
    assert_eq!(string.cursor(), 2);
    assert!(string.cursor() <= string.len());
}

#[test]
fn rejecting_callback_may_rewrite_the_value() {
    let value = Binding::new(String::new());
    let slot = value.clone();
    let mut commits = 0;
    let mut chain = Chain::new();
    let field = chain.push(
        Obj::string(0, 0, 20, 20, value.clone(), Decor::new())
            .expect("valid")
            .with_callback(move |_, _| {
                commits += 1;
                if commits == 1 {
                    slot.set(String::new());
                    Verdict::Reject
                } else {
                    Verdict::Accept
                }
            }),
    );
    chain.push(Obj::ok_button(0, "OK").expect("valid"));

    let mut surface = HeadlessSurface::new(60, 16);
    surface.type_str("abc");
    surface.push_event(Event::key(KeyCode::Enter));
    surface.push_event(Event::key(KeyCode::Backspace));
    surface.type_str("q");
    surface.push_event(Event::key(KeyCode::Enter));
    surface.push_event(Event::key(KeyCode::Enter));
    let mut screen = Screen::new(&mut surface);

    let result = menu(&mut chain, &mut screen, &Form::new()).expect("runs");
    assert_eq!(result, MenuResult::Ok);
    assert_eq!(value.get(), "q");
    let string = chain.get(field).and_then(Obj::as_string).expect("string");
    assert_eq!(string.cursor(), 1);
}

/// A headless surface whose input has gone away.
struct LostInput(HeadlessSurface);

impl Surface for LostInput {
    fn panels(&self) -> &PanelStack {
        self.0.panels()
    }

    fn panels_mut(&mut self) -> &mut PanelStack {
        self.0.panels_mut()
    }

    fn theme(&self) -> &Theme {
        self.0.theme()
    }

    fn present(&mut self) -> io::Result<()> {
        self.0.present()
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
    }

    fn beep(&mut self) {
        self.0.beep();
    }

    fn pause(&mut self, duration: Duration) {
        self.0.pause(duration);
    }

    fn set_cursor(&mut self, at: Option<(u16, u16)>) {
        self.0.set_cursor(at);
    }
}

#[test]
fn input_failure_is_an_error_not_an_escape() {
    let mut chain = Chain::new();
    chain.push(Obj::string(0, 0, 20, 20, Binding::new(String::new()), Decor::new()).expect("valid"));
    chain.push(Obj::ok_button(0, "OK").expect("valid"));

    let mut surface = LostInput(HeadlessSurface::new(60, 16));
    let mut screen = Screen::new(&mut surface);

    let err = menu(&mut chain, &mut screen, &Form::new()).unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe), "got {err:?}");
    assert_eq!(surface.0.open_windows(), 0);
}

#[test]
fn radio_choice_moves_the_selection() {
    let mut chain = Chain::new();
    let list = chain.push(
        Obj::radio_list(0, 0, -1, -1, three_items(1), Decor::new(), ListStyle::empty())
            .expect("valid"),
    );
    chain.push(Obj::ok_button(0, "OK").expect("valid"));

    let mut surface = HeadlessSurface::new(60, 16).with_events([
        Event::key(KeyCode::Down),
        Event::key(KeyCode::Down),
        Event::char(' '),
        Event::key(KeyCode::Tab),
        Event::key(KeyCode::Enter),
    ]);
    let mut screen = Screen::new(&mut surface);

    let result = menu(&mut chain, &mut screen, &Form::new()).expect("runs");
    assert_eq!(result, MenuResult::Ok);
    let items = chain.get(list).and_then(Obj::as_list).expect("list").items();
    assert_eq!(items.selected(), vec![2]);
    assert_eq!(items.selected_ids(), vec!["2"]);
    assert!(!items.get(0).expect("item").selected);
    assert!(!items.get(1).expect("item").selected);
}

#[test]
fn menu_callback_can_close_the_form() {
    let mut chain = Chain::new();
    let list = chain.push(
        Obj::menu_list(0, 0, -1, -1, three_items(0), Decor::new(), ListStyle::empty())
            .expect("valid")
            .with_callback(|_, _| Verdict::AcceptAndExit),
    );
    chain.push(Obj::cancel_button(0, "Cancel").expect("valid"));

    let mut surface = HeadlessSurface::new(60, 16).with_events([Event::key(KeyCode::Enter)]);
    let mut screen = Screen::new(&mut surface);

    let result = menu(&mut chain, &mut screen, &Form::new()).expect("runs");
    assert_eq!(result, MenuResult::Ok);
    let items = chain.get(list).and_then(Obj::as_list).expect("list").items();
    assert_eq!(items.selected(), vec![0]);
}

#[test]
fn buttons_that_do_not_fit_are_refused() {
    let mut chain = Chain::new();
    chain.push(Obj::ok_button(0, "OK").expect("valid"));
    chain.push(Obj::cancel_button(1, "Cancel").expect("valid"));

    let mut surface = HeadlessSurface::new(60, 16);
    let mut screen = Screen::new(&mut surface);

    let err = menu(&mut chain, &mut screen, &Form::new().with_size(10, 5)).unwrap_err();
    assert!(matches!(err, Error::Overflow { .. }), "got {err:?}");
    assert_eq!(surface.windows_opened(), 0);
}

#[test]
fn hyperlinks_are_visited_in_order() {
    let page = html::render(
        "<p>See <a href=\"a.html\">first</a> then <a href=\"b.html\">second</a>.</p>",
        30,
    );
    let mut viewer = Obj::page(0, 0, 30, 4, page, Decor::new()).expect("valid");
    let view = viewer.as_text_mut().expect("text");

    assert!(view.scan_for_tag(Direction::Forward));
    assert_eq!(view.href(), Some(0));
    assert_eq!(view.current_target(), Some("a.html"));
    assert!(view.scan_for_tag(Direction::Forward));
    assert_eq!(view.href(), Some(1));
    assert_eq!(view.current_target(), Some("b.html"));
}
