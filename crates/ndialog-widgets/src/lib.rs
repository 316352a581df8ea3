#![forbid(unsafe_code)]

//! Widgets and forms.
//!
//! A form is a [`Chain`] of [`Obj`] items run by [`menu`]. Items are built
//! with the `Obj` constructors of each kind (string fields, check boxes,
//! buttons, lists, gauges, text and help viewers, and the composite list
//! editor and indexed menu), pushed onto a chain, and handed to the modal
//! loop. Their content is bound through [`Binding`] and list item arrays,
//! so results are read back from the same values after the form closes.
//!
//! # Example
//! ```
//! use ndialog_render::headless::HeadlessSurface;
//! use ndialog_core::event::{Event, KeyCode};
//! use ndialog_widgets::{Binding, Chain, Decor, Form, MenuResult, Obj, Screen, menu};
//!
//! let name = Binding::new(String::new());
//! let mut chain = Chain::new();
//! chain.push(Obj::string(0, 0, 20, 20, name.clone(), Decor::new()).unwrap());
//! chain.push(Obj::ok_button(0, "OK").unwrap());
//!
//! let mut surface = HeadlessSurface::new(40, 12);
//! surface.type_str("ada");
//! surface.push_event(Event::key(KeyCode::Enter));
//! surface.push_event(Event::key(KeyCode::Enter));
//! let mut screen = Screen::new(&mut surface);
//!
//! let result = menu(&mut chain, &mut screen, &Form::new().with_title("Name")).unwrap();
//! assert_eq!(result, MenuResult::Ok);
//! assert_eq!(name.get(), "ada");
//! ```

pub mod binding;
pub mod button;
pub mod callback;
pub mod chain;
pub mod check;
pub mod custom;
pub mod edit;
pub mod edit_list;
pub mod error;
pub mod flags;
pub mod form;
pub mod gauge;
pub mod help;
pub mod indexed_menu;
pub mod items;
pub mod layout;
pub mod list;
pub mod object;
pub mod screen;
pub mod string;
pub mod text;

pub use binding::Binding;
pub use callback::{Callback, Verdict};
pub use chain::{Chain, ObjId};
pub use custom::{CustomWidget, KindId, Registry};
pub use error::{Error, Result};
pub use flags::{ButtonRole, ListMode, ListStyle, ObjFlags};
pub use form::{Form, FormFlags, MenuResult, menu};
pub use items::{ListItem, ListItems};
pub use object::{Class, Data, Decor, Kind, Obj};
pub use screen::{Canvas, Display, EditCode, Pointer, Screen};
