#![forbid(unsafe_code)]

//! Rendered help pages.
//!
//! Help documents are small HTML files. [`html::render`] lays a document
//! out for a given column width and produces a [`Page`]: the text of every
//! line with a handful of in-band control codes for fonts, indentation,
//! labels and hyperlinks, plus the page title and hyperlink targets. The
//! Text widget draws a page line by line through [`bytecode::Line`].
//!
//! # Example
//! ```
//! use ndialog_text::html;
//!
//! let page = html::render("<title>Intro</title><p>See <a href=\"b.html\">this</a>.", 40);
//! assert_eq!(page.title(), "Intro");
//! assert_eq!(page.href(0), Some("b.html"));
//! ```

pub mod bytecode;
pub mod html;
pub mod page;

pub use bytecode::{Font, Line, Segment};
pub use page::Page;
