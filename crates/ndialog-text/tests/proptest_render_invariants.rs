//! Property tests for the help page renderer and line codes.
//!
//! 1. Filled lines never exceed the viewport when every word fits.
//! 2. Escaped text decodes back to itself.
//! 3. Hyperlink ids follow document order.
//! 4. Arbitrary input renders without panicking.

use ndialog_text::bytecode::{self, Line, Segment};
use ndialog_text::html;
use proptest::prelude::*;

fn words_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..40)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Filled lines fit the viewport
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lines_fit_width(words in words_strategy(), width in 8usize..60) {
        let page = html::render(&words.join(" "), width);
        for line in page.plain_lines() {
            prop_assert!(
                line.chars().count() <= width,
                "line {:?} wider than {}", line, width
            );
        }
    }

    #[test]
    fn no_words_are_lost(words in words_strategy(), width in 8usize..60) {
        let page = html::render(&words.join(" "), width);
        let rendered: Vec<String> = page
            .plain_lines()
            .iter()
            .flat_map(|l| l.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(rendered, words);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Escaping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn escaped_text_decodes_to_itself(text in any::<String>()) {
        let mut raw = Vec::new();
        bytecode::push_escaped(&mut raw, &text);
        let decoded = Line::new(&raw).plain_text();
        prop_assert_eq!(decoded, text.replace('\n', ""));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Hyperlink numbering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hyperlinks_numbered_in_order(targets in prop::collection::vec("[a-z]{1,6}\\.html", 1..8)) {
        let doc: String = targets
            .iter()
            .map(|t| format!("<a href=\"{t}\">{t}</a> "))
            .collect();
        let page = html::render(&doc, 200);
        prop_assert_eq!(page.hrefs(), targets.as_slice());

        let mut seen = Vec::new();
        for line in page.lines() {
            for seg in line.segments() {
                if let Segment::Anchor(id) = seg {
                    if seen.last() != Some(&id) {
                        seen.push(id);
                    }
                }
            }
        }
        let expected: Vec<usize> = (0..targets.len()).collect();
        prop_assert_eq!(seen, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. No panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_input_renders(source in ".{0,200}", width in 1usize..120) {
        let page = html::render(&source, width);
        for line in page.lines() {
            prop_assert!(line.indent() <= bytecode::MAX_INDENT);
            let _ = line.segments().count();
        }
    }

    #[test]
    fn markup_soup_renders(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "<p>", "</p>", "<b>", "</b>", "<a href=x>", "</a>", "<pre>", "</pre>",
                "<h2>", "</h2>", "<dl>", "<dt>", "<dd>", "</dl>", "<br>", "<hr>",
                "<blockquote>", "</blockquote>", "<!--", "-->", "word", " ", "&lt;", "\n",
            ]),
            0..60,
        ),
        width in 1usize..80,
    ) {
        let page = html::render(&parts.concat(), width);
        prop_assert!(page.line_count() >= 1);
    }
}
