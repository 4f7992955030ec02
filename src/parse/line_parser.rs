use std::borrow::Cow;

use crate::model::item::{Item, ItemClass, LineKind};

/// Length of the `[?]` checkbox prefix
const CHECKBOX_LEN: usize = 3;

/// Classify a raw store line (without its trailing newline).
///
/// Only the first three bytes matter: `[ ]` is todo, `[X]` is done, anything
/// else (including lines shorter than three bytes) is a foreign line. Lines
/// don't need to be valid UTF-8.
pub fn classify(line: impl AsRef<[u8]>) -> LineKind {
    match line.as_ref().get(..CHECKBOX_LEN) {
        Some([b'[', mark, b']']) => match ItemClass::from_mark(*mark as char) {
            Some(class) => LineKind::Item(class),
            None => LineKind::Foreign,
        },
        _ => LineKind::Foreign,
    }
}

/// True if the line is an item of the given class
pub fn is_class(line: impl AsRef<[u8]>, class: ItemClass) -> bool {
    classify(line) == LineKind::Item(class)
}

/// Parse an item line into its class and text. Foreign lines yield `None`.
pub fn parse_item(line: impl AsRef<[u8]>) -> Option<Item> {
    let line = line.as_ref();
    match classify(line) {
        LineKind::Item(class) => Some(Item {
            class,
            text: item_text(line).into_owned(),
        }),
        LineKind::Foreign => None,
    }
}

/// The raw text of an item line: everything after `[?] `.
///
/// A missing separator space is tolerated (`[ ]x` has text `x`). For foreign
/// lines the whole line is returned.
pub fn item_bytes(line: &[u8]) -> &[u8] {
    if classify(line) == LineKind::Foreign {
        return line;
    }
    let rest = &line[CHECKBOX_LEN..];
    rest.strip_prefix(b" ").unwrap_or(rest)
}

/// Item text for display. Bytes that aren't UTF-8 show as U+FFFD.
pub fn item_text(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(item_bytes(line))
}

/// Rewrite the checkbox of an item line, leaving every other byte alone.
/// Foreign lines yield `None`.
pub fn with_mark(line: &[u8], class: ItemClass) -> Option<Vec<u8>> {
    match classify(line) {
        LineKind::Item(_) => {
            let mut out = line.to_vec();
            // Marks are ASCII, one byte each
            out[1] = class.mark() as u8;
            Some(out)
        }
        LineKind::Foreign => None,
    }
}
