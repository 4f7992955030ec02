use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Which side of the checklist an item is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemClass {
    Todo,
    Done,
}

impl ItemClass {
    /// The character used inside the checkbox `[ ]`
    pub fn mark(self) -> char {
        match self {
            ItemClass::Todo => ' ',
            ItemClass::Done => 'X',
        }
    }

    /// Parse a checkbox character into a class. Case-sensitive: `x` is not done.
    pub fn from_mark(c: char) -> Option<ItemClass> {
        match c {
            ' ' => Some(ItemClass::Todo),
            'X' => Some(ItemClass::Done),
            _ => None,
        }
    }

    /// The class an item of this class becomes when toggled
    pub fn opposite(self) -> ItemClass {
        match self {
            ItemClass::Todo => ItemClass::Done,
            ItemClass::Done => ItemClass::Todo,
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemClass::Todo => write!(f, "todo"),
            ItemClass::Done => write!(f, "done"),
        }
    }
}

/// What a raw store line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Item(ItemClass),
    /// Anything that isn't `[ ]` or `[X]` at the start of the line
    Foreign,
}

/// A parsed item line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub class: ItemClass,
    /// Free-form text after the `[?] ` prefix (may be empty)
    pub text: String,
}

impl Item {
    /// New items always start out as todo
    pub fn new(text: impl Into<String>) -> Self {
        Item {
            class: ItemClass::Todo,
            text: text.into(),
        }
    }
}

/// One entry yielded by a listing: its rank within the class and the raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    /// 1-based position among lines of the same class, in file order
    pub rank: usize,
    pub class: ItemClass,
    /// Line bytes as stored, without the newline
    pub line: Vec<u8>,
}

impl ListedItem {
    /// Item text without the checkbox prefix, decoded for display
    pub fn text(&self) -> Cow<'_, str> {
        crate::parse::item_text(&self.line)
    }
}

/// A validated, strictly positive count or rank.
///
/// Listing limits and toggle ranks are both carried as `Limit` so a zero
/// never reaches code that touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Limit(usize);

impl Limit {
    pub fn new(n: usize) -> Option<Limit> {
        if n == 0 { None } else { Some(Limit(n)) }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a toggle moved, for the caller to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Class the item now belongs to
    pub class: ItemClass,
    /// Rank the item was selected by (within its old class)
    pub rank: usize,
    /// The rewritten line, with its new mark
    pub line: Vec<u8>,
}

impl ToggleOutcome {
    /// Item text of the moved line, decoded for display
    pub fn text(&self) -> Cow<'_, str> {
        crate::parse::item_text(&self.line)
    }
}
