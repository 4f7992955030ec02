use serde::Serialize;

use crate::model::item::{ItemClass, ListedItem, ToggleOutcome};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub rank: usize,
    pub text: String,
}

#[derive(Serialize, Default)]
pub struct ListingJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<Vec<ItemJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<Vec<ItemJson>>,
}

/// One class of items as listed
pub struct Section {
    pub class: ItemClass,
    pub items: Vec<ListedItem>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &ListedItem) -> ItemJson {
    ItemJson {
        rank: item.rank,
        text: item.text().to_string(),
    }
}

pub fn listing_to_json(sections: &[Section]) -> ListingJson {
    let mut out = ListingJson::default();
    for section in sections {
        let items = Some(section.items.iter().map(item_to_json).collect());
        match section.class {
            ItemClass::Todo => out.todo = items,
            ItemClass::Done => out.done = items,
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Format sections as text: a heading per class, then `  <rank>. <text>` lines
pub fn format_listing(sections: &[Section]) -> String {
    let width = sections
        .iter()
        .flat_map(|s| s.items.iter())
        .map(|i| i.rank.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for section in sections {
        out.push_str(&format!("{}:\n", section.class));
        if section.items.is_empty() {
            out.push_str("  (none)\n");
            continue;
        }
        for item in &section.items {
            out.push_str(&format!(
                "  {:>width$}. {}\n",
                item.rank,
                item.text(),
                width = width
            ));
        }
    }
    out
}

/// One-line confirmation for a toggle
pub fn format_toggle(outcome: &ToggleOutcome) -> String {
    let verb = match outcome.class {
        ItemClass::Done => "done",
        ItemClass::Todo => "reopened",
    };
    format!("{}: {}", verb, crate::parse::item_text(&outcome.line))
}

pub fn format_added(count: usize) -> String {
    match count {
        1 => "added 1 item".to_string(),
        n => format!("added {} items", n),
    }
}
