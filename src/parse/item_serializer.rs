use crate::model::item::{Item, ItemClass};

/// Render an item as a store line, without the trailing newline
pub fn format_item(item: &Item) -> String {
    format!("[{}] {}", item.class.mark(), item.text)
}

/// A new todo line for raw text bytes, newline-terminated
pub fn todo_line(text: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(text.len() + 5);
    line.extend_from_slice(format!("[{}] ", ItemClass::Todo.mark()).as_bytes());
    line.extend_from_slice(text);
    line.push(b'\n');
    line
}

/// Join store lines back into file content. Every line, including the last,
/// is newline-terminated.
pub fn serialize_lines<L: AsRef<[u8]>>(lines: &[L]) -> Vec<u8> {
    let len = lines.iter().map(|l| l.as_ref().len() + 1).sum();
    let mut out = Vec::with_capacity(len);
    for line in lines {
        out.extend_from_slice(line.as_ref());
        out.push(b'\n');
    }
    out
}
