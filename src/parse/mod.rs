pub mod item_serializer;
pub mod line_parser;

pub use item_serializer::{format_item, serialize_lines, todo_line};
pub use line_parser::{classify, is_class, item_bytes, item_text, parse_item, with_mark};
