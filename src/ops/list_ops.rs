use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::io::store_io::{self, StoreError, StoreLines};
use crate::model::item::{ItemClass, Limit, ListedItem};
use crate::parse::is_class;

/// Lazy listing of one class of items, numbered from 1 in file order.
///
/// Stops reading as soon as `limit` items have been yielded. Not restartable:
/// list again to re-read the store.
pub struct ItemIter<I> {
    lines: I,
    class: ItemClass,
    limit: usize,
    emitted: usize,
}

impl<I> Iterator for ItemIter<I>
where
    I: Iterator<Item = Result<Vec<u8>, StoreError>>,
{
    type Item = Result<ListedItem, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.limit {
            return None;
        }
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            if is_class(&line, self.class) {
                self.emitted += 1;
                return Some(Ok(ListedItem {
                    rank: self.emitted,
                    class: self.class,
                    line,
                }));
            }
        }
        None
    }
}

/// List items of `class` from any source of lines
pub fn list_lines<I>(lines: I, class: ItemClass, limit: Limit) -> ItemIter<I::IntoIter>
where
    I: IntoIterator<Item = Result<Vec<u8>, StoreError>>,
{
    ItemIter {
        lines: lines.into_iter(),
        class,
        limit: limit.get(),
        emitted: 0,
    }
}

/// Open the store and list up to `limit` items of `class`
pub fn list_items(
    store: &Path,
    class: ItemClass,
    limit: Limit,
) -> Result<ItemIter<StoreLines<BufReader<File>>>, StoreError> {
    let lines = store_io::stream_lines(store)?;
    Ok(list_lines(lines, class, limit))
}

/// Todo items followed by done items, each class bounded by `limit` on its own
pub fn list_all(store: &Path, limit: Limit) -> Result<Vec<ListedItem>, StoreError> {
    let mut items = list_items(store, ItemClass::Todo, limit)?.collect::<Result<Vec<_>, _>>()?;
    for item in list_items(store, ItemClass::Done, limit)? {
        items.push(item?);
    }
    tracing::debug!(count = items.len(), "listed all items");
    Ok(items)
}
