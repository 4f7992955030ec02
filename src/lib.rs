//! A checklist kept in a plain-text `.todo` file.
//!
//! Each line of the store is either an item (`[ ] text` or `[X] text`) or a
//! foreign line that is carried along untouched. Items are addressed by their
//! rank among items of the same kind, recomputed on every run.
//!
//! The store is never locked: concurrent writers race and the last one wins.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
