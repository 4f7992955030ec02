pub mod ingest_ops;
pub mod list_ops;
pub mod toggle_ops;
