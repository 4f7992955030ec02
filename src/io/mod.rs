pub mod config_io;
pub mod locate;
pub mod recovery;
pub mod store_io;
