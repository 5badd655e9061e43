pub mod config_io;
pub mod link;
pub mod list_io;
pub mod recent;
pub mod recovery;
