pub mod color;
pub mod config;
pub mod document;
pub mod settings;
pub mod task;

pub use color::*;
pub use config::*;
pub use document::*;
pub use settings::*;
pub use task::*;
