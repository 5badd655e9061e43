pub mod list_parser;
pub mod list_serializer;

pub use list_parser::{IgnoredLine, ParsedList, parse_list};
pub use list_serializer::serialize_list;
