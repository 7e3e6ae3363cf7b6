pub mod reader;
pub mod selection;

pub use reader::{InputReader, Line, parse_record, split_lines};
pub use selection::{Selected, Selection};
