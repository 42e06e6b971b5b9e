//! Input parsing and dataset types.

mod parser;
mod source;

pub use parser::{ParseMode, Parser, ParserConfig};
pub use source::{
    is_metric_column, Dataset, Record, SourceMetadata, NAME_COLUMN, PASS_COLUMN,
};
