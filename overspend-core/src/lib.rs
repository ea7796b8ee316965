//! overspend-core: transaction model, paging cursor, and above-average analysis

pub mod analyzer;
pub mod error;
pub mod model;
pub mod parse;
pub mod source;

pub use analyzer::{Analysis, AnalyzerConfig, NO_MATCH, TransactionAnalyzer};
pub use error::{Error, ErrorKind, Result};
pub use model::{Location, Page, TransactionRecord, TxnLabels, TxnType};
pub use parse::{MonthYear, parse_amount};
pub use source::{PageFetcher, PagedTransactionSource};
