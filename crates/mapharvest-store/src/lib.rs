//! mapharvest-store - CSV datasets for harvested places and reviews
//!
//! Every write produces one UTF-8 CSV file with a BOM and a header row, so
//! spreadsheet tools open Indonesian text correctly.

pub mod error;
pub mod merge;
pub mod storage;

pub use error::{Result, StoreError};
pub use merge::{merge_reviews, review_files, MergeReport};
pub use storage::{
    is_blank, read_links, sanitize, timestamped_name, unique_by, write_records, DatasetStore,
    Table,
};
