//! Text side of the review dataset: cleaning and heuristic aspect labels.

pub mod clean;
pub mod error;
pub mod labels;
pub mod lexicon;

pub use clean::{clean_review_text, clean_table, CleanReport};
pub use error::{Result, TextError};
pub use labels::{
    label, label_table, relabel, sample_rows, Aspect, AspectStats, LabelStats, RelabelReport,
    Sentiment,
};
