pub mod document;
pub mod review;
pub mod summary;
pub mod trend;

pub use document::{ClassifiedDocument, Document, KeywordStat, ReviewComment, ReviewDetails};
pub use review::{Draft, Review, Sentiment, title_from_filename};
pub use summary::{SentimentSlice, SentimentSummary};
pub use trend::TrendPoint;
