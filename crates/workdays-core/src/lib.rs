pub mod answer;
pub mod calendar;
pub mod error;
pub mod extractor;
pub mod query;

pub use answer::{answer, evaluate};
pub use calendar::WorkdaySpan;
pub use error::ExtractError;
pub use extractor::{DatePair, extract};
