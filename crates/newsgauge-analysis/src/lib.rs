//! Text analysis and aggregation for newsgauge.
//!
//! [`TextAnalysis`] is the seam to the language-model service. The
//! [`AnalysisEnricher`] attaches summaries, sentiment and topics to
//! articles; the [`AggregationEngine`] turns an enriched set into the
//! comparative score; [`assemble`] builds the public report.

pub mod aggregate;
pub mod analyzer;
pub mod capability;
pub mod chat;
pub mod decode;
pub mod enrich;
pub mod error;
#[cfg(test)]
mod fake;
mod prompts;
pub mod report;

pub use aggregate::{summaries, tally_sentiment, topic_overlap, AggregationEngine};
pub use analyzer::LlmAnalyzer;
pub use capability::TextAnalysis;
pub use chat::ChatClient;
pub use enrich::AnalysisEnricher;
pub use error::AnalysisError;
pub use report::{assemble, assemble_scored};
