//! Shared domain types, configuration, and request-shaping utilities for
//! the newsgauge workspace.
//!
//! Acquisition and analysis crates depend on this one; it carries no HTTP
//! code of its own.

pub mod app_config;
pub mod article;
pub mod config;
pub mod error;
pub mod pacer;
pub mod report;
pub mod retry;

pub use app_config::{AppConfig, Environment};
pub use article::{Article, Sentiment, Subject};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use pacer::Pacer;
pub use report::{
    ComparativeScore, CoverageDifference, FinalReport, ReportedArticle, SentimentDistribution,
    TopicOverlap,
};
pub use retry::{Retriable, RetryPolicy};
