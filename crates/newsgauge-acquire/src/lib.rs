//! Article acquisition for newsgauge.
//!
//! Discovers candidate links for a subject through a search capability,
//! extracts article text through an extraction capability, and assembles a
//! deduplicated set of usable articles with a fallback top-up pass.

pub mod capability;
pub mod discover;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod search;

pub use capability::{ExtractedPage, ExtractionCapability, SearchCapability};
pub use discover::{Discovery, LinkDiscoverer, SearchCursor};
pub use error::AcquireError;
pub use extract::HttpExtractor;
pub use fetch::{ContentFetcher, Fetched};
pub use pipeline::{Acquisition, AcquisitionPipeline};
pub use search::GoogleSearchClient;
