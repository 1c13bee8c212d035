//! Services Layer
//!
//! Business logic shared between the HTTP trigger and the command line.
//! Services own their collaborators (model, market data, store) behind
//! traits, so handlers only decide what to call and how to respond.
//!
//! # Architecture
//!
//! ```text
//! HTTP trigger ──┐
//!                ├──> BriefService ──> GenerativeModel / MarketDataVerifier
//! CLI `once` ────┘         │
//!                          └─> PublishService ──> ObjectStore
//! ```
//!
//! # Services
//!
//! - `BriefService` - Discovery, verification and synthesis of one brief
//! - `MarketDataVerifier` - Mega-Cap Momentum checks against market data
//! - `PublishService` - Persist a successful brief as JSON

pub mod brief_service;
pub mod prompts;
pub mod publish_service;
pub mod sources;
pub mod verification_service;

// Re-export commonly used types and services
pub use brief_service::{parse_ticker_list, BriefResult, BriefService, BriefStatus};
pub use publish_service::{PublishService, StorageOutcome};
pub use sources::{extract_sources, SourceEntry};
pub use verification_service::MarketDataVerifier;
