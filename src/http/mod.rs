//! HTTP trigger module
//!
//! One stateless endpoint runs a full brief cycle per request. There is no
//! authentication and the request body is ignored.

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{router, serve};
pub use types::{BriefResponse, StorageReport};
