//! External batch API
//!
//! An owned HTTP client for the `/v1/batches` family of endpoints plus the
//! request types used to create batches.

mod client;
mod types;

pub use client::{BatchApiClient, BatchApiHealth};
pub use types::{
    CompletionWindow, CreateBatchRequest, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
    validate_batch_request,
};
