//! Integration tests for batch-manager
//!
//! These tests exercise whole flows: files on disk through archives, and HTTP
//! requests through the dashboard to mocked remotes.

pub mod cli_tests;
pub mod config_tests;
pub mod packaging_tests;
pub mod presign_tests;
pub mod proxy_tests;
