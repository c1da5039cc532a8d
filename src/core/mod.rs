//! Core functionality for the batch manager
//!
//! - [`batch`]: turns a directory of files into `.tar.gz` batch archives
//! - [`batch_api`]: client for the external batch inference service

pub mod batch;
pub mod batch_api;
