//! Common test utilities for batch-manager
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures::{ImageDir, MockRemotes};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let images = ImageDir::with_files(5);
//!     let remotes = MockRemotes::start().await;
//!     let state = remotes.state();
//!     // ...
//! }
//! ```


pub use fixtures::{ImageDir, MockRemotes, read_archive};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
