//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: validators for every configuration section
//! - `tests`: Test suite for all validators

mod config_validators;
mod trait_def;

pub use config_validators::validate_http_url;
pub use trait_def::Validate;
