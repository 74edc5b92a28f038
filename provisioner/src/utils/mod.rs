//! Utility and helper functions needed for:
//! - Operation building and submission
//! - Error handling
//! - Type casting and ABI decoding

pub mod common;
pub mod error;
pub mod transaction_builder;
