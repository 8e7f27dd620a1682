//! Core error handling shared across vrepo

pub mod error;

pub use error::{Result, VrepoError};
