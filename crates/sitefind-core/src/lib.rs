//! Sitefind Core Library
//!
//! Core types, configuration, and error handling for the sitefind search
//! toolkit.

pub mod config;
pub mod error;
pub mod page;

pub use config::{BuildConfig, Config, SearchConfig, SiteConfig};
pub use error::{CoreError, Result};
pub use page::Page;
