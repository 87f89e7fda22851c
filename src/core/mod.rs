//! Core editor logic: registry, fetching, buffer, preview model and export

pub mod config;
pub mod document;
pub mod export;
pub mod fetch;
pub mod preview;
pub mod registry;
pub mod session;
