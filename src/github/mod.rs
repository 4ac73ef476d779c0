//! Code-hosting platform client

mod client;
mod types;

pub use client::GitHubClient;
pub use types::{ContentEntry, Repository};
