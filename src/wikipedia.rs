//! MediaWiki search client.
//!
//! Provides the phrase-existence check and the ranked title search the
//! matcher uses, backed by the MediaWiki `list=search` API.

mod client;

pub use client::{SearchMode, WikipediaClient, WikipediaClientBuilder};
