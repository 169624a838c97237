//! Stanford CoreNLP server client.
//!
//! Supplies the named-entity and part-of-speech oracles. Input is always sent
//! pre-tokenized so the server's token stream lines up with ours.

mod client;

pub use client::{CoreNlpClient, CoreNlpClientBuilder};
