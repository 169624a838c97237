//! Oracle contracts consumed by the matching pipeline.
//!
//! Every external collaborator (entity tagger, part-of-speech tagger, phrase
//! existence check, title search) is reached through one of these traits so
//! that implementations are injected rather than looked up globally.

mod error;
mod retry;
mod traits;

pub use error::OracleError;
pub use retry::{RetryPolicy, retry_with_backoff};
pub use traits::{EntityTagger, PhraseOracle, PosTagger, TitleSearch};
