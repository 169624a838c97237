pub mod config;
pub mod corenlp;
pub mod eval;
pub mod matcher;
pub mod models;
pub mod normalizer;
pub mod oracle;
pub mod wikipedia;

pub use config::MatcherConfig;
pub use corenlp::{CoreNlpClient, CoreNlpClientBuilder};
pub use matcher::{MatchOutcome, PageMatcher, PageMatcherBuilder};
pub use models::{CandidateList, SearchBudget};
pub use normalizer::{NormalizeOptions, QueryNormalizer};
pub use oracle::OracleError;
pub use wikipedia::{WikipediaClient, WikipediaClientBuilder};
