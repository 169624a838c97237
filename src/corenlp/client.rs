use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::models::{EntityClass, PosTag};
use crate::oracle::{EntityTagger, OracleError, PosTagger, RetryPolicy, retry_with_backoff};

const DEFAULT_URL: &str = "http://localhost:9000";
const DEFAULT_NER_MODEL: &str = "edu/stanford/nlp/models/ner/english.conll.4class.distsim.crf.ser.gz";

/// Builder for constructing `CoreNlpClient` instances.
#[derive(Debug, Default)]
pub struct CoreNlpClientBuilder {
    base_url: Option<String>,
    ner_model: Option<String>,
    retry: Option<RetryPolicy>,
}

impl CoreNlpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server URL (e.g. "http://localhost:9000").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the NER model path on the server (default: CoNLL 4-class).
    pub fn ner_model(mut self, model: impl Into<String>) -> Self {
        self.ner_model = Some(model.into());
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Builds the client, falling back to `CORENLP_URL` and then
    /// `http://localhost:9000` when no URL was given.
    pub fn build(self) -> Result<CoreNlpClient, OracleError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => std::env::var("CORENLP_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
        };

        reqwest::Url::parse(&base_url)
            .map_err(|e| OracleError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // first request after server start loads the models, which is slow
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(OracleError::Network)?;

        Ok(CoreNlpClient {
            client,
            base_url,
            ner_model: self.ner_model.unwrap_or_else(|| DEFAULT_NER_MODEL.to_string()),
            retry: self.retry.unwrap_or_default(),
        })
    }
}

/// Synchronous client for a CoreNLP server's annotate endpoint.
pub struct CoreNlpClient {
    client: reqwest::blocking::Client,
    base_url: String,
    ner_model: String,
    retry: RetryPolicy,
}

impl CoreNlpClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ner_model(&self) -> &str {
        &self.ner_model
    }

    /// Annotates `items` as one pre-tokenized sentence.
    ///
    /// Returns exactly one token per item or `OracleError::Misaligned`.
    fn annotate(&self, items: &[String], annotators: &str) -> Result<Vec<AnnotatedToken>, OracleError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let text = join_pretokenized(items);
        let properties = self.properties(annotators).to_string();

        let tokens = retry_with_backoff(&self.retry, || {
            let response = self
                .client
                .post(&self.base_url)
                .query(&[("properties", properties.as_str())])
                .body(text.clone())
                .send()
                .map_err(OracleError::from_transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(OracleError::Http {
                    status: status.as_u16(),
                });
            }

            let body = response.text().map_err(OracleError::from_transport)?;
            parse_annotation(&body)
        })?;

        if tokens.len() != items.len() {
            return Err(OracleError::Misaligned {
                expected: items.len(),
                actual: tokens.len(),
            });
        }

        debug!(items = items.len(), annotators, "corenlp annotation");
        Ok(tokens)
    }

    fn properties(&self, annotators: &str) -> serde_json::Value {
        serde_json::json!({
            "annotators": annotators,
            "outputFormat": "json",
            "tokenize.whitespace": "true",
            "ssplit.isOneSentence": "true",
            "ner.model": self.ner_model,
            "ner.applyFineGrained": "false",
        })
    }
}

impl EntityTagger for CoreNlpClient {
    fn tag_entities(&self, tokens: &[String]) -> Result<Vec<(String, EntityClass)>, OracleError> {
        let annotated = self.annotate(tokens, "tokenize,ssplit,pos,lemma,ner")?;

        tokens
            .iter()
            .zip(annotated)
            .map(|(token, tagged)| {
                let label = tagged.ner.ok_or_else(|| OracleError::Api {
                    message: format!("Missing 'ner' for token '{}'", token),
                })?;
                Ok((token.clone(), EntityClass::from_label(&label)))
            })
            .collect()
    }
}

impl PosTagger for CoreNlpClient {
    fn tag_pos(&self, items: &[String]) -> Result<Vec<(String, PosTag)>, OracleError> {
        let annotated = self.annotate(items, "tokenize,ssplit,pos")?;

        items
            .iter()
            .zip(annotated)
            .map(|(item, tagged)| {
                let label = tagged.pos.ok_or_else(|| OracleError::Api {
                    message: format!("Missing 'pos' for item '{}'", item),
                })?;
                Ok((item.clone(), PosTag::new(label)))
            })
            .collect()
    }
}

/// Joins items into whitespace-tokenizable text, gluing each multi-word item
/// into one token with underscores.
fn join_pretokenized(items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.split_whitespace().collect::<Vec<_>>().join("_"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Deserialize)]
struct AnnotationResponse {
    #[serde(default)]
    sentences: Vec<AnnotatedSentence>,
}

#[derive(Debug, Deserialize)]
struct AnnotatedSentence {
    #[serde(default)]
    tokens: Vec<AnnotatedToken>,
}

#[derive(Debug, Deserialize)]
struct AnnotatedToken {
    pos: Option<String>,
    ner: Option<String>,
}

fn parse_annotation(body: &str) -> Result<Vec<AnnotatedToken>, OracleError> {
    let response: AnnotationResponse =
        serde_json::from_str(body).map_err(OracleError::Serialization)?;

    Ok(response
        .sentences
        .into_iter()
        .flat_map(|sentence| sentence.tokens)
        .collect())
}
