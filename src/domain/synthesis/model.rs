use crate::domain::environment::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece of text to synthesize. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrase(String);

impl Phrase {
    /// Returns `None` for an empty string.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object store location the synthesis engine writes its output into.
///
/// Every object lands under `key_prefix`, so environments sharing a bucket
/// never see each other's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub bucket: String,
    pub key_prefix: String,
}

impl StoreRef {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key_prefix: String::new(),
        }
    }

    /// The slice of `bucket` owned by `environment`.
    pub fn for_environment(bucket: impl Into<String>, environment: &Environment) -> Self {
        Self {
            bucket: bucket.into(),
            key_prefix: environment.output_prefix(),
        }
    }
}

/// Descriptor of a synthesis job accepted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisJob {
    pub job_id: String,
    pub output_uri: String,
    pub phrase: Phrase,
}
