use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

use crate::error::StartupError;

/// Wraps a pre-built, trained word-to-id mapping loaded from a serialized
/// Keras tokenizer artifact.
///
/// The artifact is the JSON produced by `Tokenizer.to_json()`: a top-level
/// `config` object whose `word_index` field is itself a JSON-encoded string
/// holding the `token -> id` map. `oov_token` (when present) names the
/// reserved out-of-vocabulary token, which the trainer places inside
/// `word_index`; `lower` records whether tokens were lowercased at training
/// time and is replayed here so lookups match.
#[derive(Debug, Clone)]
pub struct VocabAdapter {
    word_index: HashMap<String, u32>,
    oov_id: Option<u32>,
    lowercase: bool,
}

#[derive(Debug, Deserialize)]
struct TokenizerArtifact {
    config: TokenizerConfig,
}

#[derive(Debug, Deserialize)]
struct TokenizerConfig {
    #[serde(default = "default_lower")]
    lower: bool,
    #[serde(default)]
    oov_token: Option<String>,
    word_index: String,
}

fn default_lower() -> bool {
    true
}

impl VocabAdapter {
    pub fn from_file(path: &str) -> Result<Self, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|reason| StartupError::Vocab {
            path: path.to_string(),
            reason,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let artifact: TokenizerArtifact = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let config = artifact.config;
        let word_index: HashMap<String, u32> =
            serde_json::from_str(&config.word_index).map_err(|e| format!("word_index: {e}"))?;
        // The trainer assigns the OOV token an id inside word_index itself.
        let oov_id = config
            .oov_token
            .as_deref()
            .and_then(|token| word_index.get(token).copied());
        Ok(Self {
            word_index,
            oov_id,
            lowercase: config.lower,
        })
    }

    /// Map one token to its integer id. Unknown tokens resolve to the OOV id
    /// when the vocabulary defines one, otherwise `None` (the caller drops
    /// them).
    pub fn id_of(&self, token: &str) -> Option<u32> {
        let id = if self.lowercase {
            self.word_index.get(token.to_lowercase().as_str()).copied()
        } else {
            self.word_index.get(token).copied()
        };
        id.or(self.oov_id)
    }

    /// Map normalized (single-space-joined) text to a sequence of ids.
    pub fn ids(&self, normalized: &str) -> Vec<u32> {
        normalized
            .split(' ')
            .filter(|token| !token.is_empty())
            .filter_map(|token| self.id_of(token))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }
}
