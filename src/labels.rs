use std::fs;

use crate::error::StartupError;

/// An ordered list of human-readable class names for one model output head.
///
/// Loaded once at startup from a plain text file, one label per line, line
/// order = class index order. Immutable after load.
#[derive(Debug, Clone)]
pub struct LabelStore {
    labels: Vec<String>,
}

impl LabelStore {
    /// Load labels from a text file. Each line is trimmed; interior blank
    /// lines are kept so indexes stay aligned with the trained head.
    pub fn from_file(path: &str) -> Result<Self, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_string(),
            source,
        })?;
        let store = Self::from_lines(&raw);
        if store.is_empty() {
            return Err(StartupError::EmptyLabels {
                path: path.to_string(),
            });
        }
        Ok(store)
    }

    pub fn from_lines(raw: &str) -> Self {
        Self {
            labels: raw.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}
