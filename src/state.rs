use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::engine::{InferenceEngine, OrtEngine};
use crate::error::StartupError;
use crate::labels::LabelStore;
use crate::normalize::Normalizer;
use crate::vocab::VocabAdapter;

/// Shared application state: every startup artifact, loaded once and
/// read-only for the process lifetime. Handlers receive it behind an `Arc`;
/// nothing here mutates after construction.
pub struct ServiceContext {
    /// Service configuration
    pub config: Arc<ServiceConfig>,

    /// Word segmenter for request text
    pub normalizer: Normalizer,

    /// Trained token-to-id mapping
    pub vocab: VocabAdapter,

    /// Labels for the expense-code ("Email") head
    pub email_labels: LabelStore,

    /// Labels for the vendor-name head
    pub name_labels: LabelStore,

    /// Inference engine (calls are serialized internally)
    pub engine: Arc<dyn InferenceEngine>,
}

impl ServiceContext {
    /// Load every startup artifact. Any failure here is fatal; the service
    /// never starts partially loaded.
    pub fn new(config: ServiceConfig) -> Result<Self, StartupError> {
        let engine = Arc::new(OrtEngine::load(
            &config.model_path,
            &config.email_head,
            &config.name_head,
            config.intra_threads,
        )?);
        Self::with_engine(config, engine)
    }

    /// Build the context around an already-constructed engine. Used by
    /// `new` and by tests that substitute a deterministic engine.
    pub fn with_engine(
        config: ServiceConfig,
        engine: Arc<dyn InferenceEngine>,
    ) -> Result<Self, StartupError> {
        let vocab = VocabAdapter::from_file(&config.vocab_path)?;
        let email_labels = LabelStore::from_file(&config.email_labels_path)?;
        let name_labels = LabelStore::from_file(&config.name_labels_path)?;

        tracing::info!(
            vocab_size = vocab.len(),
            email_classes = email_labels.len(),
            name_classes = name_labels.len(),
            "service context loaded"
        );

        Ok(Self {
            config: Arc::new(config),
            normalizer: Normalizer::new(),
            vocab,
            email_labels,
            name_labels,
            engine,
        })
    }
}
