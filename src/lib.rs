//! Purchase Predict - HTTP inference service for purchase-transaction
//! classification
//!
//! A single-endpoint service: it accepts a structured record describing a
//! purchase transaction (company, vendor, purchase-order reference,
//! material, material group, plant), converts it into a token sequence,
//! runs it through a pre-trained two-headed classification model, and
//! returns two ranked label distributions with confidence scores.
//!
//! # Pipeline
//!
//! 1. **Normalize**: dictionary-backed word segmentation (the production
//!    data is Thai, which carries no whitespace word boundaries), joined
//!    with single spaces
//! 2. **Encode**: token ids via the trained vocabulary, padded/truncated to
//!    a fixed length, as a `1 x L` f32 tensor
//! 3. **Infer**: one forward pass through an ONNX Runtime session with two
//!    output heads
//! 4. **Rank**: each head's scores zipped against its label list, rescaled
//!    to percentages, sorted descending
//!
//! # API Endpoints
//!
//! - `GET /` - service info
//! - `GET /health` - liveness probe
//! - `GET /ready` - readiness probe
//! - `POST /predict_Email` - classify one transaction
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use purchase_predict::ServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::load()?;
//!     purchase_predict::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Startup artifacts
//!
//! Loaded once at process start and immutable thereafter: the compiled
//! model (`model_path`), the serialized tokenizer vocabulary
//! (`vocab_path`), and one label file per output head. Any load failure is
//! fatal; the service never starts partially loaded.

pub mod config;
pub mod encode;
pub mod engine;
pub mod error;
pub mod labels;
pub mod middleware;
pub mod normalize;
pub mod rank;
pub mod routes;
pub mod server;
pub mod state;
pub mod vocab;

pub use config::ServiceConfig;
pub use encode::{encode, Padding, DEFAULT_SEQUENCE_LENGTH};
pub use engine::{HeadScores, InferenceEngine, OrtEngine};
pub use error::{EngineError, RankError, ServerError, ServerResult, StartupError};
pub use labels::LabelStore;
pub use normalize::Normalizer;
pub use rank::{rank, Label, RankedPrediction};
pub use server::{build_router, start_server};
pub use state::ServiceContext;
pub use vocab::VocabAdapter;
