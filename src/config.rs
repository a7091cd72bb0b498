use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::encode::Padding;

/// Service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS (allow-all, mirroring the browser clients this serves)
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to the compiled ONNX model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the serialized tokenizer vocabulary artifact
    #[serde(default = "default_vocab_path")]
    pub vocab_path: String,

    /// Path to the expense-code ("Email") head label file
    #[serde(default = "default_email_labels_path")]
    pub email_labels_path: String,

    /// Path to the vendor-name head label file
    #[serde(default = "default_name_labels_path")]
    pub name_labels_path: String,

    /// Fixed input sequence length the model was trained with
    #[serde(default = "default_sequence_length")]
    pub sequence_length: usize,

    /// Pad/truncate policy for the encoded sequence
    #[serde(default)]
    pub padding: Padding,

    /// Declared output tensor name of the expense-code head
    #[serde(default = "default_email_head")]
    pub email_head: String,

    /// Declared output tensor name of the vendor-name head
    #[serde(default = "default_name_head")]
    pub name_head: String,

    /// Coerce the expense-code head's labels to integers
    #[serde(default)]
    pub email_labels_numeric: bool,

    /// Coerce the vendor-name head's labels to integers
    #[serde(default)]
    pub name_labels_numeric: bool,

    /// Intra-op thread count for the inference session
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            model_path: default_model_path(),
            vocab_path: default_vocab_path(),
            email_labels_path: default_email_labels_path(),
            name_labels_path: default_name_labels_path(),
            sequence_length: default_sequence_length(),
            padding: Padding::default(),
            email_head: default_email_head(),
            name_head: default_name_head(),
            email_labels_numeric: false,
            name_labels_numeric: false,
            intra_threads: default_intra_threads(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("service").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("PURCHASE_PREDICT").separator("__"));

        let config: ServiceConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_path() -> String {
    "model_mdl_v1.onnx".to_string()
}

fn default_vocab_path() -> String {
    "tokenizer_mdl_v1.json".to_string()
}

fn default_email_labels_path() -> String {
    "class_labels_mail_v1.txt".to_string()
}

fn default_name_labels_path() -> String {
    "class_labels_name_v1.txt".to_string()
}

fn default_sequence_length() -> usize {
    crate::encode::DEFAULT_SEQUENCE_LENGTH
}

fn default_email_head() -> String {
    "email".to_string()
}

fn default_name_head() -> String {
    "name".to_string()
}

fn default_intra_threads() -> usize {
    1
}
