use std::sync::Mutex;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::TensorRef;

use crate::error::{EngineError, StartupError};

/// Raw score vectors for the two model output heads, one entry per class.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadScores {
    pub email: Vec<f32>,
    pub name: Vec<f32>,
}

/// Capability seam over the inference runtime so the request pipeline can be
/// exercised against a deterministic engine in tests.
pub trait InferenceEngine: Send + Sync {
    /// Run one forward pass over a `1 x L` f32 input tensor and return the
    /// raw score vectors for both heads.
    fn infer(&self, input: &Array2<f32>) -> Result<HeadScores, EngineError>;
}

/// ONNX Runtime-backed engine.
///
/// The session is built once at startup and shared read-only thereafter;
/// `run` needs exclusive access, so calls are serialized behind a mutex.
#[derive(Debug)]
pub struct OrtEngine {
    session: Mutex<Session>,
    input_name: String,
    email_output: String,
    name_output: String,
}

impl OrtEngine {
    /// Load the compiled model artifact and discover its tensor bindings.
    ///
    /// The model must declare exactly one input slot and exactly two output
    /// slots. The output-slot-to-head mapping is resolved once here, by
    /// tensor name, and held for the life of the process.
    pub fn load(
        path: &str,
        email_head: &str,
        name_head: &str,
        intra_threads: usize,
    ) -> Result<Self, StartupError> {
        let _ = ort::init().with_name("purchase-predict").commit();

        let model_err = |reason: String| StartupError::Model {
            path: path.to_string(),
            reason,
        };

        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.with_intra_threads(intra_threads))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| model_err(e.to_string()))?;

        if session.inputs.len() != 1 {
            return Err(model_err(format!(
                "expected exactly 1 input slot, found {}",
                session.inputs.len()
            )));
        }
        let input_name = session.inputs[0].name.clone();

        let output_names: Vec<String> =
            session.outputs.iter().map(|o| o.name.clone()).collect();
        let (email_output, name_output) = resolve_heads(&output_names, email_head, name_head)
            .map_err(model_err)?;

        tracing::info!(
            input = %input_name,
            email_head = %email_output,
            name_head = %name_output,
            "loaded inference engine"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            email_output,
            name_output,
        })
    }
}

/// Resolve which declared output slot feeds which semantic head.
///
/// Preferred: both configured head names appear among the declared outputs.
/// Fallback for artifacts exported without meaningful names: with exactly
/// two outputs, slot 1 carries the expense-code ("Email") head and slot 0
/// the vendor-name head — the slot order the trained artifact has always
/// shipped with. Anything else is a startup failure, not a silent guess.
pub(crate) fn resolve_heads(
    outputs: &[String],
    email_head: &str,
    name_head: &str,
) -> Result<(String, String), String> {
    let has = |name: &str| outputs.iter().any(|o| o == name);
    if email_head != name_head && has(email_head) && has(name_head) {
        return Ok((email_head.to_string(), name_head.to_string()));
    }
    if outputs.len() == 2 {
        tracing::warn!(
            outputs = ?outputs,
            "configured head names not found; falling back to slot order (1 -> Email, 0 -> Name)"
        );
        return Ok((outputs[1].clone(), outputs[0].clone()));
    }
    Err(format!(
        "cannot map output slots {outputs:?} to heads ({email_head}, {name_head})"
    ))
}

impl InferenceEngine for OrtEngine {
    fn infer(&self, input: &Array2<f32>) -> Result<HeadScores, EngineError> {
        let tensor = TensorRef::from_array_view(input)?;

        let mut session = self.session.lock().map_err(|_| EngineError::Poisoned)?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => tensor])?;

        // Batch size is always 1, so each head flattens to one score vector.
        let email: Vec<f32> = outputs[self.email_output.as_str()]
            .try_extract_array::<f32>()?
            .iter()
            .copied()
            .collect();
        let name: Vec<f32> = outputs[self.name_output.as_str()]
            .try_extract_array::<f32>()?
            .iter()
            .copied()
            .collect();

        Ok(HeadScores { email, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_heads_by_name() {
        let outputs = names(&["name", "email"]);
        let (email, name) = resolve_heads(&outputs, "email", "name").unwrap();
        assert_eq!(email, "email");
        assert_eq!(name, "name");
    }

    #[test]
    fn name_resolution_ignores_slot_order() {
        let outputs = names(&["email", "name"]);
        let (email, name) = resolve_heads(&outputs, "email", "name").unwrap();
        assert_eq!(email, "email");
        assert_eq!(name, "name");
    }

    #[test]
    fn falls_back_to_slot_order_for_two_anonymous_outputs() {
        let outputs = names(&["output_0", "output_1"]);
        let (email, name) = resolve_heads(&outputs, "email", "name").unwrap();
        assert_eq!(email, "output_1");
        assert_eq!(name, "output_0");
    }

    #[test]
    fn rejects_ambiguous_output_sets() {
        let outputs = names(&["a", "b", "c"]);
        assert!(resolve_heads(&outputs, "email", "name").is_err());
        let outputs = names(&["only"]);
        assert!(resolve_heads(&outputs, "email", "name").is_err());
    }

    #[test]
    fn identical_head_names_cannot_match_by_name() {
        // Degenerate config; with two outputs the slot-order fallback wins.
        let outputs = names(&["head", "other"]);
        let (email, name) = resolve_heads(&outputs, "head", "head").unwrap();
        assert_eq!(email, "other");
        assert_eq!(name, "head");
    }

    #[test]
    fn missing_model_file_is_a_startup_error() {
        let err = OrtEngine::load("/definitely/not/here.onnx", "email", "name", 1).unwrap_err();
        assert!(matches!(err, StartupError::Model { .. }));
    }
}
