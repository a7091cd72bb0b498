use crate::encode::encode;
use crate::error::{ServerError, ServerResult};
use crate::rank::{rank, Label, RankedPrediction};
use crate::state::ServiceContext;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One purchase transaction record. Every field is required; empty strings
/// are valid input. Field names follow the wire format the original clients
/// send.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "Company")]
    pub company: Option<String>,

    #[serde(rename = "Vendor")]
    pub vendor: Option<String>,

    #[serde(rename = "PO")]
    pub po: Option<String>,

    #[serde(rename = "Material")]
    pub material: Option<String>,

    #[serde(rename = "MatGroup")]
    pub mat_group: Option<String>,

    #[serde(rename = "Plant")]
    pub plant: Option<String>,
}

/// Prediction response: the top label from each head plus both full ranked
/// lists, rank 0 first.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(rename = "predicted_Email")]
    pub predicted_email: Label,

    #[serde(rename = "predicted_Name")]
    pub predicted_name: Label,

    #[serde(rename = "sorted_prediction_scores_Email")]
    pub sorted_prediction_scores_email: Vec<RankedPrediction>,

    #[serde(rename = "sorted_prediction_scores_Name")]
    pub sorted_prediction_scores_name: Vec<RankedPrediction>,
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, ServerError> {
    value.as_deref().ok_or(ServerError::MissingField(field))
}

fn top_label(ranked: &[RankedPrediction], head: &str) -> Result<Label, ServerError> {
    ranked
        .first()
        .map(|prediction| prediction.label.clone())
        .ok_or_else(|| ServerError::Internal(format!("{head} ranking produced no entries")))
}

/// Classify one purchase transaction.
///
/// Validates the six required fields, concatenates them in fixed order,
/// normalizes and encodes the text, runs one forward pass, and ranks both
/// output heads against their label lists. Validation failures never reach
/// the engine.
pub async fn predict(
    State(state): State<Arc<ServiceContext>>,
    Json(request): Json<PredictRequest>,
) -> ServerResult<impl IntoResponse> {
    let company = require("Company", &request.company)?;
    let vendor = require("Vendor", &request.vendor)?;
    let po = require("PO", &request.po)?;
    let material = require("Material", &request.material)?;
    let mat_group = require("MatGroup", &request.mat_group)?;
    let plant = require("Plant", &request.plant)?;

    let combined = format!("{company} {vendor} {po} {material} {mat_group} {plant}");
    let normalized = state.normalizer.normalize(&combined);
    let input = encode(
        &normalized,
        &state.vocab,
        state.config.sequence_length,
        state.config.padding,
    );

    tracing::debug!(normalized = %normalized, "running inference");

    // The session run blocks on the engine mutex; keep it off the async
    // workers.
    let engine = state.engine.clone();
    let scores = tokio::task::spawn_blocking(move || engine.infer(&input))
        .await
        .map_err(|e| ServerError::Internal(format!("inference task failed: {e}")))??;

    let sorted_email = rank(
        &scores.email,
        &state.email_labels,
        state.config.email_labels_numeric,
    )?;
    let sorted_name = rank(
        &scores.name,
        &state.name_labels,
        state.config.name_labels_numeric,
    )?;

    let predicted_email = top_label(&sorted_email, "email")?;
    let predicted_name = top_label(&sorted_name, "name")?;

    Ok(Json(PredictResponse {
        predicted_email,
        predicted_name,
        sorted_prediction_scores_email: sorted_email,
        sorted_prediction_scores_name: sorted_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_field_names_match_the_wire_format() {
        let request: PredictRequest = serde_json::from_str(
            r#"{"Company": "ACME", "Vendor": "V1", "PO": "", "Material": "Steel",
                "MatGroup": "G1", "Plant": "P1"}"#,
        )
        .unwrap();
        assert_eq!(request.company.as_deref(), Some("ACME"));
        assert_eq!(request.po.as_deref(), Some(""));
        assert_eq!(request.plant.as_deref(), Some("P1"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let request: PredictRequest = serde_json::from_str(r#"{"Company": "ACME"}"#).unwrap();
        assert!(request.vendor.is_none());
        assert!(require("Vendor", &request.vendor).is_err());
    }

    #[test]
    fn empty_string_is_valid_input() {
        let request: PredictRequest = serde_json::from_str(r#"{"PO": ""}"#).unwrap();
        assert_eq!(require("PO", &request.po).unwrap(), "");
    }

    #[test]
    fn top_label_of_empty_ranking_is_an_error() {
        let err = top_label(&[], "email").unwrap_err();
        assert!(err.to_string().contains("no entries"));
    }
}
