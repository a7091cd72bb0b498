use serde::{Deserialize, Serialize};

use crate::error::RankError;
use crate::labels::LabelStore;

/// A prediction label: the raw class name, or its integer form when the
/// head's labels are numeric codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Code(i64),
    Text(String),
}

/// One entry of a ranked prediction list. Scores are on a 0-100 percentage
/// scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPrediction {
    pub label: Label,
    pub score: f32,
}

/// Pair a raw score vector with its label list and produce a list sorted by
/// descending score.
///
/// Scores and labels pair positionally and must have equal length. Raw model
/// scores are assumed to be in [0, 1] and are rescaled by 100.
///
/// With `numeric_coercion` enabled each label is parsed as a float and
/// truncated to an integer; a label that fails to parse is skipped entirely
/// rather than failing the call. This lenient-skip policy matches the
/// behavior the label files were curated against, so the output may hold
/// fewer entries than the label list.
///
/// The sort is stable: equal scores keep label-list order, so output is
/// reproducible across runs.
pub fn rank(
    scores: &[f32],
    labels: &LabelStore,
    numeric_coercion: bool,
) -> Result<Vec<RankedPrediction>, RankError> {
    if scores.len() != labels.len() {
        return Err(RankError::LengthMismatch {
            scores: scores.len(),
            labels: labels.len(),
        });
    }

    let mut ranked = Vec::with_capacity(scores.len());
    for (label, &score) in labels.iter().zip(scores) {
        let label = if numeric_coercion {
            match label.parse::<f64>() {
                Ok(value) => Label::Code(value as i64),
                Err(_) => {
                    tracing::debug!(label = %label, "skipping label that failed numeric coercion");
                    continue;
                }
            }
        } else {
            Label::Text(label.to_string())
        };
        ranked.push(RankedPrediction {
            label,
            score: score * 100.0,
        });
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &str) -> LabelStore {
        LabelStore::from_lines(raw)
    }

    #[test]
    fn sorts_descending_by_score() {
        let ranked = rank(&[0.1, 0.7, 0.2], &labels("a\nb\nc"), false).unwrap();
        assert_eq!(ranked[0].label, Label::Text("b".into()));
        assert_eq!(ranked[1].label, Label::Text("c".into()));
        assert_eq!(ranked[2].label, Label::Text("a".into()));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn scores_are_rescaled_to_percentages() {
        let ranked = rank(&[0.25], &labels("a"), false).unwrap();
        assert!((ranked[0].score - 25.0).abs() < 1e-6);
    }

    #[test]
    fn without_coercion_all_entries_survive() {
        let ranked = rank(&[0.1, 0.2, 0.3, 0.4], &labels("a\nb\nc\nd"), false).unwrap();
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn coercion_skips_unparseable_labels() {
        let ranked = rank(&[0.1, 0.9, 0.2], &labels("10\nabc\n20"), true).unwrap();
        assert_eq!(
            ranked,
            vec![
                RankedPrediction {
                    label: Label::Code(20),
                    score: 20.0
                },
                RankedPrediction {
                    label: Label::Code(10),
                    score: 10.0
                },
            ]
        );
    }

    #[test]
    fn coercion_truncates_fractional_labels() {
        let ranked = rank(&[0.5], &labels("12.9"), true).unwrap();
        assert_eq!(ranked[0].label, Label::Code(12));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = rank(&[0.1, 0.2], &labels("a\nb\nc"), false).unwrap_err();
        assert!(err.to_string().contains("2"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn ties_keep_label_list_order() {
        let ranked = rank(&[0.5, 0.5, 0.5], &labels("first\nsecond\nthird"), false).unwrap();
        assert_eq!(ranked[0].label, Label::Text("first".into()));
        assert_eq!(ranked[1].label, Label::Text("second".into()));
        assert_eq!(ranked[2].label, Label::Text("third".into()));
    }

    #[test]
    fn labels_serialize_by_shape() {
        let code = serde_json::to_string(&Label::Code(42)).unwrap();
        assert_eq!(code, "42");
        let text = serde_json::to_string(&Label::Text("a@b.com".into())).unwrap();
        assert_eq!(text, "\"a@b.com\"");
    }
}
