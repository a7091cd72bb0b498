use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::vocab::VocabAdapter;

/// Fixed sequence length the model was trained with.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 6;

/// Fill value for positions beyond the tokenized length.
pub const PAD_VALUE: f32 = 0.0;

/// Which side of the sequence padding and truncation apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Pad at the front; truncation keeps the tail of the sequence.
    Pre,
    /// Pad at the end; truncation keeps the head of the sequence.
    #[default]
    Post,
}

/// Encode normalized text into a fixed-shape `1 x length` f32 tensor.
///
/// Tokens are mapped to ids through the vocabulary adapter (which owns the
/// unknown-token policy), then padded or truncated to `length`. Always
/// produces a tensor of exactly that shape; there are no error conditions.
pub fn encode(
    normalized: &str,
    vocab: &VocabAdapter,
    length: usize,
    padding: Padding,
) -> Array2<f32> {
    let ids = vocab.ids(normalized);
    let mut tensor = Array2::from_elem((1, length), PAD_VALUE);

    match padding {
        Padding::Post => {
            for (slot, id) in tensor.row_mut(0).iter_mut().zip(ids.iter().take(length)) {
                *slot = *id as f32;
            }
        }
        Padding::Pre => {
            let kept = if ids.len() > length {
                &ids[ids.len() - length..]
            } else {
                &ids[..]
            };
            let offset = length - kept.len();
            for (i, id) in kept.iter().enumerate() {
                tensor[[0, offset + i]] = *id as f32;
            }
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> VocabAdapter {
        VocabAdapter::from_json(
            r#"{"config": {"lower": true, "oov_token": null,
                "word_index": "{\"a\": 1, \"b\": 2, \"c\": 3, \"d\": 4, \"e\": 5, \"f\": 6, \"g\": 7, \"h\": 8}"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn short_input_right_pads_with_zero() {
        let tensor = encode("a b", &vocab(), 6, Padding::Post);
        assert_eq!(tensor.shape(), &[1, 6]);
        assert_eq!(
            tensor.row(0).to_vec(),
            vec![1.0, 2.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn long_input_right_truncates() {
        let tensor = encode("a b c d e f g h", &vocab(), 6, Padding::Post);
        assert_eq!(
            tensor.row(0).to_vec(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn empty_input_is_all_pad() {
        let tensor = encode("", &vocab(), 6, Padding::Post);
        assert_eq!(tensor.row(0).to_vec(), vec![0.0; 6]);
    }

    #[test]
    fn pre_padding_fills_the_front() {
        let tensor = encode("a b", &vocab(), 6, Padding::Pre);
        assert_eq!(
            tensor.row(0).to_vec(),
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0]
        );
    }

    #[test]
    fn pre_truncation_keeps_the_tail() {
        let tensor = encode("a b c d e f g h", &vocab(), 6, Padding::Pre);
        assert_eq!(
            tensor.row(0).to_vec(),
            vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let vocab = vocab();
        let first = encode("a b c", &vocab, 6, Padding::Post);
        let second = encode("a b c", &vocab, 6, Padding::Post);
        assert_eq!(first, second);
    }

    #[test]
    fn exact_length_input_is_unchanged() {
        let tensor = encode("a b c d e f", &vocab(), 6, Padding::Post);
        assert_eq!(
            tensor.row(0).to_vec(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }
}
