//! Answer representations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw answers as supplied by the case storage collaborator: field id to an
/// arbitrary scalar (string, number, boolean or null).
pub type RawAnswers = BTreeMap<String, serde_json::Value>;

/// A normalized answer: the trimmed raw input alongside its canonical form.
///
/// `norm` is the canonical value for the field's inferred type: an ISO
/// date, an integer string, `"true"`/`"false"`, or passthrough text. Raw
/// answers remain the source of truth; normalized values are a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAnswer {
    pub raw: String,
    pub norm: String,
}

/// Normalized answers keyed by field id.
pub type AnswerSet = BTreeMap<String, NormalizedAnswer>;
