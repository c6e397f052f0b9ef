use serde::{Deserialize, Serialize};

use crate::filter::FilterExpression;

/// Message handed back to the chat runtime when the search form completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: FormulaPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaPayload {
    pub formula: FilterExpression,
}

impl CompletionPayload {
    pub fn complete(formula: FilterExpression) -> Self {
        Self {
            kind: "complete".to_string(),
            payload: FormulaPayload { formula },
        }
    }
}
