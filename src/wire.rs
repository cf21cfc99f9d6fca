//! JSON shapes exchanged with the graph sketcher front end.

use serde::{Deserialize, Serialize};

use crate::error::{AnswerError, Result};

/// Answer type tag for sketched graphs.
pub const GRAPH_CHOICE: &str = "graphChoice";

/// A point as drawn on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    #[serde(default, rename = "ind", skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    pub x: f64,
    pub y: f64,
}

impl WirePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { index: None, x, y }
    }
}

/// One drawn curve.
///
/// `maxima` and `minima` are optional: when both are missing the marker finds the turning points
/// itself. The remaining fields are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    pub pts: Vec<WirePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxima: Option<Vec<WirePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minima: Option<Vec<WirePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_x: Option<Vec<WirePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_y: Option<Vec<WirePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pt: Option<Vec<WirePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_idx: Option<i64>,
}

/// A text label placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// A sketched answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnswer {
    #[serde(default)]
    pub canvas_width: f64,
    #[serde(default)]
    pub canvas_height: f64,
    #[serde(default)]
    pub curves: Vec<Curve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_symbols: Option<Vec<Symbol>>,
}

impl GraphAnswer {
    /// Parses an answer from JSON.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::Malformed` if the JSON does not describe an answer.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(AnswerError::from)?)
    }
}

/// A submitted answer of any type, with its value still encoded as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEnvelope {
    #[serde(rename = "type")]
    pub answer_type: String,
    pub value: String,
}

impl AnswerEnvelope {
    /// Decodes the sketched graph inside this envelope.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::UnknownAnswerType` unless the type is `graphChoice`, and
    /// `AnswerError::Malformed` if the value is not a graph answer.
    pub fn graph_answer(&self) -> Result<GraphAnswer> {
        if self.answer_type != GRAPH_CHOICE {
            return Err(AnswerError::UnknownAnswerType(self.answer_type.clone()).into());
        }
        GraphAnswer::from_json(&self.value)
    }
}

/// One accepted shape and the response given when it matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionItem<R> {
    pub graph_definition: String,
    pub response: R,
}

/// Every accepted shape for a question, in priority order, and the response when none match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSolutions<R> {
    pub answers: Vec<SolutionItem<R>>,
    pub unmatched_response: R,
}

impl<R> GraphSolutions<R> {
    #[must_use]
    pub fn new(answers: Vec<SolutionItem<R>>, unmatched_response: R) -> Self {
        Self {
            answers,
            unmatched_response,
        }
    }
}

/// A marking verdict with optional free-form explanation content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<serde_json::Value>,
}
