//! Outbound result model.
//!
//! Each feature has a fixed field set that the remote model is prompted to
//! fill. The structs double as the *strict-parse targets* for the response
//! normalizer, so they derive [`serde::Deserialize`] with lenient defaults on
//! the ordered-sequence fields (a model that omits an array should not sink
//! the whole parse) and [`schemars::JsonSchema`] so a JSON Schema for each
//! shape can be generated for validation or API documentation instead of
//! being hand-written.
//!
//! A [`GenerationResult`] is created once by the normalizer, handed to the
//! caller, and never mutated afterwards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::request::FeatureKind;

/// Polymorphic result, one variant per feature plus the degraded marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationResult {
    Summary(SummaryNotes),
    Simplified(SimpleExplanation),
    Quiz(Quiz),
    MindMap(MindMap),
    Research(ResearchNotes),
    VoiceNotes(VoiceNotes),
    Degraded(DegradedResult),
}

impl GenerationResult {
    /// True when the remote service could not deliver and this value is a
    /// reason-annotated placeholder.
    pub fn is_degraded(&self) -> bool {
        matches!(self, GenerationResult::Degraded(_))
    }
}

/// Summary of a block of study material.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummaryNotes {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub word_count: u32,
}

/// Simplified ("explain like I'm five") breakdown of a topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SimpleExplanation {
    pub original_topic: String,
    pub simple_explanation: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub analogies: Vec<String>,
}

/// Multiple-choice quiz generated from study material.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub total_questions: u32,
}

/// One four-option question. Options carry `A) … D)` prefixes and
/// `correct_answer` matches one option verbatim; the normalizer repairs
/// prefix drift before a quiz is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Hierarchical mind map: topic, branches, subtopics with detail facts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MindMap {
    pub topic: String,
    #[serde(default)]
    pub branches: Vec<MindMapBranch>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MindMapBranch {
    pub name: String,
    #[serde(default)]
    pub subtopics: Vec<MindMapNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MindMapNode {
    pub name: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Structured research notes extracted from source text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchNotes {
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub important_facts: Vec<String>,
    #[serde(default)]
    pub main_ideas: Vec<String>,
    /// `term: definition` pairs.
    #[serde(default)]
    pub vocabulary: Vec<String>,
}

/// Cleaned transcript plus bullet notes for the voice feature.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VoiceNotes {
    pub cleaned_text: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Why a [`DegradedResult`] was produced instead of real content.
///
/// Mirrors the remote-originated half of the core error taxonomy; caller
/// input errors are *not* represented here because they are rejected before
/// a result object exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeReason {
    /// No usable model could be resolved with the current credentials.
    ModelUnavailable,
    Timeout,
    RateLimited,
    AuthFailed,
    /// Transport-level failure talking to the remote API.
    Unavailable,
    /// Every normalization tier was exhausted.
    UnparsableOutput,
    Unknown,
}

/// Structurally valid placeholder returned when the remote service could not
/// be reached or its output could not be used.
///
/// `partial_text` carries whatever raw output was salvageable so downstream
/// rendering can show *something* instead of an empty shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradedResult {
    pub feature: FeatureKind,
    pub reason: DegradeReason,
    /// Human-readable explanation suitable for display.
    pub message: String,
    #[serde(default)]
    pub partial_text: Option<String>,
}

impl DegradedResult {
    pub fn new(feature: FeatureKind, reason: DegradeReason, message: impl Into<String>) -> Self {
        Self {
            feature,
            reason,
            message: message.into(),
            partial_text: None,
        }
    }

    pub fn with_partial_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.partial_text = Some(text);
        }
        self
    }
}
