//! Inbound request model.
//!
//! A [`GenerationRequest`] is created per incoming call and never persisted.
//! Feature-specific variance lives entirely in the [`FeatureOptions`] tag;
//! downstream code matches on it to pick a prompt builder and a target
//! response shape, so no feature ever grows its own resolution, dispatch or
//! parsing path.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Bare discriminant of the six supported features.
///
/// Use [`FeatureOptions::kind`] to obtain it from a concrete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Summarize,
    Simplify,
    Quiz,
    MindMap,
    Research,
    VoiceClean,
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Summarize => write!(f, "summarize"),
            FeatureKind::Simplify => write!(f, "simplify"),
            FeatureKind::Quiz => write!(f, "quiz"),
            FeatureKind::MindMap => write!(f, "mindmap"),
            FeatureKind::Research => write!(f, "research"),
            FeatureKind::VoiceClean => write!(f, "voice_clean"),
        }
    }
}

/// Target audience level for the simplify (ELI5) feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

/// Whether a summary may rephrase the source or must reuse its sentences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    #[default]
    Abstractive,
    Extractive,
}

/// Presentation style of a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    #[default]
    Narrative,
    Beginner,
    Technical,
    Bullet,
}

/// Tagged per-feature options. One variant per [`FeatureKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "feature", rename_all = "snake_case")]
pub enum FeatureOptions {
    Summarize {
        /// Upper bound on the summary length, in words.
        max_words: u32,
        kind: SummaryKind,
        mode: SummaryMode,
    },
    Simplify {
        complexity: Complexity,
    },
    Quiz {
        num_questions: u32,
    },
    MindMap {
        /// Caller-suggested subtopics to fold into the map. May be empty.
        subtopics: Vec<String>,
    },
    Research,
    VoiceClean,
}

impl FeatureOptions {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureOptions::Summarize { .. } => FeatureKind::Summarize,
            FeatureOptions::Simplify { .. } => FeatureKind::Simplify,
            FeatureOptions::Quiz { .. } => FeatureKind::Quiz,
            FeatureOptions::MindMap { .. } => FeatureKind::MindMap,
            FeatureOptions::Research => FeatureKind::Research,
            FeatureOptions::VoiceClean => FeatureKind::VoiceClean,
        }
    }
}

/// One generation call: validated input text plus feature options.
///
/// Created per incoming call and owned by the pipeline for its duration;
/// nothing here outlives the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text study material or topic. Must be non-blank; the orchestrator
    /// rejects blank input before any remote call is made.
    pub input: String,
    pub feature: FeatureOptions,
}

impl GenerationRequest {
    pub fn new(input: impl Into<String>, feature: FeatureOptions) -> Self {
        Self {
            input: input.into(),
            feature,
        }
    }

    pub fn kind(&self) -> FeatureKind {
        self.feature.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_options_variant() {
        let req = GenerationRequest::new(
            "photosynthesis",
            FeatureOptions::Simplify {
                complexity: Complexity::Basic,
            },
        );
        assert_eq!(req.kind(), FeatureKind::Simplify);

        let req = GenerationRequest::new("notes", FeatureOptions::Quiz { num_questions: 5 });
        assert_eq!(req.kind(), FeatureKind::Quiz);
    }

    #[test]
    fn feature_kind_renders_lowercase() {
        assert_eq!(FeatureKind::VoiceClean.to_string(), "voice_clean");
        assert_eq!(FeatureKind::MindMap.to_string(), "mindmap");
    }
}
