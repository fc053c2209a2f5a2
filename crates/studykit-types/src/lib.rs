//! Data model shared by every crate in the **studykit** workspace.
//!
//! Two halves:
//!
//! * [`request`] – what a caller hands in: input text plus the tagged
//!   per-feature options ([`request::FeatureOptions`]).
//! * [`result`] – what a caller gets back: one fixed shape per feature,
//!   or a reason-annotated [`result::DegradedResult`] when the remote
//!   service could not deliver.
//!
//! The crate is deliberately free of I/O and async machinery so it can be
//! used in tests, route handlers and backends without pulling in a runtime.

pub mod request;
pub mod result;

pub use request::{
    Complexity, FeatureKind, FeatureOptions, GenerationRequest, SummaryKind, SummaryMode,
};
pub use result::{
    DegradeReason, DegradedResult, GenerationResult, MindMap, MindMapBranch, MindMapNode, Quiz,
    QuizQuestion, ResearchNotes, SimpleExplanation, SummaryNotes, VoiceNotes,
};
