//! Prompt construction for the studykit workspace.
//!
//! * [`builder`] – a fluent, validation-free helper for assembling prompt
//!   text without `format!` soup.
//! * [`features`] – one prompt function per [`studykit_types::FeatureKind`],
//!   the *only* place feature-specific wording lives.

pub mod builder;
pub mod features;

pub use builder::PromptBuilder;
pub use features::build_prompt;
