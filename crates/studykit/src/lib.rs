//! # `studykit` – The umbrella crate
//!
//! One-stop import gluing together the building-block crates of the
//! workspace:
//!
//! | Crate                 | What it provides                                                      |
//! |-----------------------|------------------------------------------------------------------------|
//! | **`studykit-core`**   | Model resolver, dispatch gate, response normalizer, `StudyClient`      |
//! | **`studykit-prompt`** | Fluent prompt builder and the per-feature prompt functions             |
//! | **`studykit-types`**  | Request/result data model, `DegradedResult`                            |
//! | **`studykit-gemini`** | HTTP backend for the Generative Language `v1beta` API *(optional)*     |
//!
//! By default the `gemini` feature is enabled so a single dependency line is
//! enough to access the whole stack; disable it to stay provider-agnostic
//! and keep `reqwest`/TLS out of your binary.
//!
//! ## Design philosophy
//!
//! * **Degrade, don't raise** – route handlers always receive a well-formed
//!   result object; remote failures arrive as a reason-annotated
//!   [`types::DegradedResult`], never as a transport exception.
//! * **One pipeline** – every feature is validate ▶ prompt ▶ dispatch ▶
//!   normalize; features differ only in wording and target shape.
//! * **Tolerant parsing** – model output is recovered through tiered
//!   fallbacks instead of trusting the provider to return valid JSON.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use studykit::{GeminiAdapterBuilder, StudyClient, types::Complexity};
//!
//! # async fn run() -> studykit::core::Result<()> {
//! let backend = GeminiAdapterBuilder::new_from_env().build()?;
//! let client = StudyClient::new(backend);
//!
//! let result = client.simplify("photosynthesis", Complexity::Basic).await?;
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```

pub use studykit_core as core;
pub use studykit_prompt as prompt;
pub use studykit_types as types;

pub use studykit_core::{
    DispatchConfig, GenerateError, GenerativeProvider, ModelCandidate, ResolverConfig, StudyClient,
};
pub use studykit_types::{FeatureOptions, GenerationRequest, GenerationResult};

#[cfg(feature = "gemini")]
pub use studykit_gemini as gemini;

#[cfg(feature = "gemini")]
pub use studykit_gemini::{GeminiAdapter, GeminiAdapterBuilder};
