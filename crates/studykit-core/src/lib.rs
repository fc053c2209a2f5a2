//! Core orchestration layer of the **studykit** workspace.
//!
//! This crate turns "call the remote generation API" into something a route
//! handler can depend on:
//!
//! | Module       | Responsibility                                               |
//! |--------------|--------------------------------------------------------------|
//! | [`resolver`] | discover + select a usable model, cached per process         |
//! | [`dispatch`] | off-thread execution, timeouts, one bounded retry            |
//! | [`normalize`]| tiered recovery of structured results from raw model text    |
//! | [`client`]   | the six feature operations as one uniform pipeline           |
//! | [`provider`] | the trait a concrete backend (e.g. `studykit-gemini`) implements |
//! | [`error`]    | the closed failure taxonomy shared by all of the above       |
//!
//! Callers never see a raw transport exception: invalid input is rejected
//! up front, everything else degrades into a reason-annotated
//! [`studykit_types::DegradedResult`].

pub mod client;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod resolver;

pub use client::StudyClient;
pub use dispatch::{DispatchConfig, DispatchGate};
pub use error::{GenerateError, Result};
pub use normalize::normalize;
pub use provider::{DiscoveredModel, GenerativeProvider};
pub use resolver::{ModelCandidate, ModelResolver, ResolvedModel, ResolverConfig};
