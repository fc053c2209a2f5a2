//! Google Generative Language (Gemini) backend for the studykit workspace.
//!
//! Implements [`studykit_core::GenerativeProvider`] on top of the `v1beta`
//! REST API: model discovery via `GET /models` and generation via
//! `POST /models/{id}:generateContent`. All HTTP and status-code concerns
//! are translated into the core error taxonomy before crossing the provider
//! boundary.

mod adapter;
mod provider_impl;

pub use adapter::{GeminiAdapter, GeminiAdapterBuilder};
pub mod api_v1beta;
mod client;
pub mod error;

pub use client::GeminiClient;
