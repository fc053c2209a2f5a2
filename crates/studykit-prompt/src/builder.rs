//! Builder-style helper for constructing generation prompts.
//!
//! Writing long instruction strings inline is tedious and error-prone.
//! `PromptBuilder` offers a fluent API that lets you focus on the *content*
//! instead of the plumbing. Every method returns `self`, enabling
//! call-chaining:
//!
//! ```rust
//! use studykit_prompt::builder::PromptBuilder;
//!
//! let prompt = PromptBuilder::new()
//!     .add_line("Summarize the following text.")
//!     .add_key_value("Maximum Length", "200 words")
//!     .add_blank_line()
//!     .add_labeled_block("Text to summarize", "Rust is a systems language.")
//!     .finalize();
//!
//! assert!(prompt.starts_with("Summarize"));
//! ```
//!
//! The builder performs **no validation** besides `expect`ing that writing to
//! the internal `String` never fails (which it shouldn't). It also refrains
//! from smart-formatting to stay predictable; newlines and whitespace are
//! emitted exactly as requested.

use std::fmt::{Display, Write as _};

/// Fluent helper to produce prompt text.
///
/// Internally it owns a `String` buffer that grows with each chained call.
/// Once you're done, call [`Self::finalize`] to obtain the assembled prompt.
pub struct PromptBuilder {
    buffer: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Create a fresh, empty builder.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "{line}").expect("failed to write buffer");
        self
    }

    /// Add a `Key: Value` line, the format used for per-request knobs such
    /// as style or length limits.
    pub fn add_key_value(mut self, key: impl Display, value: impl Display) -> Self {
        writeln!(self.buffer, "{key}: {value}").expect("failed to write buffer");
        self
    }

    /// Add a numbered requirement list starting at 1.
    pub fn add_numbered(mut self, items: &[&str]) -> Self {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.buffer, "{}. {item}", i + 1).expect("failed to write buffer");
        }
        self
    }

    /// Embed caller-supplied text under a label:
    ///
    /// ```text
    /// Text to summarize:
    /// <content>
    /// ```
    pub fn add_labeled_block(self, label: impl Display, content: impl Display) -> Self {
        self.add_line(format!("{label}:")).add_line(content)
    }

    /// Embed the JSON shape the model must reply with, framed by explicit
    /// instructions. Models drift less when the shape is shown verbatim
    /// rather than described.
    pub fn add_json_shape(self, shape: impl Display) -> Self {
        self.add_line("Respond with only a JSON object in this exact format:")
            .add_line(shape)
            .add_blank_line()
            .add_line("Respond only with the JSON, no additional text and no markdown formatting.")
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Retrieve the accumulated prompt and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_preserve_order_and_newlines() {
        let prompt = PromptBuilder::new()
            .add_line("first")
            .add_blank_line()
            .add_key_value("Style", "narrative")
            .add_numbered(&["one", "two"])
            .finalize();
        assert_eq!(prompt, "first\n\nStyle: narrative\n1. one\n2. two\n");
    }

    #[test]
    fn json_shape_frames_the_payload() {
        let prompt = PromptBuilder::new().add_json_shape("{\"a\": 1}").finalize();
        assert!(prompt.contains("exact format"));
        assert!(prompt.contains("{\"a\": 1}"));
        assert!(prompt.contains("no markdown"));
    }
}
