//! Per-feature prompt construction.
//!
//! [`build_prompt`] is the single entry point: it matches on the request's
//! [`FeatureOptions`] and assembles the instruction text, the embedded input
//! and the JSON shape the normalizer will later parse against. Nothing else
//! in the workspace contains feature-specific wording.

use studykit_types::{
    Complexity, FeatureOptions, GenerationRequest, SummaryKind, SummaryMode,
};

use crate::builder::PromptBuilder;

/// Build the full prompt for `request`.
///
/// The input text is assumed to be validated (non-blank) by the caller; this
/// function never fails.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match &request.feature {
        FeatureOptions::Summarize {
            max_words,
            kind,
            mode,
        } => summarize_prompt(&request.input, *max_words, *kind, *mode),
        FeatureOptions::Simplify { complexity } => simplify_prompt(&request.input, *complexity),
        FeatureOptions::Quiz { num_questions } => quiz_prompt(&request.input, *num_questions),
        FeatureOptions::MindMap { subtopics } => mindmap_prompt(&request.input, subtopics),
        FeatureOptions::Research => research_prompt(&request.input),
        FeatureOptions::VoiceClean => voice_clean_prompt(&request.input),
    }
}

fn style_instruction(mode: SummaryMode) -> &'static str {
    match mode {
        SummaryMode::Narrative => {
            "Write the summary in a flowing, story-like manner that's engaging and easy to follow."
        }
        SummaryMode::Beginner => {
            "Use simple, clear language suitable for beginners. Avoid technical terms and explain concepts in basic terms."
        }
        SummaryMode::Technical => {
            "Use precise technical language and domain-specific terminology. Maintain a professional and academic tone."
        }
        SummaryMode::Bullet => {
            "Present the summary as a structured list of key points, using bullet points for clarity."
        }
    }
}

fn method_instruction(kind: SummaryKind) -> &'static str {
    match kind {
        SummaryKind::Extractive => {
            "Create the summary by selecting and combining the most important sentences from the original text. Maintain the original wording where possible."
        }
        SummaryKind::Abstractive => {
            "Generate a new summary that captures the meaning of the text in your own words. Rephrase and restructure the content while maintaining accuracy."
        }
    }
}

fn audience_phrase(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Basic => "like you're explaining to a 10-year-old, using very simple terms",
        Complexity::Intermediate => {
            "for a high school student, balancing simplicity with some technical details"
        }
        Complexity::Advanced => {
            "for a college student, maintaining clarity while including technical concepts"
        }
    }
}

fn summarize_prompt(text: &str, max_words: u32, kind: SummaryKind, mode: SummaryMode) -> String {
    PromptBuilder::new()
        .add_line("Please summarize the following text according to these specifications:")
        .add_blank_line()
        .add_key_value("Style", style_instruction(mode))
        .add_key_value("Method", method_instruction(kind))
        .add_key_value("Maximum Length", format!("{max_words} words"))
        .add_blank_line()
        .add_labeled_block("Text to summarize", text)
        .add_blank_line()
        .add_json_shape(
            r#"{
    "summary": "the summarized text",
    "key_points": ["point 1", "point 2", "point 3"],
    "word_count": number_of_words_in_summary
}"#,
        )
        .finalize()
}

fn simplify_prompt(topic: &str, complexity: Complexity) -> String {
    PromptBuilder::new()
        .add_line(format!(
            "Explain this topic {}.",
            audience_phrase(complexity)
        ))
        .add_line("Break down complex concepts into simpler parts.")
        .add_line("Use clear analogies and real-world examples.")
        .add_blank_line()
        .add_labeled_block("Topic to explain", topic)
        .add_blank_line()
        .add_json_shape(format!(
            r#"{{
    "original_topic": "{topic}",
    "simple_explanation": "A clear, simple explanation of the topic",
    "key_concepts": ["Key concept 1 in simple terms", "Key concept 2 in simple terms"],
    "examples": ["A concrete, real-world example 1", "A concrete, real-world example 2"],
    "analogies": ["A relatable analogy 1", "A relatable analogy 2"]
}}"#
        ))
        .add_blank_line()
        .add_line("Requirements:")
        .add_numbered(&[
            "Each array should have 2-4 items",
            "Keep explanations concise and clear",
            "Use language appropriate for the requested level",
        ])
        .finalize()
}

fn quiz_prompt(text: &str, num_questions: u32) -> String {
    PromptBuilder::new()
        .add_line(format!(
            "Based on the following text, generate {num_questions} multiple choice questions."
        ))
        .add_line("For each question:")
        .add_numbered(&[
            "Generate a clear, specific question",
            "Create 4 distinct answer options labeled A, B, C, D",
            "Mark one option as correct",
            "Provide a brief explanation for why the correct answer is right",
        ])
        .add_blank_line()
        .add_labeled_block("Text to generate questions from", text)
        .add_blank_line()
        .add_json_shape(format!(
            r#"{{
    "questions": [
        {{
            "question": "What is...?",
            "options": ["A) First option", "B) Second option", "C) Third option", "D) Fourth option"],
            "correct_answer": "A) First option",
            "explanation": "This is correct because..."
        }}
    ],
    "total_questions": {num_questions}
}}"#
        ))
        .add_blank_line()
        .add_line("Requirements:")
        .add_numbered(&[
            "Each option MUST start with its letter (A, B, C, or D) followed by a closing parenthesis",
            "The correct_answer MUST exactly match one of the options including the letter prefix",
            "Generate exactly the requested number of questions",
        ])
        .finalize()
}

fn mindmap_prompt(topic: &str, subtopics: &[String]) -> String {
    let builder = PromptBuilder::new()
        .add_line("Create a comprehensive mind map structure.")
        .add_line("Include 3-5 main branches, each with 2-4 subtopics.")
        .add_line("Each subtopic should have 2-3 key details or facts.")
        .add_blank_line();

    let builder = if subtopics.is_empty() {
        builder.add_labeled_block("Generate a mind map for this topic", topic)
    } else {
        builder
            .add_labeled_block("Generate a mind map for this topic", topic)
            .add_line(format!(
                "Incorporate these subtopics, organized into logical branches, adding further relevant subtopics as needed: {}",
                subtopics.join(", ")
            ))
    };

    builder
        .add_blank_line()
        .add_json_shape(
            r#"{
    "topic": "main topic",
    "branches": [
        {
            "name": "main branch name",
            "subtopics": [
                {"name": "subtopic name", "details": ["detail 1", "detail 2"]}
            ]
        }
    ]
}"#,
        )
        .finalize()
}

fn research_prompt(text: &str) -> String {
    PromptBuilder::new()
        .add_line("Extract the key points, important facts, and main ideas from the following text.")
        .add_line("Organize them in a structured format.")
        .add_blank_line()
        .add_labeled_block("Text", text)
        .add_blank_line()
        .add_json_shape(
            r#"{
    "key_points": ["point 1", "point 2", "point 3"],
    "important_facts": ["fact 1", "fact 2"],
    "main_ideas": ["idea 1", "idea 2"],
    "vocabulary": ["term 1: definition", "term 2: definition"]
}"#,
        )
        .finalize()
}

fn voice_clean_prompt(speech_text: &str) -> String {
    PromptBuilder::new()
        .add_line("Clean and process the following speech text, then create bullet-point notes from it.")
        .add_blank_line()
        .add_labeled_block("Speech text", speech_text)
        .add_blank_line()
        .add_json_shape(
            r#"{
    "cleaned_text": "The cleaned and corrected version of the speech text",
    "notes": ["First bullet point note", "Second bullet point note", "Third bullet point note"]
}"#,
        )
        .add_blank_line()
        .add_line("Requirements:")
        .add_numbered(&[
            "Clean up any speech-to-text errors, filler words, and repetitions",
            "Make the cleaned text readable and grammatically correct",
            "Create 3-5 concise bullet-point notes from the content",
            "Keep notes factual and easy to read",
        ])
        .finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_feature_embeds_the_input() {
        let features = [
            FeatureOptions::Summarize {
                max_words: 200,
                kind: SummaryKind::Abstractive,
                mode: SummaryMode::Narrative,
            },
            FeatureOptions::Simplify {
                complexity: Complexity::Basic,
            },
            FeatureOptions::Quiz { num_questions: 3 },
            FeatureOptions::MindMap { subtopics: vec![] },
            FeatureOptions::Research,
            FeatureOptions::VoiceClean,
        ];
        for feature in features {
            let request = GenerationRequest::new("the krebs cycle", feature);
            let prompt = build_prompt(&request);
            assert!(
                prompt.contains("the krebs cycle"),
                "input missing for {:?}",
                request.kind()
            );
            assert!(prompt.contains("JSON"), "shape missing for {:?}", request.kind());
        }
    }

    #[test]
    fn quiz_prompt_carries_the_requested_count() {
        let request = GenerationRequest::new("cells", FeatureOptions::Quiz { num_questions: 7 });
        let prompt = build_prompt(&request);
        assert!(prompt.contains("generate 7 multiple choice questions"));
        assert!(prompt.contains("\"total_questions\": 7"));
    }

    #[test]
    fn mindmap_prompt_folds_in_subtopics() {
        let request = GenerationRequest::new(
            "world war two",
            FeatureOptions::MindMap {
                subtopics: vec!["causes".into(), "aftermath".into()],
            },
        );
        let prompt = build_prompt(&request);
        assert!(prompt.contains("causes, aftermath"));
    }
}
