//! Response normalization: raw model text in, structured result out.
//!
//! The remote model is *asked* for JSON but nothing guarantees it: replies
//! arrive wrapped in markdown code fences, prefixed with prose, or as plain
//! bullet lists. Treating any of that as fatal would make every feature
//! fragile to benign prompt-response drift, so normalization is a tiered
//! fallback state machine with each tier a pure function:
//!
//! 1. **strict** – parse the trimmed text against the feature's shape;
//! 2. **lenient** – strip code-fence wrappers and surrounding prose, parse
//!    again;
//! 3. **heuristic** – split on list markers and newlines to fill the
//!    ordered-sequence fields, with leading prose as the primary
//!    explanation/summary field;
//! 4. **degraded** – nothing salvageable: a [`DegradedResult`] with reason
//!    `UnparsableOutput`, carrying the raw text so rendering can still show
//!    something.
//!
//! Quizzes get one extra repair step after a successful parse: option
//! prefixes are normalized to `A) … D)` and `correct_answer` is re-anchored
//! to a matching option, mirroring the drift the backend service has always
//! had to tolerate.

use studykit_types::{
    DegradeReason, DegradedResult, FeatureKind, GenerationRequest, GenerationResult, MindMap,
    MindMapBranch, Quiz, ResearchNotes, SimpleExplanation, SummaryNotes, VoiceNotes,
};
use tracing::debug;

/// Convert raw model output into the structured result for `request`.
///
/// Never fails and never panics; exhaustion of all tiers produces a
/// degraded result, not an error.
pub fn normalize(raw: &str, request: &GenerationRequest) -> GenerationResult {
    let kind = request.kind();
    let trimmed = raw.trim();

    if let Some(result) = parse_strict(trimmed, request) {
        return result;
    }

    for candidate in lenient_candidates(trimmed) {
        if let Some(result) = parse_strict(candidate, request) {
            debug!(%kind, "strict parse failed, lenient recovery succeeded");
            return result;
        }
    }

    if let Some(result) = heuristic_extract(trimmed, request) {
        debug!(%kind, "structured parse failed, heuristic extraction succeeded");
        return result;
    }

    GenerationResult::Degraded(
        DegradedResult::new(
            kind,
            DegradeReason::UnparsableOutput,
            "model output could not be parsed into the requested shape",
        )
        .with_partial_text(trimmed),
    )
}

/// Tier 1: typed parse plus shape-specific validation and repair.
fn parse_strict(text: &str, request: &GenerationRequest) -> Option<GenerationResult> {
    match request.kind() {
        FeatureKind::Summarize => {
            let mut notes: SummaryNotes = serde_json::from_str(text).ok()?;
            if notes.summary.trim().is_empty() {
                return None;
            }
            if notes.word_count == 0 {
                notes.word_count = notes.summary.split_whitespace().count() as u32;
            }
            Some(GenerationResult::Summary(notes))
        }
        FeatureKind::Simplify => {
            let mut explanation: SimpleExplanation = serde_json::from_str(text).ok()?;
            if explanation.simple_explanation.trim().is_empty() {
                return None;
            }
            if explanation.original_topic.trim().is_empty() {
                explanation.original_topic = request.input.clone();
            }
            Some(GenerationResult::Simplified(explanation))
        }
        FeatureKind::Quiz => {
            let quiz: Quiz = serde_json::from_str(text).ok()?;
            repair_quiz(quiz).map(GenerationResult::Quiz)
        }
        FeatureKind::MindMap => {
            let map: MindMap = serde_json::from_str(text).ok()?;
            if map.topic.trim().is_empty() || map.branches.is_empty() {
                return None;
            }
            Some(GenerationResult::MindMap(map))
        }
        FeatureKind::Research => {
            let notes: ResearchNotes = serde_json::from_str(text).ok()?;
            let empty = notes.key_points.is_empty()
                && notes.important_facts.is_empty()
                && notes.main_ideas.is_empty()
                && notes.vocabulary.is_empty();
            if empty {
                return None;
            }
            Some(GenerationResult::Research(notes))
        }
        FeatureKind::VoiceClean => {
            let notes: VoiceNotes = serde_json::from_str(text).ok()?;
            if notes.cleaned_text.trim().is_empty() {
                return None;
            }
            Some(GenerationResult::VoiceNotes(notes))
        }
    }
}

/// Normalize option prefixes to `A) … D)` and re-anchor `correct_answer`.
///
/// Returns `None` when a question's answer matches no option even after
/// repair; such a quiz is unusable and must fall through to later tiers.
fn repair_quiz(mut quiz: Quiz) -> Option<Quiz> {
    if quiz.questions.is_empty() {
        return None;
    }

    for question in &mut quiz.questions {
        if question.options.len() != 4 {
            return None;
        }
        for (i, option) in question.options.iter_mut().enumerate() {
            let letter = (b'A' + i as u8) as char;
            let expected = format!("{letter}) ");
            if !option.starts_with(&expected) {
                let stripped = option
                    .trim_start_matches(['A', 'B', 'C', 'D'])
                    .trim_start_matches([')', '.', ':'])
                    .trim_start();
                *option = format!("{expected}{stripped}");
            }
        }

        if !question.options.contains(&question.correct_answer) {
            let bare = question
                .correct_answer
                .trim_start_matches(['A', 'B', 'C', 'D'])
                .trim_start_matches([')', '.', ':'])
                .trim();
            let anchored = question
                .options
                .iter()
                .find(|option| !bare.is_empty() && option.contains(bare))
                .cloned()?;
            question.correct_answer = anchored;
        }
    }

    quiz.total_questions = quiz.questions.len() as u32;
    Some(quiz)
}

/// Tier 2: JSON candidates pulled out of fenced or prose-wrapped text, in
/// priority order. A fenced block that fails to parse must not mask a bare
/// object elsewhere in the reply, so both slices are offered.
fn lenient_candidates(raw: &str) -> impl Iterator<Item = &str> {
    fenced_block(raw).into_iter().chain(brace_slice(raw))
}

/// Content of the first ```-fenced block, with an optional language tag on
/// the opening fence.
fn fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let after_fence = &raw[open + 3..];
    // Skip the language tag line ("json", "JSON", empty).
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    let inner = body[..close].trim();
    (!inner.is_empty()).then_some(inner)
}

/// Slice from the first `{` to the last `}`, dropping leading and trailing
/// prose.
fn brace_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| raw[start..=end].trim())
}

/// Tier 3: recover what we can from plain text.
fn heuristic_extract(raw: &str, request: &GenerationRequest) -> Option<GenerationResult> {
    let (prose, bullets) = split_prose_and_bullets(raw);
    if prose.is_empty() && bullets.is_empty() {
        return None;
    }

    match request.kind() {
        FeatureKind::Summarize => {
            let summary = if prose.is_empty() {
                bullets.join(" ")
            } else {
                prose.clone()
            };
            let word_count = summary.split_whitespace().count() as u32;
            Some(GenerationResult::Summary(SummaryNotes {
                summary,
                key_points: bullets,
                word_count,
            }))
        }
        FeatureKind::Simplify => {
            let simple_explanation = if prose.is_empty() {
                bullets.join(" ")
            } else {
                prose.clone()
            };
            Some(GenerationResult::Simplified(SimpleExplanation {
                original_topic: request.input.clone(),
                simple_explanation,
                key_concepts: bullets,
                examples: Vec::new(),
                analogies: Vec::new(),
            }))
        }
        // A quiz needs questions, four options and an anchored answer;
        // free text cannot supply that, so fall through to degraded.
        FeatureKind::Quiz => None,
        FeatureKind::MindMap => {
            if bullets.is_empty() {
                return None;
            }
            Some(GenerationResult::MindMap(MindMap {
                topic: request.input.clone(),
                branches: bullets
                    .into_iter()
                    .map(|name| MindMapBranch {
                        name,
                        subtopics: Vec::new(),
                    })
                    .collect(),
            }))
        }
        FeatureKind::Research => {
            let (vocabulary, key_points): (Vec<String>, Vec<String>) =
                bullets.into_iter().partition(|b| b.contains(": "));
            let main_ideas = if prose.is_empty() {
                Vec::new()
            } else {
                vec![prose]
            };
            if vocabulary.is_empty() && key_points.is_empty() && main_ideas.is_empty() {
                return None;
            }
            Some(GenerationResult::Research(ResearchNotes {
                key_points,
                important_facts: Vec::new(),
                main_ideas,
                vocabulary,
            }))
        }
        FeatureKind::VoiceClean => {
            let cleaned_text = if prose.is_empty() {
                bullets.join(" ")
            } else {
                prose
            };
            Some(GenerationResult::VoiceNotes(VoiceNotes {
                cleaned_text,
                notes: bullets,
            }))
        }
    }
}

/// Split text into leading/interleaved prose and recognizable list items.
fn split_prose_and_bullets(raw: &str) -> (String, Vec<String>) {
    let mut prose_lines = Vec::new();
    let mut bullets = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line == "```" || line.starts_with("```") {
            continue;
        }
        if let Some(item) = bullet_item(line) {
            bullets.push(item.to_owned());
        } else {
            prose_lines.push(line);
        }
    }

    (prose_lines.join(" "), bullets)
}

/// The payload of a list-marker line (`- x`, `* x`, `• x`, `1. x`, `1) x`),
/// or `None` for ordinary prose.
fn bullet_item(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest.trim());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use studykit_types::{Complexity, FeatureOptions};

    use super::*;

    fn simplify_request() -> GenerationRequest {
        GenerationRequest::new(
            "photosynthesis",
            FeatureOptions::Simplify {
                complexity: Complexity::Basic,
            },
        )
    }

    fn quiz_request() -> GenerationRequest {
        GenerationRequest::new("cells", FeatureOptions::Quiz { num_questions: 1 })
    }

    const SIMPLIFY_JSON: &str = r#"{
        "original_topic": "photosynthesis",
        "simple_explanation": "Plants make food from sunlight.",
        "key_concepts": ["sunlight", "chlorophyll"],
        "examples": ["a leaf in the sun"],
        "analogies": ["a tiny solar panel"]
    }"#;

    #[test]
    fn well_formed_json_round_trips_exactly() {
        let result = normalize(SIMPLIFY_JSON, &simplify_request());
        let GenerationResult::Simplified(explanation) = result else {
            panic!("expected simplified result");
        };
        assert_eq!(explanation.original_topic, "photosynthesis");
        assert_eq!(explanation.key_concepts, vec!["sunlight", "chlorophyll"]);
        assert_eq!(explanation.examples, vec!["a leaf in the sun"]);
    }

    #[test]
    fn code_fenced_json_is_recovered() {
        let wrapped = format!("```json\n{SIMPLIFY_JSON}\n```");
        let result = normalize(&wrapped, &simplify_request());
        assert!(matches!(result, GenerationResult::Simplified(_)));
    }

    #[test]
    fn unparsable_fence_does_not_mask_bare_json() {
        // The fenced block holds commentary, the real object follows it.
        let wrapped = format!("```\nsee the object below\n```\n{SIMPLIFY_JSON}");
        let result = normalize(&wrapped, &simplify_request());
        assert!(matches!(result, GenerationResult::Simplified(_)));
    }

    #[test]
    fn prose_wrapped_json_is_recovered() {
        let wrapped = format!("Sure! Here is the requested JSON:\n{SIMPLIFY_JSON}\nHope that helps!");
        let result = normalize(&wrapped, &simplify_request());
        let GenerationResult::Simplified(explanation) = result else {
            panic!("expected simplified result");
        };
        assert_eq!(explanation.simple_explanation, "Plants make food from sunlight.");
    }

    #[test]
    fn bullet_text_falls_back_to_heuristic_extraction() {
        let raw = "Photosynthesis is how plants turn light into food.\n\
                   - sunlight is absorbed by chlorophyll\n\
                   - carbon dioxide and water become sugar\n\
                   * oxygen is released";
        let result = normalize(raw, &simplify_request());
        let GenerationResult::Simplified(explanation) = result else {
            panic!("expected simplified result");
        };
        assert_eq!(explanation.original_topic, "photosynthesis");
        assert!(explanation.simple_explanation.contains("plants turn light"));
        assert_eq!(explanation.key_concepts.len(), 3);
    }

    #[test]
    fn hopeless_output_degrades_with_partial_text() {
        let result = normalize("", &simplify_request());
        let GenerationResult::Degraded(degraded) = result else {
            panic!("expected degraded result");
        };
        assert_eq!(degraded.reason, DegradeReason::UnparsableOutput);
        assert!(degraded.partial_text.is_none());

        let result = normalize("{{{", &quiz_request());
        let GenerationResult::Degraded(degraded) = result else {
            panic!("expected degraded result");
        };
        assert_eq!(degraded.partial_text.as_deref(), Some("{{{"));
    }

    #[test]
    fn quiz_option_prefixes_are_repaired() {
        let raw = r#"{
            "questions": [{
                "question": "What is the powerhouse of the cell?",
                "options": ["Mitochondria", "B) Nucleus", "C) Ribosome", "D) Vacuole"],
                "correct_answer": "Mitochondria",
                "explanation": "It produces ATP."
            }],
            "total_questions": 0
        }"#;
        let result = normalize(raw, &quiz_request());
        let GenerationResult::Quiz(quiz) = result else {
            panic!("expected quiz result");
        };
        assert_eq!(quiz.total_questions, 1);
        assert_eq!(quiz.questions[0].options[0], "A) Mitochondria");
        assert_eq!(quiz.questions[0].correct_answer, "A) Mitochondria");
    }

    #[test]
    fn quiz_with_unanchorable_answer_degrades() {
        let raw = r#"{
            "questions": [{
                "question": "Pick one",
                "options": ["A) x", "B) y", "C) z", "D) w"],
                "correct_answer": "E) nothing",
                "explanation": ""
            }]
        }"#;
        let result = normalize(raw, &quiz_request());
        assert!(result.is_degraded());
    }

    #[test]
    fn numbered_lists_count_as_bullets() {
        let (prose, bullets) = split_prose_and_bullets("intro\n1. one\n2) two\n10. ten");
        assert_eq!(prose, "intro");
        assert_eq!(bullets, vec!["one", "two", "ten"]);
    }

    #[test]
    fn research_heuristic_separates_vocabulary() {
        let request = GenerationRequest::new("biology notes", FeatureOptions::Research);
        let raw = "- osmosis: movement of water across a membrane\n- cells divide by mitosis";
        let GenerationResult::Research(notes) = normalize(raw, &request) else {
            panic!("expected research result");
        };
        assert_eq!(notes.vocabulary.len(), 1);
        assert_eq!(notes.key_points, vec!["cells divide by mitosis"]);
    }

    #[test]
    fn summary_word_count_is_backfilled() {
        let request = GenerationRequest::new(
            "text",
            FeatureOptions::Summarize {
                max_words: 100,
                kind: Default::default(),
                mode: Default::default(),
            },
        );
        let raw = r#"{"summary": "four words right here", "key_points": ["a"]}"#;
        let GenerationResult::Summary(notes) = normalize(raw, &request) else {
            panic!("expected summary result");
        };
        assert_eq!(notes.word_count, 4);
    }
}
