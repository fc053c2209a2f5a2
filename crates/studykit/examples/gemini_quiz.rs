//! Generate a short quiz from pasted study notes.
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run --example gemini_quiz
//! ```

use studykit::{GeminiAdapterBuilder, StudyClient, types::GenerationResult};

const NOTES: &str = "The mitochondrion is the powerhouse of the cell. It produces \
ATP through cellular respiration. Plant cells additionally contain chloroplasts, \
which capture light energy during photosynthesis.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("studykit=debug").init();

    let backend = GeminiAdapterBuilder::new_from_env().build()?;
    let client = StudyClient::new(backend);

    match client.quiz(NOTES, 3).await? {
        GenerationResult::Quiz(quiz) => {
            for (i, q) in quiz.questions.iter().enumerate() {
                println!("{}. {}", i + 1, q.question);
                for option in &q.options {
                    println!("   {option}");
                }
                println!("   answer: {}\n", q.correct_answer);
            }
        }
        GenerationResult::Degraded(degraded) => {
            eprintln!("degraded ({:?}): {}", degraded.reason, degraded.message);
        }
        other => eprintln!("unexpected result: {other:?}"),
    }

    Ok(())
}
