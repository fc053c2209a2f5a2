//! Explain a topic at three complexity levels.
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run --example gemini_simplify
//! ```

use studykit::{
    GeminiAdapterBuilder, StudyClient,
    types::{Complexity, GenerationResult},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("studykit=debug").init();

    let backend = GeminiAdapterBuilder::new_from_env().build()?;
    let client = StudyClient::new(backend);

    for complexity in [Complexity::Basic, Complexity::Intermediate, Complexity::Advanced] {
        match client.simplify("photosynthesis", complexity).await? {
            GenerationResult::Simplified(explanation) => {
                println!("== {complexity:?} ==");
                println!("{}", explanation.simple_explanation);
                for concept in &explanation.key_concepts {
                    println!("  - {concept}");
                }
            }
            GenerationResult::Degraded(degraded) => {
                eprintln!("degraded ({:?}): {}", degraded.reason, degraded.message);
            }
            other => eprintln!("unexpected result: {other:?}"),
        }
    }

    Ok(())
}
