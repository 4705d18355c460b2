use async_trait::async_trait;

use crate::{
    core::{
        Document,
        EdulearnError,
        StudySet,
        Summary,
    },
    generation::{
        GenerationStrategy,
        HeuristicStrategy,
    },
};

/// Characters fed to the provider per request. Long documents are split and
/// the chunks summarized one after another; there is no cancellation, so a
/// slow provider blocks the run for its duration.
const CHUNK_CHARS: usize = 4000;

const SHORT_TARGET_CHARS: usize = 300;
const MEDIUM_TARGET_CHARS: usize = 700;
const LONG_TARGET_CHARS: usize = 1500;
const MAX_CENTRAL_CHARS: usize = 50;

/// External inference collaborator. Both capabilities are best effort: any
/// error or unusable output makes the caller fall back to the heuristic
/// pipeline, never crash.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Condense `text` to at most roughly `max_chars` characters.
    async fn summarize(&self, text: &str, max_chars: usize) -> Result<String, EdulearnError>;

    /// Continue a free-form prompt.
    async fn complete(&self, prompt: &str) -> Result<String, EdulearnError>;
}

/// AI-assisted generation with the heuristic strategy as the fallback at
/// every step: summary tiers come from the provider when it cooperates, the
/// mind map may get a provider-suggested central topic, and the quiz is
/// always heuristic.
pub struct AiAssistedStrategy {
    provider: Box<dyn AiProvider>,
    fallback: HeuristicStrategy,
}

impl AiAssistedStrategy {
    pub fn new(provider: Box<dyn AiProvider>, fallback: HeuristicStrategy) -> Self {
        Self { provider, fallback }
    }

    fn chunks(text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars.chunks(CHUNK_CHARS).map(|c| c.iter().collect()).collect()
    }

    /// Condense an over-long document by summarizing each chunk in order.
    /// Chunks are awaited sequentially to bound memory and preserve order.
    async fn condense(&self, text: &str) -> Result<String, EdulearnError> {
        if text.chars().count() <= CHUNK_CHARS {
            return Ok(text.to_string());
        }

        let mut condensed = Vec::new();
        for chunk in Self::chunks(text) {
            let part = self.provider.summarize(&chunk, MEDIUM_TARGET_CHARS).await?;
            condensed.push(part);
        }
        Ok(condensed.join("\n"))
    }

    async fn ai_summary(&self, text: &str) -> Result<Summary, EdulearnError> {
        let condensed = self.condense(text).await?;

        let short = self.provider.summarize(&condensed, SHORT_TARGET_CHARS).await?;
        let medium = self.provider.summarize(&condensed, MEDIUM_TARGET_CHARS).await?;
        let long = self.provider.summarize(&condensed, LONG_TARGET_CHARS).await?;

        let summary = Summary { short, medium, long };
        if summary.short.trim().is_empty()
            || summary.medium.trim().is_empty()
            || summary.long.trim().is_empty()
        {
            return Err(EdulearnError::AiProvider("empty summary output".to_string()));
        }
        Ok(summary)
    }

    async fn ai_central_topic(&self, text: &str) -> Result<String, EdulearnError> {
        let excerpt: String = text.chars().take(CHUNK_CHARS).collect();
        let prompt = format!(
            "Podaj jeden krótki tytuł (maksymalnie trzy słowa) opisujący temat tego tekstu:\n{excerpt}"
        );
        let raw = self.provider.complete(&prompt).await?;

        let title = raw.lines().next().unwrap_or("").trim().trim_matches('"').to_string();
        if title.is_empty() || title.chars().count() > MAX_CENTRAL_CHARS {
            return Err(EdulearnError::AiProvider(format!("unusable title: {raw:?}")));
        }
        Ok(title)
    }
}

#[async_trait]
impl GenerationStrategy for AiAssistedStrategy {
    async fn generate(&mut self, document: &Document) -> Result<StudySet, EdulearnError> {
        let mut bundle = self.fallback.generate(document).await?;

        match self.ai_summary(&document.text).await {
            Ok(summary) => bundle.summary = summary,
            Err(e) => log::warn!("AI summary failed, keeping heuristic summary: {e}"),
        }

        match self.ai_central_topic(&document.text).await {
            Ok(central) => bundle.mind_map.central = central,
            Err(e) => log::warn!("AI central topic failed, keeping heuristic topic: {e}"),
        }

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::generation::GenerationConfig;

    struct EchoProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AiProvider for EchoProvider {
        async fn summarize(&self, text: &str, max_chars: usize) -> Result<String, EdulearnError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text.chars().take(max_chars).collect())
        }

        async fn complete(&self, _prompt: &str) -> Result<String, EdulearnError> {
            Ok("Fotosynteza roślin".to_string())
        }
    }

    struct BrokenProvider;

    #[async_trait]
    impl AiProvider for BrokenProvider {
        async fn summarize(&self, _text: &str, _max_chars: usize) -> Result<String, EdulearnError> {
            Err(EdulearnError::AiProvider("model unavailable".to_string()))
        }

        async fn complete(&self, _prompt: &str) -> Result<String, EdulearnError> {
            Ok(String::new()) // Malformed: nothing usable in the output
        }
    }

    fn document() -> Document {
        let text = "Fotosynteza jest kluczowym procesem biologicznym roślin zielonych. \
            Fotosynteza zamienia energię świetlną w energię chemiczną glukozy. \
            Chlorofil pochłania kwanty światła w chloroplastach komórek liścia. \
            Chlorofil przekazuje energię wzbudzenia do centrów reakcji fotosystemów.";
        Document { name: "notatki.pdf".to_string(), page_count: 1, text: text.to_string() }
    }

    fn heuristic() -> HeuristicStrategy {
        HeuristicStrategy::with_rng(GenerationConfig::default(), StdRng::seed_from_u64(13))
    }

    #[tokio::test]
    async fn provider_output_replaces_summary_and_central_topic() {
        let mut strategy =
            AiAssistedStrategy::new(Box::new(EchoProvider { calls: AtomicUsize::new(0) }), heuristic());
        let bundle = strategy.generate(&document()).await.unwrap();

        assert!(bundle.summary.short.starts_with("Fotosynteza jest kluczowym"));
        assert_eq!(bundle.mind_map.central, "Fotosynteza roślin");
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_heuristic_output() {
        let mut ai_strategy = AiAssistedStrategy::new(Box::new(BrokenProvider), heuristic());
        let bundle = ai_strategy.generate(&document()).await.unwrap();

        let mut plain = heuristic();
        let expected = plain.generate(&document()).await.unwrap();

        assert_eq!(bundle.summary.short, expected.summary.short);
        assert_eq!(bundle.mind_map.central, expected.mind_map.central);
        assert_eq!(bundle.quiz.len(), expected.quiz.len());
    }
}
