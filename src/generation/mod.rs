use async_trait::async_trait;
use rand::{
    rngs::StdRng,
    SeedableRng,
};

use crate::{
    core::{
        Document,
        EdulearnError,
        StudySet,
    },
    text::{
        keywords::extract_keywords,
        segmenter::{
            split_sentences,
            MIN_SENTENCE_SUMMARY,
            MIN_SENTENCE_TOPIC,
        },
    },
};

pub mod ai;
pub mod config;
pub mod mindmap;
pub mod quiz;
pub mod structure;
pub mod summarizer;

pub use ai::{
    AiAssistedStrategy,
    AiProvider,
};
pub use config::{
    GenerationConfig,
    PositionScoring,
};
pub use structure::StructureAwareStrategy;

/// One way of turning a document into its artifact bundle. Strategies are
/// constructed per document run; the AI-assisted variant awaits its
/// provider, so the trait is async throughout.
#[async_trait]
pub trait GenerationStrategy: Send {
    async fn generate(&mut self, document: &Document) -> Result<StudySet, EdulearnError>;
}

/// The deterministic baseline: keyword extraction, sentence scoring,
/// templated question synthesis. Every other strategy falls back to this.
pub struct HeuristicStrategy {
    pub(crate) config: GenerationConfig,
    pub(crate) rng: StdRng,
}

impl HeuristicStrategy {
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests and reproducible runs.
    pub fn with_rng(config: GenerationConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }
}

#[async_trait]
impl GenerationStrategy for HeuristicStrategy {
    async fn generate(&mut self, document: &Document) -> Result<StudySet, EdulearnError> {
        let keywords = extract_keywords(&document.text);
        let summary_sentences = split_sentences(&document.text, MIN_SENTENCE_SUMMARY);
        let topic_sentences = split_sentences(&document.text, MIN_SENTENCE_TOPIC);

        log::info!(
            "Generating artifacts for \"{}\": {} keywords, {} sentences",
            document.name,
            keywords.len(),
            topic_sentences.len()
        );

        let summary = summarizer::summarize(&summary_sentences, &keywords, &self.config);
        let mind_map = mindmap::build_mind_map(&keywords, &topic_sentences);
        let quiz = quiz::generate_quiz(
            &topic_sentences,
            &keywords,
            self.config.max_questions,
            &mut self.rng,
        );

        Ok(StudySet { summary, mind_map, quiz })
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    fn photosynthesis_document() -> Document {
        let text = "Fotosynteza jest podstawowym procesem odżywiania roślin zielonych. \
            Chlorofil pochłania energię światła słonecznego w chloroplastach. \
            Fotosynteza wymaga dwutlenku węgla pobieranego z atmosfery przez aparaty szparkowe. \
            Chlorofil nadaje liściom charakterystyczny zielony kolor w sezonie wegetacyjnym. \
            Produktem fotosynteza jest glukoza oraz tlen uwalniany do atmosfery. \
            Chlorofil współdziała z innymi barwnikami podczas pochłaniania światła. \
            Fotosynteza zachodzi najintensywniej w silnym świetle słonecznym. \
            Chlorofil rozkłada się jesienią i liście zmieniają wtedy kolor. \
            Fotosynteza dostarcza energii całemu łańcuchowi pokarmowemu na Ziemi. \
            Bez fotosynteza życie tlenowe nie mogłoby istnieć na naszej planecie. \
            Fotosynteza oraz oddychanie komórkowe są procesami wzajemnie odwrotnymi. \
            Fotosynteza przebiega w dwóch fazach zależnej i niezależnej od światła.";
        Document { name: "fotosynteza.pdf".to_string(), page_count: 2, text: text.to_string() }
    }

    #[tokio::test]
    async fn heuristic_strategy_builds_all_three_artifacts() {
        let mut strategy = HeuristicStrategy::with_rng(
            GenerationConfig::default(),
            StdRng::seed_from_u64(9),
        );
        let bundle = strategy.generate(&photosynthesis_document()).await.unwrap();

        assert!(!bundle.summary.short.is_empty());
        assert!(!bundle.summary.medium.is_empty());
        assert!(!bundle.summary.long.is_empty());
        assert_eq!(bundle.mind_map.central, "Fotosynteza");
        assert!(bundle
            .mind_map
            .branches
            .iter()
            .any(|b| b.topic == "Chlorofil"));
        assert!(!bundle.quiz.is_empty());
    }

    #[tokio::test]
    async fn identical_input_and_seed_give_identical_bundles() {
        let document = photosynthesis_document();

        let mut first = HeuristicStrategy::with_rng(
            GenerationConfig::default(),
            StdRng::seed_from_u64(21),
        );
        let mut second = HeuristicStrategy::with_rng(
            GenerationConfig::default(),
            StdRng::seed_from_u64(21),
        );

        let a = first.generate(&document).await.unwrap();
        let b = second.generate(&document).await.unwrap();

        assert_eq!(a.summary.long, b.summary.long);
        assert_eq!(a.mind_map.central, b.mind_map.central);
        assert_eq!(a.quiz.len(), b.quiz.len());
        for (qa, qb) in a.quiz.iter().zip(&b.quiz) {
            assert_eq!(qa.question, qb.question);
            assert_eq!(qa.options, qb.options);
        }
    }
}
