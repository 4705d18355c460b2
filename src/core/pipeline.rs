use std::time::Instant;

use crate::{
    core::{
        Document,
        EdulearnError,
        MindMap,
        StudySet,
        Summary,
        SummaryTier,
    },
    extraction::{
        extract_text,
        PdfTextSource,
    },
    generation::GenerationStrategy,
};

/// Per-document orchestration. A pipeline is built for one upload, runs the
/// extraction and generation stages, and hands back the document together
/// with its complete artifact bundle. Collaborators are injected; nothing
/// here reaches for ambient state.
pub struct DocumentPipeline {
    strategy: Box<dyn GenerationStrategy>,
}

impl DocumentPipeline {
    pub fn new(strategy: Box<dyn GenerationStrategy>) -> Self {
        Self { strategy }
    }

    /// Extract the document text and generate all three artifacts.
    ///
    /// Fails only on extraction-level problems (too little text). All three
    /// artifacts are computed before anything is returned, so callers can
    /// swap their whole document state at once.
    pub async fn process(
        &mut self,
        source: &dyn PdfTextSource,
        name: &str,
    ) -> Result<(Document, StudySet), EdulearnError> {
        let started = Instant::now();

        let text = extract_text(source).await?;
        let document =
            Document { name: name.to_string(), page_count: source.page_count(), text };

        let bundle = self.strategy.generate(&document).await?;

        log::info!(
            "Processed \"{}\" in {:.1}s: {} quiz questions, {} branches",
            document.name,
            started.elapsed().as_secs_f32(),
            bundle.quiz.len(),
            bundle.mind_map.branches.len()
        );

        Ok((document, bundle))
    }
}

/// Mind map as pretty JSON, for the export button.
pub fn export_mind_map(mind_map: &MindMap) -> Result<String, EdulearnError> {
    Ok(serde_json::to_string_pretty(mind_map)?)
}

/// One summary tier as plain text, for the export button.
pub fn export_summary(summary: &Summary, tier: SummaryTier) -> String {
    summary.tier(tier).to_string()
}
