use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,       // Source file name as uploaded
    pub page_count: u32,    // Pages reported by the PDF source
    pub text: String,       // Full extracted text, pages joined by newlines
}

/// A candidate sentence split out of the document. The index is the position
/// among the surviving sentences and drives summary reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryTier {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub short: String,
    pub medium: String,
    pub long: String,
}

impl Summary {
    pub fn tier(&self, tier: SummaryTier) -> &str {
        match tier {
            SummaryTier::Short => &self.short,
            SummaryTier::Medium => &self.medium,
            SummaryTier::Long => &self.long,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindMapBranch {
    pub topic: String,          // Capitalized keyword driving this branch
    pub subtopics: Vec<String>, // Key phrases, never empty (backfilled)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindMap {
    pub central: String,
    pub branches: Vec<MindMapBranch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillBlank,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>, // 4 for multiple choice/fill blank, 2 for true/false
    pub correct: usize,       // Always a valid index into options
    pub kind: QuestionKind,
    pub explanation: String,
}

/// One submitted answer, appended during a quiz run and never mutated after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_index: usize,
    pub selected: usize,
    pub correct: usize,
    pub is_correct: bool,
    pub question: String,
    pub explanation: String,
}

/// The complete artifact bundle for one document. All three artifacts are
/// generated before the bundle exists, so consumers never observe a
/// partially refreshed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySet {
    pub summary: Summary,
    pub mind_map: MindMap,
    pub quiz: Vec<QuizQuestion>,
}
