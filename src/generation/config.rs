use serde::{
    Deserialize,
    Serialize,
};

/// How sentence position contributes to the summary score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionScoring {
    /// Flat bonus for the first and last few sentences. Default: documents
    /// tend to front-load the thesis and close with conclusions.
    EdgeBonus,
    /// Continuous decay favoring earlier sentences: `(n - i) / n * 0.3`.
    LinearDecay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub position_scoring: PositionScoring,
    pub short_sentences: usize,
    pub medium_sentences: usize,
    pub long_sentences: usize,
    pub max_questions: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            position_scoring: PositionScoring::EdgeBonus,
            short_sentences: 3,
            medium_sentences: 6,
            long_sentences: 10,
            max_questions: 10,
        }
    }
}
