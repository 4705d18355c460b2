pub mod errors;
pub mod models;
pub mod pipeline;


pub use errors::EdulearnError;
pub use models::{
    Document,
    MindMap,
    MindMapBranch,
    QuestionKind,
    QuizAnswer,
    QuizQuestion,
    Sentence,
    StudySet,
    Summary,
    SummaryTier,
};
pub use pipeline::DocumentPipeline;
