pub mod core;
pub mod extraction;
pub mod gamification;
pub mod generation;
pub mod persistence;
pub mod text;

pub use crate::{
    core::{
        DocumentPipeline,
        EdulearnError,
        StudySet,
    },
    extraction::{
        PdfTextSource,
        PlainTextSource,
    },
    generation::{
        AiAssistedStrategy,
        AiProvider,
        GenerationConfig,
        GenerationStrategy,
        HeuristicStrategy,
        StructureAwareStrategy,
    },
};
