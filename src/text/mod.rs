pub mod keywords;
pub mod segmenter;
