use crate::core::Sentence;

/// Minimum trimmed length for sentences feeding the mind map and quiz.
pub const MIN_SENTENCE_TOPIC: usize = 20;
/// Minimum trimmed length for sentences feeding the summarizer.
pub const MIN_SENTENCE_SUMMARY: usize = 30;
/// Minimum trimmed length for a paragraph to count as one.
pub const MIN_PARAGRAPH: usize = 50;

/// Split text on sentence-ending punctuation and keep pieces above
/// `min_len` characters, preserving their relative order.
///
/// No disambiguation of abbreviations or decimal points is attempted; a
/// "sentence" here is whatever sits between runs of `.`, `!` and `?`.
pub fn split_sentences(text: &str, min_len: usize) -> Vec<Sentence> {
    text.split_terminator(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > min_len)
        .enumerate()
        .map(|(index, s)| Sentence { index, text: s.to_string() })
        .collect()
}

/// Split text into paragraphs on blank-line runs, discarding short ones.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .flat_map(|block| block.split("\r\n\r\n"))
        .map(str::trim)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH)
        .map(|p| p.to_string())
        .collect()
}
