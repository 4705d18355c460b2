use std::collections::HashMap;

/// Polish functional words excluded from keyword ranking.
const STOP_WORDS: &[&str] = &[
    "ale", "aby", "albo", "bardzo", "będzie", "była", "było", "być", "czyli", "dla", "gdy",
    "ich", "jak", "jako", "jego", "jej", "jest", "jeszcze", "konieczne", "lub", "może",
    "można", "nie", "oraz", "przez", "przy", "również", "są", "się", "także", "tego", "tej",
    "ten", "tych", "tylko", "tym", "więc", "właśnie", "że",
];

const MIN_TOKEN_CHARS: usize = 4; // Shorter tokens carry little topical signal
const MAX_TOKEN_CHARS: usize = 19; // Longer runs are almost always extraction noise
const MIN_FREQUENCY: u32 = 2;
const MAX_KEYWORDS: usize = 12;

/// Fallback label consumers use when a document yields no keywords at all.
pub const DEFAULT_TOPIC: &str = "Główny temat";

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "ąęćłńóśźż".contains(c)
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

/// Frequency-ranked content words of a text, most frequent first.
///
/// Ties are broken by first appearance in the text so that repeated runs over
/// the same input always rank identically.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();

    // token -> (frequency, first appearance)
    let mut counts: HashMap<&str, (u32, usize)> = HashMap::new();
    for (position, token) in normalized.split_whitespace().enumerate() {
        let chars = token.chars().count();
        if chars < MIN_TOKEN_CHARS || chars > MAX_TOKEN_CHARS {
            continue;
        }
        if is_stop_word(token) || is_numeric(token) {
            continue;
        }
        let entry = counts.entry(token).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, u32, usize)> = counts
        .into_iter()
        .filter(|(_, (freq, _))| *freq >= MIN_FREQUENCY)
        .map(|(token, (freq, first))| (token, freq, first))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked.into_iter().take(MAX_KEYWORDS).map(|(token, _, _)| token.to_string()).collect()
}

/// Whether a sentence mentions the keyword, case-insensitively.
pub fn contains_keyword(sentence: &str, keyword: &str) -> bool {
    sentence.to_lowercase().contains(&keyword.to_lowercase())
}
