use crate::{
    core::{
        Sentence,
        Summary,
    },
    generation::config::{
        GenerationConfig,
        PositionScoring,
    },
    text::keywords::contains_keyword,
};

const EDGE_WINDOW: usize = 3;
const EDGE_BONUS: f64 = 0.3;
const LENGTH_BONUS: f64 = 0.25;
const IDEAL_WORDS_MIN: usize = 10;
const IDEAL_WORDS_MAX: usize = 25;
const KEYWORD_BONUS: f64 = 0.1;
const KEYWORD_BONUS_CAP: f64 = 0.4;
const FRAGMENT_PENALTY: f64 = -0.5;
const FRAGMENT_CHARS: usize = 30;

fn position_score(index: usize, total: usize, scoring: PositionScoring) -> f64 {
    match scoring {
        PositionScoring::EdgeBonus => {
            if index < EDGE_WINDOW || index + EDGE_WINDOW >= total {
                EDGE_BONUS
            } else {
                0.0
            }
        }
        PositionScoring::LinearDecay => (total - index) as f64 / total as f64 * EDGE_BONUS,
    }
}

fn score_sentence(
    sentence: &Sentence,
    total: usize,
    keywords: &[String],
    scoring: PositionScoring,
) -> f64 {
    let mut score = position_score(sentence.index, total, scoring);

    let words = sentence.word_count();
    if (IDEAL_WORDS_MIN..=IDEAL_WORDS_MAX).contains(&words) {
        score += LENGTH_BONUS;
    }

    let keyword_hits = keywords.iter().filter(|k| contains_keyword(&sentence.text, k)).count();
    score += (keyword_hits as f64 * KEYWORD_BONUS).min(KEYWORD_BONUS_CAP);

    if sentence.text.chars().count() < FRAGMENT_CHARS || !sentence.text.contains(' ') {
        score += FRAGMENT_PENALTY;
    }

    score
}

/// Pick the `count` best-scoring sentences, then put the selection back into
/// document order before joining. Summaries must read in source order no
/// matter what order the scores selected them in.
fn select_tier(
    sentences: &[Sentence],
    keywords: &[String],
    count: usize,
    scoring: PositionScoring,
) -> String {
    if sentences.is_empty() {
        return String::new();
    }

    let total = sentences.len();
    let mut scored: Vec<(&Sentence, f64)> =
        sentences.iter().map(|s| (s, score_sentence(s, total, keywords, scoring))).collect();

    // Equal scores resolve to the earlier sentence, keeping output stable.
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.index.cmp(&b.0.index))
    });

    let mut selected: Vec<&Sentence> = scored.into_iter().take(count).map(|(s, _)| s).collect();
    selected.sort_by_key(|s| s.index);

    let joined: Vec<&str> = selected.iter().map(|s| s.text.as_str()).collect();
    format!("{}.", joined.join(". "))
}

/// Build all three summary tiers from the summary-grade sentence list.
pub fn summarize(sentences: &[Sentence], keywords: &[String], config: &GenerationConfig) -> Summary {
    Summary {
        short: select_tier(sentences, keywords, config.short_sentences, config.position_scoring),
        medium: select_tier(sentences, keywords, config.medium_sentences, config.position_scoring),
        long: select_tier(sentences, keywords, config.long_sentences, config.position_scoring),
    }
}
