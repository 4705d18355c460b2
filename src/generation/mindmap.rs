use crate::{
    core::{
        MindMap,
        MindMapBranch,
        Sentence,
    },
    text::keywords::{
        contains_keyword,
        DEFAULT_TOPIC,
    },
};

const MAX_BRANCHES: usize = 5;
const MAX_RELATED_SENTENCES: usize = 5;
const MAX_SUBTOPICS: usize = 4;
const WHOLE_SENTENCE_WORDS: usize = 6;
const KEY_PHRASE_WORDS: usize = 4;

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Short sentences are used whole; longer ones are cut down to their first
/// few words with an ellipsis.
fn extract_key_phrase(sentence: &str) -> String {
    let trimmed = sentence.trim();
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() <= WHOLE_SENTENCE_WORDS {
        return trimmed.to_string();
    }
    format!("{}...", words[..KEY_PHRASE_WORDS].join(" "))
}

fn related_sentences<'a>(keyword: &str, sentences: &'a [Sentence]) -> Vec<&'a Sentence> {
    sentences
        .iter()
        .filter(|s| contains_keyword(&s.text, keyword))
        .take(MAX_RELATED_SENTENCES)
        .collect()
}

/// A branch with no extractable subtopics gets templated ones instead;
/// empty branches are an invariant violation for the rendering layer.
fn backfill_subtopics(keyword: &str) -> Vec<String> {
    vec![
        format!("Najważniejsze cechy: {keyword}"),
        format!("Zastosowania: {keyword}"),
    ]
}

fn build_branch(keyword: &str, sentences: &[Sentence]) -> MindMapBranch {
    let mut subtopics: Vec<String> = related_sentences(keyword, sentences)
        .into_iter()
        .take(MAX_SUBTOPICS)
        .map(|s| extract_key_phrase(&s.text))
        .collect();

    if subtopics.is_empty() {
        subtopics = backfill_subtopics(keyword);
    }

    MindMapBranch { topic: capitalize_first(keyword), subtopics }
}

/// Assemble the mind map: the top keyword in the middle, the next five as
/// branches in rank order, each fleshed out from the sentences that
/// mention it.
pub fn build_mind_map(keywords: &[String], sentences: &[Sentence]) -> MindMap {
    let central = keywords
        .first()
        .map(|k| capitalize_first(k))
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    let branches = keywords
        .iter()
        .skip(1)
        .take(MAX_BRANCHES)
        .map(|keyword| build_branch(keyword, sentences))
        .collect();

    MindMap { central, branches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::segmenter::{
        split_sentences,
        MIN_SENTENCE_TOPIC,
    };

    #[test]
    fn central_topic_is_top_keyword_capitalized() {
        let keywords = vec!["fotosynteza".to_string(), "chlorofil".to_string()];
        let map = build_mind_map(&keywords, &[]);

        assert_eq!(map.central, "Fotosynteza");
        assert_eq!(map.branches.len(), 1);
        assert_eq!(map.branches[0].topic, "Chlorofil");
    }

    #[test]
    fn missing_keywords_fall_back_to_default_topic() {
        let map = build_mind_map(&[], &[]);
        assert_eq!(map.central, "Główny temat");
        assert!(map.branches.is_empty());
    }

    #[test]
    fn branches_follow_keyword_rank_order() {
        let keywords: Vec<String> =
            ["centrala", "pierwszy", "drugi", "trzeci", "czwarty", "piąty", "szósty"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        let map = build_mind_map(&keywords, &[]);

        let topics: Vec<&str> = map.branches.iter().map(|b| b.topic.as_str()).collect();
        assert_eq!(topics, vec!["Pierwszy", "Drugi", "Trzeci", "Czwarty", "Piąty"]);
    }

    #[test]
    fn subtopics_come_from_sentences_mentioning_the_keyword() {
        let text = "Chlorofil nadaje liściom zielony kolor w okresie wegetacji. \
                    Woda jest potrzebna każdej komórce.";
        let sentences = split_sentences(text, MIN_SENTENCE_TOPIC);
        let keywords = vec!["fotosynteza".to_string(), "chlorofil".to_string()];

        let map = build_mind_map(&keywords, &sentences);
        assert_eq!(map.branches[0].subtopics, vec!["Chlorofil nadaje liściom zielony..."]);
    }

    #[test]
    fn short_related_sentence_is_used_whole() {
        let text = "Chlorofil pochłania światło czerwone zawsze. Inne zdanie bez tego słowa kluczowego.";
        let sentences = split_sentences(text, MIN_SENTENCE_TOPIC);
        let map = build_mind_map(&["temat".to_string(), "chlorofil".to_string()], &sentences);

        assert_eq!(map.branches[0].subtopics, vec!["Chlorofil pochłania światło czerwone zawsze"]);
    }

    #[test]
    fn branch_without_material_is_backfilled_not_empty() {
        let map = build_mind_map(&["jeden".to_string(), "widmo".to_string()], &[]);

        assert_eq!(map.branches.len(), 1);
        assert!(!map.branches[0].subtopics.is_empty());
        assert!(map.branches[0].subtopics.iter().any(|s| s.contains("widmo")));
    }
}
