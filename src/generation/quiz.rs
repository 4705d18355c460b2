use rand::{
    seq::SliceRandom,
    Rng,
};
use regex::Regex;

use crate::{
    core::{
        QuestionKind,
        QuizQuestion,
        Sentence,
    },
    generation::mindmap::capitalize_first,
    text::keywords::is_word_char,
};

const BLANK_MARKER: &str = "____";
const MAX_CANDIDATES: usize = 12;
const CANDIDATE_DIVISOR: usize = 3;
const MIN_TARGET_CHARS: usize = 5;
const MIN_CHOICE_WORDS: usize = 5;
const RANDOM_TARGET_POOL: usize = 10;

/// Stand-ins when the document has too few keywords to fill a distractor set.
const FILLER_DISTRACTORS: &[&str] = &["Nieznane", "Nie dotyczy", "Brak danych"];

/// A single way of turning a true statement into a false one. `apply`
/// returns `None` when the rule found nothing to change; `ExplicitDenial`
/// always matches and serves as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationRule {
    NegateVerb(&'static str),
    IncrementNumbers,
    ExplicitDenial,
}

/// Rules tried on false-statement generation, in rotation order.
pub const MUTATION_RULES: &[MutationRule] = &[
    MutationRule::NegateVerb("jest"),
    MutationRule::NegateVerb("ma"),
    MutationRule::NegateVerb("można"),
    MutationRule::IncrementNumbers,
];

impl MutationRule {
    pub fn apply(&self, sentence: &str) -> Option<String> {
        match self {
            MutationRule::NegateVerb(verb) => {
                let pattern = Regex::new(&format!(r"\b{verb}\b")).ok()?;
                let mutated = pattern.replace_all(sentence, format!("nie {verb}")).to_string();
                (mutated != sentence).then_some(mutated)
            }
            MutationRule::IncrementNumbers => {
                let pattern = Regex::new(r"\d+").ok()?;
                let mutated = pattern
                    .replace_all(sentence, |caps: &regex::Captures| {
                        match caps[0].parse::<i64>() {
                            Ok(n) => (n + 10).to_string(),
                            Err(_) => caps[0].to_string(),
                        }
                    })
                    .to_string();
                (mutated != sentence).then_some(mutated)
            }
            MutationRule::ExplicitDenial => Some(format!("Nieprawdą jest, że {sentence}")),
        }
    }
}

fn clean_word(word: &str) -> &str {
    word.trim_matches(|c: char| !is_word_char(c))
}

fn matches_keyword(word: &str, keywords: &[String]) -> bool {
    let lowered = word.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k.as_str()))
}

/// Blank every case-insensitive occurrence of the target word.
fn blank_out(sentence: &str, word: &str) -> String {
    match Regex::new(&format!(r"(?i){}", regex::escape(word))) {
        Ok(pattern) => pattern.replace_all(sentence, BLANK_MARKER).to_string(),
        Err(_) => sentence.replacen(word, BLANK_MARKER, 1),
    }
}

fn create_multiple_choice<R: Rng>(
    sentence: &str,
    keywords: &[String],
    rng: &mut R,
) -> Option<QuizQuestion> {
    let candidates: Vec<&str> = sentence
        .split_whitespace()
        .map(clean_word)
        .filter(|w| w.chars().count() >= MIN_TARGET_CHARS)
        .collect();
    if candidates.len() < MIN_CHOICE_WORDS {
        return None;
    }

    // Prefer a word tied to a document keyword; otherwise pick from the
    // first few candidates so short sentences stay predictable.
    let target = candidates
        .iter()
        .find(|w| matches_keyword(w, keywords))
        .copied()
        .unwrap_or_else(|| {
            let pool = candidates.len().min(RANDOM_TARGET_POOL);
            candidates[rng.random_range(0..pool)]
        });

    let mut distractors: Vec<String> = keywords
        .iter()
        .filter(|k| k.as_str() != target.to_lowercase())
        .take(3)
        .map(|k| capitalize_first(k))
        .collect();
    for filler in FILLER_DISTRACTORS {
        if distractors.len() >= 3 {
            break;
        }
        distractors.push(filler.to_string());
    }

    let mut options: Vec<String> = Vec::with_capacity(4);
    options.push(target.to_string());
    options.extend(distractors);
    options.shuffle(rng);
    let correct = options.iter().position(|o| o == target)?;

    Some(QuizQuestion {
        question: format!("Uzupełnij zdanie: {}", blank_out(sentence, target)),
        options,
        correct,
        kind: QuestionKind::MultipleChoice,
        explanation: format!("Prawidłowa odpowiedź to \"{target}\" zgodnie z treścią dokumentu."),
    })
}

/// Turn a sentence into a false statement: one randomly chosen mutation
/// rule, with the explicit-denial wrapper when the rule finds no match.
fn make_false_statement<R: Rng>(sentence: &str, rng: &mut R) -> String {
    let rule = MUTATION_RULES[rng.random_range(0..MUTATION_RULES.len())];
    rule.apply(sentence)
        .or_else(|| MutationRule::ExplicitDenial.apply(sentence))
        .unwrap_or_else(|| format!("Nieprawdą jest, że {sentence}"))
}

pub(crate) fn create_true_false<R: Rng>(sentence: &str, rng: &mut R) -> Option<QuizQuestion> {
    let options = vec!["Prawda".to_string(), "Fałsz".to_string()];

    if rng.random_bool(0.5) {
        Some(QuizQuestion {
            question: format!("Prawda czy fałsz: {sentence}"),
            options,
            correct: 0,
            kind: QuestionKind::TrueFalse,
            explanation: "To stwierdzenie jest prawdziwe według treści dokumentu.".to_string(),
        })
    } else {
        let statement = make_false_statement(sentence, rng);
        Some(QuizQuestion {
            question: format!("Prawda czy fałsz: {statement}"),
            options,
            correct: 1,
            kind: QuestionKind::TrueFalse,
            explanation:
                "To stwierdzenie jest fałszywe - zostało zmodyfikowane w stosunku do treści dokumentu."
                    .to_string(),
        })
    }
}

fn create_fill_blank(sentence: &str, keywords: &[String]) -> Option<QuizQuestion> {
    let target = sentence
        .split_whitespace()
        .map(clean_word)
        .find(|w| w.chars().count() >= MIN_TARGET_CHARS && matches_keyword(w, keywords))?;

    let question = sentence.replacen(target, BLANK_MARKER, 1);
    let options = vec![
        target.to_string(),
        format!("Nie {target}"),
        format!("{target}y"),
        format!("Bez {target}"),
    ];

    Some(QuizQuestion {
        question: format!("Uzupełnij: {question}"),
        options,
        correct: 0,
        kind: QuestionKind::FillBlank,
        explanation: format!("Prawidłowa odpowiedź to \"{target}\"."),
    })
}

/// Synthesize up to `max_questions` questions, rotating through the three
/// kinds. A candidate that cannot be built is skipped, so the result may be
/// shorter than requested; that is a quality shortfall, not an error.
pub fn generate_quiz<R: Rng>(
    sentences: &[Sentence],
    keywords: &[String],
    max_questions: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let kinds =
        [QuestionKind::MultipleChoice, QuestionKind::TrueFalse, QuestionKind::FillBlank];
    let candidates = MAX_CANDIDATES.min(sentences.len() / CANDIDATE_DIVISOR);

    let mut quiz = Vec::new();
    for i in 0..candidates {
        let Some(sentence) = sentences.get(i * 3).or_else(|| sentences.get(i)) else {
            continue;
        };

        let question = match kinds[i % kinds.len()] {
            QuestionKind::MultipleChoice => {
                create_multiple_choice(&sentence.text, keywords, rng)
            }
            QuestionKind::TrueFalse => create_true_false(&sentence.text, rng),
            QuestionKind::FillBlank => create_fill_blank(&sentence.text, keywords),
        };

        if let Some(question) = question {
            quiz.push(question);
        }
    }

    quiz.truncate(max_questions);
    quiz
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::text::segmenter::{
        split_sentences,
        MIN_SENTENCE_TOPIC,
    };

    const TF_PREFIX: &str = "Prawda czy fałsz: ";

    #[test]
    fn negate_rule_produces_the_negated_form() {
        let rule = MutationRule::NegateVerb("jest");
        let mutated = rule.apply("Ten przykład jest dobry").expect("rule matches");

        assert_eq!(mutated, "Ten przykład nie jest dobry");
    }

    #[test]
    fn negate_rule_skips_sentences_without_the_verb() {
        let rule = MutationRule::NegateVerb("jest");
        assert_eq!(rule.apply("Rośliny produkują tlen"), None);
        // No partial-word matches either.
        assert_eq!(rule.apply("Jestem pewien swojej odpowiedzi"), None);
    }

    #[test]
    fn increment_rule_bumps_every_number() {
        let rule = MutationRule::IncrementNumbers;
        let mutated = rule.apply("Liść ma 5 warstw i 12 komórek").expect("rule matches");

        assert_eq!(mutated, "Liść ma 15 warstw i 22 komórek");
    }

    #[test]
    fn explicit_denial_always_changes_the_sentence() {
        let sentence = "Rośliny produkują tlen w dzień";
        let mutated = MutationRule::ExplicitDenial.apply(sentence).unwrap();

        assert_ne!(mutated, sentence);
        assert!(mutated.contains(sentence));
    }

    #[test]
    fn false_statement_never_equals_the_original() {
        let sentence = "Ten przykład jest dobry dla każdego ucznia";
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let statement = make_false_statement(sentence, &mut rng);

            assert_ne!(statement, sentence);
            assert!(
                statement.contains("nie jest") || statement.starts_with("Nieprawdą jest, że"),
                "unexpected mutation: {statement}"
            );
        }
    }

    #[test]
    fn multiple_choice_keeps_the_target_among_four_options() {
        let keywords = vec!["fotosynteza".to_string(), "chlorofil".to_string()];
        let sentence = "Fotosynteza wymaga światła słonecznego, dwutlenku węgla oraz wody";
        let mut rng = StdRng::seed_from_u64(7);

        let question = create_multiple_choice(sentence, &keywords, &mut rng).expect("built");

        assert_eq!(question.options.len(), 4);
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
        assert_eq!(question.options[question.correct], "Fotosynteza");
        assert!(question.question.contains(BLANK_MARKER));
        assert!(!question.question.to_lowercase().contains("fotosynteza"));

        let mut unique = question.options.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn multiple_choice_pads_distractors_with_fillers() {
        let sentence = "Fotosynteza wymaga światła słonecznego, dwutlenku węgla oraz wody";
        let mut rng = StdRng::seed_from_u64(3);

        let question = create_multiple_choice(sentence, &[], &mut rng).expect("built");

        assert_eq!(question.options.len(), 4);
        for filler in FILLER_DISTRACTORS {
            assert!(question.options.iter().any(|o| o == filler));
        }
    }

    #[test]
    fn multiple_choice_needs_enough_long_words() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(create_multiple_choice("To za mało słów", &[], &mut rng).is_none());
    }

    #[test]
    fn true_false_text_matches_label() {
        let sentence = "Chlorofil jest zielonym barwnikiem wszystkich roślin";
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = create_true_false(sentence, &mut rng).expect("built");

            assert_eq!(question.options, vec!["Prawda", "Fałsz"]);
            let statement = question.question.strip_prefix(TF_PREFIX).unwrap();
            if question.correct == 0 {
                assert_eq!(statement, sentence);
            } else {
                assert_ne!(statement, sentence);
            }
        }
    }

    #[test]
    fn fill_blank_requires_a_keyword_bearing_word() {
        let keywords = vec!["fotosynteza".to_string()];
        assert!(create_fill_blank("Zdanie zupełnie obok tematu dokumentu", &keywords).is_none());

        let question = create_fill_blank("Cała fotosynteza zachodzi w liściach rośliny", &keywords)
            .expect("built");
        assert_eq!(question.correct, 0);
        assert_eq!(question.options[0], "fotosynteza");
        assert_eq!(question.options[1], "Nie fotosynteza");
        assert!(question.question.contains(BLANK_MARKER));
    }

    #[test]
    fn quiz_is_capped_and_rotates_kinds() {
        let text = (0..60)
            .map(|i| {
                format!(
                    "Zdanie {i} opisuje fotosyntezę, chlorofil oraz światło słoneczne dokładnie"
                )
            })
            .collect::<Vec<_>>()
            .join(". ")
            + ".";
        let sentences = split_sentences(&text, MIN_SENTENCE_TOPIC);
        let keywords = vec!["fotosyntezę".to_string(), "chlorofil".to_string()];
        let mut rng = StdRng::seed_from_u64(11);

        let quiz = generate_quiz(&sentences, &keywords, 10, &mut rng);

        assert!(quiz.len() <= 10);
        assert!(quiz.iter().any(|q| q.kind == QuestionKind::MultipleChoice));
        assert!(quiz.iter().any(|q| q.kind == QuestionKind::TrueFalse));
        assert!(quiz.iter().any(|q| q.kind == QuestionKind::FillBlank));
        for question in &quiz {
            assert!(question.correct < question.options.len());
        }
    }

    #[test]
    fn short_documents_yield_shorter_quizzes() {
        let text = "Jedno dłuższe zdanie o fotosyntezie roślin zielonych. Drugie dłuższe zdanie o chlorofilu w liściach.";
        let sentences = split_sentences(&text, MIN_SENTENCE_TOPIC);
        let mut rng = StdRng::seed_from_u64(2);

        let quiz = generate_quiz(&sentences, &[], 10, &mut rng);
        assert!(quiz.is_empty());
    }

    #[test]
    fn identical_seeds_give_identical_quizzes() {
        let text = (0..30)
            .map(|i| format!("Zdanie {i} opisuje fotosyntezę oraz światło słoneczne w liściach"))
            .collect::<Vec<_>>()
            .join(". ")
            + ".";
        let sentences = split_sentences(&text, MIN_SENTENCE_TOPIC);
        let keywords = vec!["fotosyntezę".to_string()];

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let quiz_a = generate_quiz(&sentences, &keywords, 10, &mut rng_a);
        let quiz_b = generate_quiz(&sentences, &keywords, 10, &mut rng_b);

        assert_eq!(quiz_a.len(), quiz_b.len());
        for (a, b) in quiz_a.iter().zip(&quiz_b) {
            assert_eq!(a.question, b.question);
            assert_eq!(a.options, b.options);
            assert_eq!(a.correct, b.correct);
        }
    }
}
