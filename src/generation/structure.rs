use async_trait::async_trait;
use regex::Regex;

use crate::{
    core::{
        Document,
        EdulearnError,
        MindMap,
        MindMapBranch,
        StudySet,
        Summary,
    },
    generation::{
        mindmap::capitalize_first,
        quiz::create_true_false,
        GenerationStrategy,
        HeuristicStrategy,
    },
    text::segmenter::{
        split_sentences,
        MIN_SENTENCE_TOPIC,
    },
};

// Heuristic thresholds, tuned against typical school handouts. None of
// these are contractual; adjust freely when a corpus misbehaves.
const HEADER_MIN_CHARS: usize = 5;
const HEADER_MAX_CHARS: usize = 50;
const HEADER_UPPERCASE_RATIO: f64 = 0.6;
const SECTION_CONTENT_LINES: usize = 5;
const CLASSIFICATION_MIN_UPPERCASE: usize = 3;
const NARRATIVE_FACTS_SHORT: usize = 1;
const NARRATIVE_FACTS_MEDIUM: usize = 3;
const NARRATIVE_FACTS_LONG: usize = 5;

/// Definitional phrases marking a sentence as a key fact.
const FACT_MARKERS: &[&str] =
    &["jest to", "to znaczy", "oznacza", "polega na", "charakteryzuje się", "nazywamy"];

/// Procedural connectives marking a sentence as part of a process.
const PROCESS_MARKERS: &[&str] =
    &["następnie", "potem", "w wyniku", "prowadzi do", "powoduje", "proces", "etap"];

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentStructure {
    pub sections: Vec<Section>,
    pub key_facts: Vec<String>,
    pub processes: Vec<String>,
    pub classifications: Vec<String>,
    pub numbers: Vec<String>,
}

impl DocumentStructure {
    /// Whether the document exposed enough structure to drive the
    /// narrative generators instead of the plain heuristic ones.
    pub fn is_informative(&self) -> bool {
        !self.sections.is_empty() || !self.key_facts.is_empty()
    }
}

fn is_header_line(line: &str) -> bool {
    let chars = line.chars().count();
    if !(HEADER_MIN_CHARS..=HEADER_MAX_CHARS).contains(&chars) {
        return false;
    }
    let alphabetic: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    if alphabetic.is_empty() {
        return false;
    }
    let uppercase = alphabetic.iter().filter(|c| c.is_uppercase()).count();
    uppercase as f64 / alphabetic.len() as f64 > HEADER_UPPERCASE_RATIO
}

fn is_classification(sentence: &str) -> bool {
    sentence.contains(':')
        && sentence.chars().filter(|c| c.is_uppercase()).count() >= CLASSIFICATION_MIN_UPPERCASE
}

fn contains_any(sentence: &str, markers: &[&str]) -> bool {
    let lowered = sentence.to_lowercase();
    markers.iter().any(|m| lowered.contains(m))
}

/// Heuristic pass over the raw text: section headers with their trailing
/// content lines, plus sentence buckets and numeric mentions.
pub fn parse_structure(text: &str) -> DocumentStructure {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut sections = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if is_header_line(lines[i]) {
            let title = lines[i].to_string();
            let mut content = Vec::new();
            let mut j = i + 1;
            while j < lines.len() && content.len() < SECTION_CONTENT_LINES {
                if lines[j].is_empty() {
                    j += 1;
                    continue;
                }
                if is_header_line(lines[j]) {
                    break;
                }
                content.push(lines[j].to_string());
                j += 1;
            }
            sections.push(Section { title, content });
            i = j;
        } else {
            i += 1;
        }
    }

    let mut structure = DocumentStructure { sections, ..Default::default() };

    for sentence in split_sentences(text, MIN_SENTENCE_TOPIC) {
        if contains_any(&sentence.text, FACT_MARKERS) {
            structure.key_facts.push(sentence.text.clone());
        }
        if contains_any(&sentence.text, PROCESS_MARKERS) {
            structure.processes.push(sentence.text.clone());
        }
        if is_classification(&sentence.text) {
            structure.classifications.push(sentence.text);
        }
    }

    if let Ok(pattern) = Regex::new(r"\d+(?:[.,]\d+)?%?") {
        structure.numbers =
            pattern.find_iter(text).map(|m| m.as_str().to_string()).collect();
    }

    structure
}

fn overview_sentence(structure: &DocumentStructure) -> Option<String> {
    if structure.sections.is_empty() {
        return None;
    }
    let titles: Vec<String> = structure
        .sections
        .iter()
        .map(|s| capitalize_first(&s.title.to_lowercase()))
        .collect();
    Some(format!("Dokument obejmuje następujące zagadnienia: {}.", titles.join(", ")))
}

fn narrative_tier(structure: &DocumentStructure, fact_count: usize, with_processes: bool) -> String {
    let mut parts = Vec::new();
    if let Some(overview) = overview_sentence(structure) {
        parts.push(overview);
    }
    for fact in structure.key_facts.iter().take(fact_count) {
        parts.push(format!("{fact}."));
    }
    if with_processes {
        for process in structure.processes.iter().take(2) {
            parts.push(format!("{process}."));
        }
    }
    parts.join(" ")
}

/// Templated summaries interpolating section titles and extracted facts.
fn narrative_summary(structure: &DocumentStructure) -> Summary {
    Summary {
        short: narrative_tier(structure, NARRATIVE_FACTS_SHORT, false),
        medium: narrative_tier(structure, NARRATIVE_FACTS_MEDIUM, false),
        long: narrative_tier(structure, NARRATIVE_FACTS_LONG, true),
    }
}

fn section_mind_map(structure: &DocumentStructure, base: &MindMap) -> MindMap {
    let branches: Vec<MindMapBranch> = structure
        .sections
        .iter()
        .take(5)
        .map(|section| {
            let mut subtopics: Vec<String> = section
                .content
                .iter()
                .take(4)
                .map(|line| {
                    let words: Vec<&str> = line.split_whitespace().collect();
                    if words.len() <= 6 {
                        line.clone()
                    } else {
                        format!("{}...", words[..4].join(" "))
                    }
                })
                .collect();
            if subtopics.is_empty() {
                subtopics.push(format!("Najważniejsze informacje: {}", section.title));
            }
            MindMapBranch {
                topic: capitalize_first(&section.title.to_lowercase()),
                subtopics,
            }
        })
        .collect();

    MindMap { central: base.central.clone(), branches }
}

/// Structure-aware generation: the heuristic pipeline enriched with
/// detected sections and fact sentences. Falls back to the plain heuristic
/// output wherever the document exposes no structure.
pub struct StructureAwareStrategy {
    inner: HeuristicStrategy,
}

impl StructureAwareStrategy {
    pub fn new(inner: HeuristicStrategy) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GenerationStrategy for StructureAwareStrategy {
    async fn generate(&mut self, document: &Document) -> Result<StudySet, EdulearnError> {
        let mut bundle = self.inner.generate(document).await?;
        let structure = parse_structure(&document.text);

        if !structure.is_informative() {
            return Ok(bundle);
        }

        if !structure.key_facts.is_empty() {
            bundle.summary = narrative_summary(&structure);
        }
        if structure.sections.len() >= 2 {
            bundle.mind_map = section_mind_map(&structure, &bundle.mind_map);
        }

        // Facts make good true/false material; top the quiz up with them.
        let max_questions = self.inner.config.max_questions;
        for fact in &structure.key_facts {
            if bundle.quiz.len() >= max_questions {
                break;
            }
            if let Some(question) = create_true_false(fact, &mut self.inner.rng) {
                bundle.quiz.push(question);
            }
        }

        Ok(bundle)
    }
}
