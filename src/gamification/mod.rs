use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    QuizAnswer,
    QuizQuestion,
};

pub const POINTS_UPLOAD: u32 = 10;
pub const POINTS_MIND_MAP: u32 = 25;
pub const POINTS_SUMMARY: u32 = 15;
pub const POINTS_QUIZ_START: u32 = 5;
pub const POINTS_PER_CORRECT: u32 = 3;

const LEVEL_INTERMEDIATE: u32 = 200;
const LEVEL_ADVANCED: u32 = 500;
const LEVEL_EXPERT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    pub fn from_points(points: u32) -> Self {
        if points >= LEVEL_EXPERT {
            Level::Expert
        } else if points >= LEVEL_ADVANCED {
            Level::Advanced
        } else if points >= LEVEL_INTERMEDIATE {
            Level::Intermediate
        } else {
            Level::Beginner
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Level::Beginner => "Początkujący",
            Level::Intermediate => "Średniozaawansowany",
            Level::Advanced => "Zaawansowany",
            Level::Expert => "Ekspert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRequirement {
    UploadPdf,
    CreateMindMap,
    Score80,
    PerfectScore,
    Streak7,
}

#[derive(Debug, Clone)]
pub struct Badge {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: BadgeRequirement,
}

pub const BADGES: &[Badge] = &[
    Badge {
        name: "PDF Master",
        description: "Przetworzył pierwszy dokument PDF",
        icon: "📄",
        requirement: BadgeRequirement::UploadPdf,
    },
    Badge {
        name: "Mind Map Creator",
        description: "Stworzył pierwszą mapę myśli",
        icon: "🧠",
        requirement: BadgeRequirement::CreateMindMap,
    },
    Badge {
        name: "Quiz Champion",
        description: "Uzyskał wynik powyżej 80%",
        icon: "🏆",
        requirement: BadgeRequirement::Score80,
    },
    Badge {
        name: "Perfectionist",
        description: "Uzyskał 100% w quizie",
        icon: "⭐",
        requirement: BadgeRequirement::PerfectScore,
    },
    Badge {
        name: "Streaker",
        description: "Uczył się przez 7 dni z rzędu",
        icon: "🔥",
        requirement: BadgeRequirement::Streak7,
    },
];

/// Cross-session learning progress. Points only ever grow, badges are
/// append-only, and the level is derived from points rather than stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub points: u32,
    pub badges: Vec<String>,
    pub documents_processed: u32,
    pub completed_quizzes: u32,
}

impl UserProgress {
    pub fn level(&self) -> Level {
        Level::from_points(self.points)
    }

    /// Add points; reports the new level when the award crossed a
    /// threshold.
    pub fn add_points(&mut self, points: u32) -> Option<Level> {
        let before = self.level();
        self.points += points;
        let after = self.level();
        (after != before).then_some(after)
    }

    /// Grant the badge for `requirement` if it exists and was not earned
    /// yet.
    pub fn award_badge(&mut self, requirement: BadgeRequirement) -> Option<&'static Badge> {
        let badge = BADGES
            .iter()
            .find(|b| b.requirement == requirement && !self.badges.iter().any(|n| n == b.name))?;
        self.badges.push(badge.name.to_string());
        Some(badge)
    }
}

/// Polish school grade predicted from a quiz percentage.
pub fn grade_from_percentage(percentage: u32) -> &'static str {
    match percentage {
        95..=100 => "5.0 (Celujący)",
        85..=94 => "4.5 (Bardzo dobry+)",
        75..=84 => "4.0 (Bardzo dobry)",
        65..=74 => "3.5 (Dobry+)",
        55..=64 => "3.0 (Dobry)",
        45..=54 => "2.5 (Dostateczny+)",
        35..=44 => "2.0 (Dostateczny)",
        _ => "1.0 (Niedostateczny)",
    }
}

/// Everything the UI needs after a finished quiz.
#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: &'static str,
    pub points_awarded: u32,
    pub new_level: Option<Level>,
    pub new_badges: Vec<&'static Badge>,
}

/// One run through a generated quiz. Answers are appended as submitted and
/// never rewritten; review screens read them back verbatim.
#[derive(Debug, Default)]
pub struct QuizSession {
    answers: Vec<QuizAnswer>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_answer(
        &mut self,
        question_index: usize,
        question: &QuizQuestion,
        selected: usize,
    ) -> bool {
        let is_correct = selected == question.correct;
        self.answers.push(QuizAnswer {
            question_index,
            selected,
            correct: question.correct,
            is_correct,
            question: question.question.clone(),
            explanation: question.explanation.clone(),
        });
        is_correct
    }

    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    pub fn percentage(&self) -> u32 {
        if self.answers.is_empty() {
            return 0;
        }
        (self.correct_count() * 100 / self.answers.len()) as u32
    }

    /// Incorrectly answered questions, for the improvement-areas view.
    pub fn incorrect_answers(&self) -> Vec<&QuizAnswer> {
        self.answers.iter().filter(|a| !a.is_correct).collect()
    }

    /// Close the session: award points and badges, bump counters.
    pub fn finish(self, progress: &mut UserProgress) -> QuizOutcome {
        let correct = self.correct_count();
        let total = self.answers.len();
        let percentage = self.percentage();

        let points_awarded = correct as u32 * POINTS_PER_CORRECT;
        let new_level = progress.add_points(points_awarded);
        progress.completed_quizzes += 1;

        let mut new_badges = Vec::new();
        if percentage >= 80 {
            new_badges.extend(progress.award_badge(BadgeRequirement::Score80));
        }
        if percentage == 100 {
            new_badges.extend(progress.award_badge(BadgeRequirement::PerfectScore));
        }

        QuizOutcome {
            correct,
            total,
            percentage,
            grade: grade_from_percentage(percentage),
            points_awarded,
            new_level,
            new_badges,
        }
    }
}
