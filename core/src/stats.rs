use serde::{Deserialize, Serialize};

use crate::problem::Difficulty;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub total: u32,
    pub correct: u32,
}

impl DifficultyStats {
    /// Not stored; the per-difficulty record only tracks correct against total.
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.correct)
    }

    pub fn accuracy_percent(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByDifficulty {
    pub easy: DifficultyStats,
    pub medium: DifficultyStats,
    pub hard: DifficultyStats,
}

impl ByDifficulty {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyStats {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyStats {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn total(&self) -> u32 {
        Difficulty::ALL.iter().map(|d| self.get(*d).total).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub by_difficulty: ByDifficulty,
}

impl DailyStats {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            total: 0,
            correct: 0,
            incorrect: 0,
            by_difficulty: ByDifficulty::default(),
        }
    }

    pub fn record(&mut self, difficulty: Difficulty, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        let tier = self.by_difficulty.get_mut(difficulty);
        tier.total += 1;
        if correct {
            tier.correct += 1;
        }
    }

    pub fn accuracy_percent(&self) -> u32 {
        percentage(self.correct, self.total)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.accuracy_percent())
    }
}

fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Great,
    Good,
    Fair,
    KeepPracticing,
}

impl Grade {
    pub fn from_percentage(percent: u32) -> Self {
        match percent {
            90.. => Grade::Excellent,
            80..=89 => Grade::Great,
            70..=79 => Grade::Good,
            60..=69 => Grade::Fair,
            _ => Grade::KeepPracticing,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent!",
            Grade::Great => "Great job!",
            Grade::Good => "Keep it up!",
            Grade::Fair => "Needs a bit more work",
            Grade::KeepPracticing => "Keep practicing!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_totals_consistent() {
        let mut stats = DailyStats::empty("2024-03-01");
        stats.record(Difficulty::Easy, true);
        stats.record(Difficulty::Easy, true);
        stats.record(Difficulty::Medium, false);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.by_difficulty.easy, DifficultyStats { total: 2, correct: 2 });
        assert_eq!(stats.by_difficulty.medium, DifficultyStats { total: 1, correct: 0 });
        assert_eq!(stats.by_difficulty.hard, DifficultyStats::default());
        assert_eq!(stats.by_difficulty.total(), stats.total);
        assert_eq!(stats.by_difficulty.medium.incorrect(), 1);
    }

    #[test]
    fn accuracy_is_zero_without_attempts() {
        let stats = DailyStats::empty("2024-03-01");
        assert_eq!(stats.accuracy_percent(), 0);
        assert_eq!(stats.grade(), Grade::KeepPracticing);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        let mut stats = DailyStats::empty("2024-03-01");
        stats.record(Difficulty::Hard, true);
        stats.record(Difficulty::Hard, true);
        stats.record(Difficulty::Hard, false);
        assert_eq!(stats.accuracy_percent(), 67);
        assert_eq!(stats.by_difficulty.hard.accuracy_percent(), 67);
        assert_eq!(stats.grade(), Grade::Fair);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(Grade::from_percentage(100), Grade::Excellent);
        assert_eq!(Grade::from_percentage(90), Grade::Excellent);
        assert_eq!(Grade::from_percentage(89), Grade::Great);
        assert_eq!(Grade::from_percentage(70), Grade::Good);
        assert_eq!(Grade::from_percentage(60), Grade::Fair);
        assert_eq!(Grade::from_percentage(59), Grade::KeepPracticing);
    }

    #[test]
    fn serializes_with_camel_case_breakdown() {
        let json = serde_json::to_value(DailyStats::empty("2024-03-01")).unwrap();
        assert_eq!(json["byDifficulty"]["easy"]["total"], 0);
        assert!(json.get("by_difficulty").is_none());
    }
}
