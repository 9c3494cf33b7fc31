use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Largest distance between a submitted and a true answer that still counts as correct.
pub const TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Operand bound and operator set for one difficulty tier.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyRange {
    pub max: u32,
    pub operators: &'static [Operator],
}

const EASY: DifficultyRange = DifficultyRange {
    max: 10,
    operators: &[Operator::Add, Operator::Subtract],
};

const MEDIUM: DifficultyRange = DifficultyRange {
    max: 20,
    operators: &[Operator::Add, Operator::Subtract, Operator::Multiply],
};

const HARD: DifficultyRange = DifficultyRange {
    max: 50,
    operators: &[
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ],
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn range(self) -> DifficultyRange {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Persisted as the plain ASCII symbol, displayed with the typographic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Exact result, or `None` when it would be negative or fractional.
    pub fn apply(self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operator::Add => a.checked_add(b),
            Operator::Subtract => a.checked_sub(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Divide => {
                if b == 0 || a % b != 0 {
                    None
                } else {
                    Some(a / b)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Opaque; new problems get a UUID, older stored entries may carry short ids.
    id: String,
    operand1: u32,
    operand2: u32,
    operator: Operator,
    answer: u32,
    difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_answer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_correct: Option<bool>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl Problem {
    /// Builds a problem from explicit operands. Fails if the operands would give a
    /// negative difference, a fractional quotient or a division by zero.
    pub fn new(
        operand1: u32,
        operator: Operator,
        operand2: u32,
        difficulty: Difficulty,
    ) -> Result<Self> {
        let answer = operator.apply(operand1, operand2).ok_or_else(|| {
            Error::InvalidProblem(format!("{} {} {}", operand1, operator, operand2))
        })?;
        Ok(Self::assemble(operand1, operator, operand2, answer, difficulty))
    }

    fn assemble(
        operand1: u32,
        operator: Operator,
        operand2: u32,
        answer: u32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            operand1,
            operand2,
            operator,
            answer,
            difficulty,
            user_answer: None,
            is_correct: None,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn answer(&self) -> u32 {
        self.answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn user_answer(&self) -> Option<f64> {
        self.user_answer
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some() && self.is_correct.is_some()
    }

    /// Attaches the user's answer and its correctness. Returns whether it was correct.
    pub fn submit(&mut self, answer: f64) -> bool {
        let correct = evaluate(self, answer);
        self.user_answer = Some(answer);
        self.is_correct = Some(correct);
        correct
    }

    pub fn display(&self, reveal_answer: bool) -> String {
        format(self, reveal_answer)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self, false))
    }
}

pub fn generate(difficulty: Difficulty) -> Problem {
    generate_with(difficulty, &mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Problem {
    let range = difficulty.range();
    let operator = range.operators[rng.gen_range(0..range.operators.len())];

    let (operand1, operand2, answer) = match operator {
        Operator::Add => {
            let a = draw(rng, range.max);
            let b = draw(rng, range.max);
            (a, b, a + b)
        }
        Operator::Subtract => {
            let a = draw(rng, range.max);
            let b = draw(rng, range.max);
            let (a, b) = if a < b { (b, a) } else { (a, b) };
            (a, b, a - b)
        }
        Operator::Multiply => {
            // Operands up to sqrt(max) keep the product near the tier's magnitude.
            let limit = (range.max as f64).sqrt() as u32;
            let a = draw(rng, limit);
            let b = draw(rng, limit);
            (a, b, a * b)
        }
        Operator::Divide => {
            let quotient = draw(rng, range.max / 2);
            let divisor = draw(rng, range.max / quotient);
            (quotient * divisor, divisor, quotient)
        }
    };

    let problem = Problem::assemble(operand1, operator, operand2, answer, difficulty);
    tracing::debug!(
        id = %problem.id,
        ?difficulty,
        "generated {}",
        problem
    );
    problem
}

fn draw<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    rng.gen_range(1..=max)
}

pub fn evaluate(problem: &Problem, submitted: f64) -> bool {
    (problem.answer as f64 - submitted).abs() < TOLERANCE
}

pub fn format(problem: &Problem, reveal_answer: bool) -> String {
    let answer = if reveal_answer {
        problem.answer.to_string()
    } else {
        "?".to_string()
    };
    format!(
        "{} {} {} = {}",
        problem.operand1, problem.operator, problem.operand2, answer
    )
}

/// Parses typed input. Empty or non-numeric text is not a submission.
pub fn parse_answer(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyAnswer);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::NotANumber(trimmed.to_string())),
    }
}
