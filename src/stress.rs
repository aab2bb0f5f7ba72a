use crate::error::StressError;

pub const QUESTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct StressQuestion {
    pub prompt: &'static str,
    /// Higher answers mean less stress, so the value is scored as `11 - answer`.
    pub reversed: bool,
}

pub const QUESTIONS: [StressQuestion; QUESTION_COUNT] = [
    StressQuestion {
        prompt: "How often do you feel overwhelmed by your coursework? (1-10)",
        reversed: false,
    },
    StressQuestion {
        prompt: "How would you rate your sleep quality? (1-10, where 10 is excellent)",
        reversed: true,
    },
    StressQuestion {
        prompt: "How often do you feel anxious about your academic performance? (1-10)",
        reversed: false,
    },
    StressQuestion {
        prompt: "How well do you manage your time between studies and personal life? (1-10, where 10 is excellent)",
        reversed: true,
    },
    StressQuestion {
        prompt: "How often do you feel supported by family and friends? (1-10, where 10 is very supported)",
        reversed: true,
    },
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StressAnswers {
    slots: [Option<u8>; QUESTION_COUNT],
}

impl StressAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[u8]) -> Result<Self, StressError> {
        let mut answers = Self::new();
        for (index, value) in values.iter().enumerate() {
            answers.set(index, *value)?;
        }
        Ok(answers)
    }

    pub fn set(&mut self, index: usize, value: u8) -> Result<(), StressError> {
        if index >= QUESTION_COUNT {
            return Err(StressError::BadIndex(index));
        }
        if !(1..=10).contains(&value) {
            return Err(StressError::BadValue(value));
        }
        self.slots[index] = Some(value);
        Ok(())
    }

    pub fn answered(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered() == QUESTION_COUNT
    }

    /// Returns `None` until every question has an answer.
    pub fn score(&self) -> Option<f64> {
        let mut total = 0u32;
        for (slot, question) in self.slots.iter().zip(QUESTIONS.iter()) {
            let value = (*slot)? as u32;
            total += if question.reversed { 11 - value } else { value };
        }
        Some(round_tenth(total as f64 / QUESTION_COUNT as f64))
    }

    pub fn take_score(&mut self) -> Option<f64> {
        let score = self.score()?;
        self.slots = Default::default();
        Some(score)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
