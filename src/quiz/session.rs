use rand::Rng;

use crate::quiz::{Question, QuestionBank};

/// Fisher-Yates: walk from the last index down to 1, swapping each slot with a
/// uniformly chosen slot in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Per-session working copy of a [`Question`] with its options shuffled.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionItem {
    pub text: String,
    pub options: Vec<String>,
    /// Position of the correct option within the shuffled `options`.
    pub correct_index: usize,
    pub pick: Option<usize>,
}

impl SessionItem {
    pub fn from_question<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let mut flagged = question
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| (text.clone(), i == question.correct_index))
            .collect::<Vec<_>>();
        shuffle(&mut flagged, rng);

        let correct_index = flagged
            .iter()
            .position(|(_, is_correct)| *is_correct)
            .unwrap_or_default();
        Self {
            text: question.text.clone(),
            options: flagged.into_iter().map(|(text, _)| text).collect(),
            correct_index,
            pick: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.pick.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.pick == Some(self.correct_index)
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    pub fn picked_option(&self) -> Option<&str> {
        self.pick
            .and_then(|pick| self.options.get(pick))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStarted {
    pub total: usize,
}

/// Emitted the first time an item is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerLocked {
    pub cursor: usize,
    pub chosen: usize,
    pub correct: usize,
}

impl AnswerLocked {
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    Next { cursor: usize, total: usize },
    Finished(FinalScore),
}

/// What the post-quiz review shows for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    pub position: usize,
    pub total: usize,
    pub question: String,
    pub picked: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

impl ReviewCard {
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.total
    }
}

/// The quiz state machine: `Idle -> InProgress -> Finished -> Idle`.
///
/// Every transition is a plain method on the value; calls that make no sense
/// in the current phase return `None` and leave the session untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    /// Random non-zero tag for this run, different from the run it replaced.
    id: u32,
    items: Vec<SessionItem>,
    cursor: usize,
    score: usize,
    review_cursor: usize,
    phase: Phase,
}

impl QuizSession {
    /// Builds a fresh session from `bank`, discarding whatever was there.
    pub fn start<R: Rng + ?Sized>(&mut self, bank: &QuestionBank, rng: &mut R) -> SessionStarted {
        let mut items = bank
            .questions()
            .iter()
            .map(|question| SessionItem::from_question(question, rng))
            .collect::<Vec<_>>();
        shuffle(&mut items, rng);

        let mut id = rng.gen::<u32>();
        while id == 0 || id == self.id {
            id = rng.gen::<u32>();
        }

        *self = Self {
            id,
            items,
            cursor: 0,
            score: 0,
            review_cursor: 0,
            phase: Phase::InProgress,
        };
        SessionStarted { total: self.total() }
    }

    pub fn started<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Self {
        let mut session = Self::default();
        session.start(bank, rng);
        session
    }

    /// Locks `selected` as the pick for the current item. Only the first call
    /// per item counts.
    pub fn answer(&mut self, selected: usize) -> Option<AnswerLocked> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let cursor = self.cursor;
        let item = self.items.get_mut(cursor)?;
        if item.is_locked() || selected >= item.options.len() {
            return None;
        }

        item.pick = Some(selected);
        if selected == item.correct_index {
            self.score += 1;
        }
        Some(AnswerLocked {
            cursor,
            chosen: selected,
            correct: item.correct_index,
        })
    }

    pub fn advance(&mut self) -> Option<Advanced> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.cursor += 1;
        if self.cursor < self.items.len() {
            Some(Advanced::Next {
                cursor: self.cursor,
                total: self.total(),
            })
        } else {
            Some(Advanced::Finished(self.finish()))
        }
    }

    fn finish(&mut self) -> FinalScore {
        self.cursor = self.items.len();
        self.phase = Phase::Finished;
        self.review_cursor = 0;
        FinalScore {
            score: self.score,
            total: self.total(),
        }
    }

    pub fn review_next(&mut self) -> Option<ReviewCard> {
        if self.phase != Phase::Finished || self.review_cursor + 1 >= self.items.len() {
            return None;
        }
        self.review_cursor += 1;
        self.review_card()
    }

    pub fn review_previous(&mut self) -> Option<ReviewCard> {
        if self.phase != Phase::Finished || self.review_cursor == 0 {
            return None;
        }
        self.review_cursor -= 1;
        self.review_card()
    }

    pub fn review_card(&self) -> Option<ReviewCard> {
        if self.phase != Phase::Finished {
            return None;
        }
        let item = self.items.get(self.review_cursor)?;
        Some(ReviewCard {
            position: self.review_cursor,
            total: self.total(),
            question: item.text.clone(),
            picked: item.picked_option().map(str::to_owned),
            correct: item.correct_option()?.to_owned(),
            is_correct: item.is_correct(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Tag of the current run, `0` while idle.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn review_cursor(&self) -> usize {
        self.review_cursor
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[SessionItem] {
        &self.items
    }

    pub fn current_item(&self) -> Option<&SessionItem> {
        match self.phase {
            Phase::InProgress => self.items.get(self.cursor),
            _ => None,
        }
    }

    /// Rounded share of questions done: an answered current item counts as done.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total();
        let done = match self.phase {
            Phase::Idle => return 0,
            Phase::Finished => total,
            Phase::InProgress => {
                let answered = self.current_item().map_or(false, SessionItem::is_locked);
                self.cursor + usize::from(answered)
            }
        };
        if total == 0 {
            return 0;
        }
        ((done * 200 + total) / (2 * total)) as u8
    }
}
