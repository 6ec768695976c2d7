use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use crate::quiz::session::{Advanced, AnswerLocked, QuizSession, ReviewCard, SessionStarted};
use crate::quiz::QuestionBank;

/// Outbound notifications for anything that reacts to the quiz without
/// steering it. Cursors are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    SessionStarted { total: usize },
    ItemRendered { cursor: usize, total: usize },
    AnswerLocked { cursor: usize, chosen: usize, correct: usize },
    QuizFinished { score: usize, total: usize },
    ReviewShown { cursor: usize, total: usize },
    SessionReset,
}

pub trait QuizObserver: Send + Sync {
    fn notify(&self, event: &QuizEvent);
}

/// The set of observers wired up at startup.
#[derive(Clone, Default)]
pub struct Observers {
    observers: Vec<Arc<dyn QuizObserver>>,
}

impl Observers {
    pub fn new(observers: Vec<Arc<dyn QuizObserver>>) -> Self {
        if observers.is_empty() {
            warn!("No quiz observers registered, quiz events will not be reported");
        }
        Self { observers }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn publish(&self, event: QuizEvent) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }
}

/// Writes every event to the log.
pub struct LogObserver;

impl QuizObserver for LogObserver {
    fn notify(&self, event: &QuizEvent) {
        match event {
            QuizEvent::SessionStarted { total } => {
                info!("Quiz session started with {} questions", total)
            }
            QuizEvent::ItemRendered { cursor, total } => {
                debug!("Showing question {} of {}", cursor + 1, total)
            }
            QuizEvent::AnswerLocked {
                cursor,
                chosen,
                correct,
            } => {
                let verdict = if chosen == correct {
                    "correctly"
                } else {
                    "incorrectly"
                };
                info!("Question {} answered {}.", cursor + 1, verdict);
                debug!("Chosen option {}, correct option {}", chosen, correct);
            }
            QuizEvent::QuizFinished { score, total } => {
                info!("Quiz finished with score {} of {}", score, total)
            }
            QuizEvent::ReviewShown { cursor, total } => {
                debug!("Reviewing question {} of {}", cursor + 1, total)
            }
            QuizEvent::SessionReset => info!("Quiz session reset"),
        }
    }
}

/// Drives a [`QuizSession`] and tells the observers what happened.
pub struct QuizController<'a> {
    session: &'a mut QuizSession,
    observers: &'a Observers,
}

impl<'a> QuizController<'a> {
    pub fn new(session: &'a mut QuizSession, observers: &'a Observers) -> Self {
        Self { session, observers }
    }

    pub fn session(&self) -> &QuizSession {
        self.session
    }

    pub fn start<R: Rng + ?Sized>(&mut self, bank: &QuestionBank, rng: &mut R) -> SessionStarted {
        let started = self.session.start(bank, rng);
        self.observers.publish(QuizEvent::SessionStarted {
            total: started.total,
        });
        self.observers.publish(QuizEvent::ItemRendered {
            cursor: 0,
            total: started.total,
        });
        started
    }

    pub fn answer(&mut self, selected: usize) -> Option<AnswerLocked> {
        let locked = self.session.answer(selected)?;
        self.observers.publish(QuizEvent::AnswerLocked {
            cursor: locked.cursor,
            chosen: locked.chosen,
            correct: locked.correct,
        });
        Some(locked)
    }

    pub fn advance(&mut self) -> Option<Advanced> {
        let advanced = self.session.advance()?;
        match advanced {
            Advanced::Next { cursor, total } => {
                self.observers
                    .publish(QuizEvent::ItemRendered { cursor, total });
            }
            Advanced::Finished(final_score) => {
                self.observers.publish(QuizEvent::QuizFinished {
                    score: final_score.score,
                    total: final_score.total,
                });
                if let Some(card) = self.session.review_card() {
                    self.publish_review(&card);
                }
            }
        }
        Some(advanced)
    }

    pub fn review_next(&mut self) -> Option<ReviewCard> {
        let card = self.session.review_next()?;
        self.publish_review(&card);
        Some(card)
    }

    pub fn review_previous(&mut self) -> Option<ReviewCard> {
        let card = self.session.review_previous()?;
        self.publish_review(&card);
        Some(card)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.observers.publish(QuizEvent::SessionReset);
    }

    fn publish_review(&self, card: &ReviewCard) {
        self.observers.publish(QuizEvent::ReviewShown {
            cursor: card.position,
            total: card.total,
        });
    }
}
