use log::debug;
use rand::Rng;

use crate::bot::callback::QuizAction;
use crate::bot::render::{self, Card};
use crate::quiz::events::{Observers, QuizController};
use crate::quiz::session::{Advanced, Phase, QuizSession};
use crate::quiz::QuestionBank;

/// What the chat should see after a button press.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Replace the pressed message with this card.
    Show(Card),
    /// Nothing changed; answer the press with a short toast.
    Notice(&'static str),
    /// Nothing changed and nothing worth saying (e.g. a repeated tap).
    Ignore,
}

pub const QUIZ_RUNNING: &str = "A quiz is already running.";
pub const NO_QUIZ: &str = "There is no quiz running. Send /quiz to start one.";
pub const QUIZ_OVER: &str = "This quiz is over.";
pub const EARLIER_QUIZ: &str = "This button belongs to an earlier quiz.";

/// Applies one button press to `session`. Presses rendered for another
/// session, cursor or phase are dropped here so the session only ever sees
/// in-order input from its own keyboard.
pub fn apply<R: Rng + ?Sized>(
    action: QuizAction,
    session: &mut QuizSession,
    bank: &QuestionBank,
    observers: &Observers,
    rng: &mut R,
) -> Reply {
    let phase = session.phase();
    if let Some(pressed_for) = action.session() {
        if phase == Phase::Idle {
            return Reply::Notice(NO_QUIZ);
        }
        if pressed_for != session.id() {
            debug!(
                "Dropping {} from session {}, current session is {}",
                action,
                pressed_for,
                session.id()
            );
            return Reply::Notice(EARLIER_QUIZ);
        }
    }

    let mut controller = QuizController::new(session, observers);
    match action {
        QuizAction::Begin => match phase {
            Phase::Idle => {
                controller.start(bank, rng);
                show(render::question(controller.session()))
            }
            Phase::InProgress => Reply::Notice(QUIZ_RUNNING),
            Phase::Finished => Reply::Notice(QUIZ_OVER),
        },
        QuizAction::Pick { cursor, option, .. } => {
            if !is_current(controller.session(), cursor) {
                debug!("Dropping stale pick for question {}", cursor + 1);
                return stale(phase);
            }
            match controller.answer(option) {
                Some(_) => show(render::question(controller.session())),
                None => Reply::Ignore,
            }
        }
        QuizAction::Next { cursor, .. } => {
            let answered = controller
                .session()
                .current_item()
                .map_or(false, |item| item.is_locked());
            if !is_current(controller.session(), cursor) || !answered {
                debug!("Dropping stale next for question {}", cursor + 1);
                return stale(phase);
            }
            match controller.advance() {
                Some(Advanced::Next { .. }) => show(render::question(controller.session())),
                Some(Advanced::Finished(_)) => show(render::results(controller.session())),
                None => Reply::Ignore,
            }
        }
        QuizAction::ReviewPrevious { .. } | QuizAction::ReviewNext { .. }
            if phase != Phase::Finished =>
        {
            stale(phase)
        }
        QuizAction::ReviewPrevious { .. } => match controller.review_previous() {
            Some(_) => show(render::results(controller.session())),
            None => Reply::Ignore,
        },
        QuizAction::ReviewNext { .. } => match controller.review_next() {
            Some(_) => show(render::results(controller.session())),
            None => Reply::Ignore,
        },
        QuizAction::Restart { .. } => {
            controller.reset();
            Reply::Show(render::welcome(bank.len()))
        }
    }
}

fn is_current(session: &QuizSession, cursor: usize) -> bool {
    session.phase() == Phase::InProgress && session.cursor() == cursor
}

fn stale(phase: Phase) -> Reply {
    match phase {
        Phase::Idle => Reply::Notice(NO_QUIZ),
        Phase::InProgress => Reply::Ignore,
        Phase::Finished => Reply::Notice(QUIZ_OVER),
    }
}

fn show(card: Option<Card>) -> Reply {
    card.map_or(Reply::Ignore, Reply::Show)
}
