//! Turns quiz state into Telegram messages. Everything here is pure so it can
//! be checked without a bot.

use teloxide::{
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::html,
};

use crate::bot::callback::QuizAction;
use crate::quiz::session::{QuizSession, ReviewCard};

const PROGRESS_CELLS: usize = 10;

pub const WELCOME_TEXT: &str = "Welcome to the 1970 Minnesota Vikings quiz! \
Answer each question, then review what you got right and wrong.";

/// An HTML message body with its inline keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

fn button(label: impl Into<String>, action: QuizAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.to_string())
}

pub fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * PROGRESS_CELLS + 50) / 100;
    format!(
        "{}{} {}%",
        "▰".repeat(filled),
        "▱".repeat(PROGRESS_CELLS - filled),
        percent.min(100)
    )
}

pub fn welcome(question_count: usize) -> Card {
    Card {
        text: format!("{}\n\n{} questions await.", WELCOME_TEXT, question_count),
        keyboard: InlineKeyboardMarkup::new(vec![vec![button(
            "Start quiz",
            QuizAction::Begin,
        )]]),
    }
}

/// The question at the session cursor, showing the verdict once it's answered.
pub fn question(session: &QuizSession) -> Option<Card> {
    let item = session.current_item()?;
    let cursor = session.cursor();
    let id = session.id();

    let mut text = format!(
        "<b>Question {} of {}</b>\n{}\n\n{}",
        cursor + 1,
        session.total(),
        progress_bar(session.progress_percent()),
        html::escape(&item.text)
    );

    let mut rows = item
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let label = match item.pick {
                Some(_) if i == item.correct_index => format!("✅ {}", option),
                Some(pick) if i == pick => format!("❌ {}", option),
                _ => option.clone(),
            };
            vec![button(
                label,
                QuizAction::Pick {
                    session: id,
                    cursor,
                    option: i,
                },
            )]
        })
        .collect::<Vec<_>>();

    if item.is_locked() {
        text.push_str(if item.is_correct() {
            "\n\n✅ Correct!"
        } else {
            "\n\n❌ Incorrect."
        });
        let next_label = if cursor + 1 == session.total() {
            "See results"
        } else {
            "Next question"
        };
        rows.push(vec![button(
            next_label,
            QuizAction::Next {
                session: id,
                cursor,
            },
        )]);
    }

    Some(Card {
        text,
        keyboard: InlineKeyboardMarkup::new(rows),
    })
}

/// `session` is the id of the session the card was taken from.
pub fn review(card: &ReviewCard, session: u32) -> Card {
    let verdict = if card.is_correct { "✅" } else { "❌" };
    let picked = match &card.picked {
        Some(picked) => html::escape(picked),
        None => "<i>None</i>".to_string(),
    };
    let text = format!(
        "<b>Review {} of {}</b>\n\n{}\n\n{} Your answer: <b>{}</b>\n✅ Correct: <b>{}</b>",
        card.position + 1,
        card.total,
        html::escape(&card.question),
        verdict,
        picked,
        html::escape(&card.correct)
    );

    let mut navigation = Vec::new();
    if !card.is_first() {
        navigation.push(button("◀ Previous", QuizAction::ReviewPrevious { session }));
    }
    if !card.is_last() {
        navigation.push(button("Next ▶", QuizAction::ReviewNext { session }));
    }
    let mut rows = Vec::new();
    if !navigation.is_empty() {
        rows.push(navigation);
    }
    rows.push(vec![button("Restart", QuizAction::Restart { session })]);

    Card {
        text,
        keyboard: InlineKeyboardMarkup::new(rows),
    }
}

/// Final score followed by the review card at the review cursor.
pub fn results(session: &QuizSession) -> Option<Card> {
    let card = review(&session.review_card()?, session.id());
    Some(Card {
        text: format!(
            "🏁 <b>You scored {} of {}</b>\n\n{}",
            session.score(),
            session.total(),
            card.text
        ),
        keyboard: card.keyboard,
    })
}
