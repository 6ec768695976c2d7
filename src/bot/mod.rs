pub mod actions;
pub mod callback;
pub mod render;

use std::sync::Arc;

use log::{debug, warn};
use teloxide::{
    dispatching::{dialogue, dialogue::ErasedStorage, UpdateHandler},
    prelude::*,
    types::ParseMode,
    utils::command::BotCommands,
};

use crate::quiz::{
    events::{Observers, QuizController},
    session::{Phase, QuizSession},
    QuestionBank,
};
use actions::Reply;
use callback::QuizAction;
use render::Card;

pub type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Playing {
        session: QuizSession,
    },
    Reviewing {
        session: QuizSession,
    },
}

impl State {
    pub fn from_session(session: QuizSession) -> Self {
        match session.phase() {
            Phase::Idle => State::Start,
            Phase::InProgress => State::Playing { session },
            Phase::Finished => State::Reviewing { session },
        }
    }

    pub fn into_session(self) -> QuizSession {
        match self {
            State::Start => QuizSession::default(),
            State::Playing { session } | State::Reviewing { session } => session,
        }
    }
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message.")]
    Start,
    #[command(description = "start a new quiz right away.")]
    Quiz,
    #[command(description = "abandon the current quiz.")]
    Restart,
    #[command(description = "display this text.")]
    Help,
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Quiz].endpoint(quiz))
        .branch(case![Command::Restart].endpoint(restart))
        .branch(case![Command::Help].endpoint(help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(unknown_message));

    let callback_handler = Update::filter_callback_query().endpoint(button_pressed);

    dialogue::enter::<Update, ErasedStorage<State>, State, _>()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn send_card(bot: &Bot, chat_id: ChatId, card: Card) -> HandlerResult {
    bot.send_message(chat_id, card.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(card.keyboard)
        .await?;
    Ok(())
}

/// Drops whatever session the chat had, telling observers if one existed.
fn abandon(state: State, observers: &Observers) {
    let mut session = state.into_session();
    if session.phase() != Phase::Idle {
        QuizController::new(&mut session, observers).reset();
    }
}

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    state: State,
    msg: Message,
    bank: Arc<QuestionBank>,
    observers: Arc<Observers>,
) -> HandlerResult {
    abandon(state, &observers);
    send_card(&bot, msg.chat.id, render::welcome(bank.len())).await?;
    dialogue.update(State::Start).await?;
    Ok(())
}

async fn quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    state: State,
    msg: Message,
    bank: Arc<QuestionBank>,
    observers: Arc<Observers>,
) -> HandlerResult {
    abandon(state, &observers);

    let mut session = QuizSession::default();
    let reply = actions::apply(
        QuizAction::Begin,
        &mut session,
        &bank,
        &observers,
        &mut rand::thread_rng(),
    );
    if let Reply::Show(card) = reply {
        send_card(&bot, msg.chat.id, card).await?;
    }
    dialogue.update(State::from_session(session)).await?;
    Ok(())
}

async fn restart(
    bot: Bot,
    dialogue: QuizDialogue,
    state: State,
    msg: Message,
    bank: Arc<QuestionBank>,
    observers: Arc<Observers>,
) -> HandlerResult {
    if let State::Start = state {
        bot.send_message(msg.chat.id, actions::NO_QUIZ).await?;
        return Ok(());
    }
    abandon(state, &observers);
    send_card(&bot, msg.chat.id, render::welcome(bank.len())).await?;
    dialogue.update(State::Start).await?;
    Ok(())
}

async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

async fn unknown_message(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Please use the buttons under the quiz, or send /help.",
    )
    .await?;
    Ok(())
}

async fn button_pressed(
    bot: Bot,
    dialogue: QuizDialogue,
    state: State,
    q: CallbackQuery,
    bank: Arc<QuestionBank>,
    observers: Arc<Observers>,
) -> HandlerResult {
    let action = match q.data.as_deref().map(str::parse::<QuizAction>) {
        Some(Ok(action)) => action,
        _ => {
            warn!("Unrecognized callback data: {:?}", q.data);
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
    };
    let Some(message) = q.message else {
        debug!("Callback {} arrived without its message", action);
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let mut session = state.into_session();
    let reply = actions::apply(action, &mut session, &bank, &observers, &mut rand::thread_rng());

    match reply {
        Reply::Show(card) => {
            bot.answer_callback_query(q.id).await?;
            bot.edit_message_text(message.chat.id, message.id, card.text)
                .parse_mode(ParseMode::Html)
                .reply_markup(card.keyboard)
                .await?;
            dialogue.update(State::from_session(session)).await?;
        }
        Reply::Notice(text) => {
            bot.answer_callback_query(q.id).text(text).await?;
        }
        Reply::Ignore => {
            bot.answer_callback_query(q.id).await?;
        }
    }
    Ok(())
}
