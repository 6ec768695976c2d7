use std::sync::Arc;

use dotenv::dotenv;
use log::{error, info, warn};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    utils::command::BotCommands,
};
use vikings_quiz_bot::{
    bot::{self, Command, State},
    config::Config,
    quiz::{
        events::{LogObserver, Observers, QuizObserver},
        QuestionBank,
    },
};

type UserInfoStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    // A missing .env is fine, the variables may come from the environment
    let dotenv_loaded = dotenv().is_ok();

    pretty_env_logger::init();
    log::info!("Starting quiz bot...");
    if !dotenv_loaded {
        log::debug!("No .env file found, using the process environment");
    }

    if let Err(err) = run().await {
        error!("Quiz bot stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let bank = match &config.bank_path {
        Some(path) => {
            info!("Loading question bank from {}", path.display());
            QuestionBank::from_path(path)?
        }
        None => QuestionBank::builtin(),
    };
    info!("Question bank ready with {} questions", bank.len());

    let mut hooks: Vec<Arc<dyn QuizObserver>> = Vec::new();
    if config.event_log {
        hooks.push(Arc::new(LogObserver));
    } else {
        warn!("Quiz event logging is switched off");
    }
    let observers = Arc::new(Observers::new(hooks));
    info!("{} quiz observer(s) registered", observers.len());

    let bot = Bot::from_env();
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        // The menu is a convenience, the commands work without it
        warn!("Failed to register bot commands: {}", err);
    }

    let storage: UserInfoStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![storage, Arc::new(bank), observers])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Quiz bot shut down");
    Ok(())
}
