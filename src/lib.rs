//! Telegram multiple-choice quiz: a pure session state machine in [`quiz`]
//! and the chat front end in [`bot`].

pub mod bot;
pub mod config;
pub mod quiz;
