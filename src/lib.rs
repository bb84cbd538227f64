pub mod bot;
pub mod chatbot;
pub mod chunking;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod openai;
pub mod snow;

pub use bot::run;
