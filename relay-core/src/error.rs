use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl BotError {
    /// Variant name, used as the error classification in log records.
    pub fn name(&self) -> &'static str {
        match self {
            BotError::Transport(_) => "Transport",
            BotError::Handler(_) => "Handler",
            BotError::Config(_) => "Config",
            BotError::Io(_) => "Io",
            BotError::Other(_) => "Other",
        }
    }
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Empty content")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, BotError>;
