use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] zararz_core::ConfigError),

    #[error(transparent)]
    Telegram(#[from] crate::telegram::TelegramError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Telegram(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
