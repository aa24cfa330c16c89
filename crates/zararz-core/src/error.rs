use thiserror::Error;

use crate::category::Category;

/// Invalid or missing environment configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {name} is not set")]
    Missing { name: &'static str },
    #[error("environment variable {name} has invalid value '{value}': expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Outcome classes of a failed upstream fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("API_URL is not set in environment variables")]
    ConfigurationMissing,
    #[error("API fetch failed: {0}")]
    Network(String),
    #[error("unexpected error while fetching prices: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "fetch.configuration_missing",
            Self::Network(_) => "fetch.network",
            Self::Unexpected(_) => "fetch.unexpected",
        }
    }
}

/// Reasons a successfully fetched body yields no prices for a category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("API response is missing the '{}' key or it is empty", .0.key())]
    CategoryMissing(Category),
    #[error("API response is not in expected format: {0}")]
    MalformedResponse(String),
}

/// Failures while reading or writing the user registry file.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("user registry io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("user registry serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
