//! Error types and handling for the itinerary planner

use thiserror::Error;

/// Main error type for the itinerary planner
#[derive(Error, Debug)]
pub enum ItineraryError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Language model API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl ItineraryError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ItineraryError::Config { .. } => {
                "The planner is not configured correctly. Please check the language model settings."
                    .to_string()
            }
            ItineraryError::Api { .. } => {
                "The travel planning service is unavailable right now. Please try again later."
                    .to_string()
            }
            ItineraryError::Validation { message } => message.clone(),
            ItineraryError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ItineraryError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ItineraryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ItineraryError::api(format!("request timed out: {err}"))
        } else if err.is_decode() {
            ItineraryError::api(format!("invalid response body: {err}"))
        } else {
            ItineraryError::api(format!("request failed: {err}"))
        }
    }
}
