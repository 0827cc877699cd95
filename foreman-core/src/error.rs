use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForemanError {
    /// No entity matched the search
    NotFound { resource: String, search: String },
    /// More than one entity matched a search that must be unique
    Ambiguous {
        resource: String,
        search: String,
        count: usize,
    },
    /// A supplied value does not fit the setting's declared type
    TypeCoercion {
        name: String,
        value: String,
        settings_type: String,
    },
    /// The request never produced a response (DNS, TLS, timeout, ...)
    Transport { endpoint: String, context: String },
    /// The server answered with a non-success status
    Http {
        status: u16,
        endpoint: String,
        body: String,
    },
    Config(String),
    Serialization(String),
    Io(#[from] std::io::Error),
}

impl Display for ForemanError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ForemanError::NotFound { resource, search } => {
                write!(f, "Could not find {resource} '{search}'")
            }
            ForemanError::Ambiguous {
                resource,
                search,
                count,
            } => write!(
                f,
                "Found too many ({count}) results while searching for {resource} with {search}"
            ),
            ForemanError::TypeCoercion {
                name,
                value,
                settings_type,
            } => write!(
                f,
                "Value '{value}' for setting '{name}' is not a valid {settings_type}"
            ),
            ForemanError::Transport { endpoint, context } => {
                write!(f, "Network error talking to {endpoint}: {context}")
            }
            ForemanError::Http {
                status,
                endpoint,
                body,
            } => {
                write!(f, "Server returned {status} for {endpoint}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
            ForemanError::Config(s) => write!(f, "Configuration error: {s}"),
            ForemanError::Serialization(s) => write!(f, "Serialization error: {s}"),
            ForemanError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl ForemanError {
    /// Authentication and authorization failures come back as plain HTTP errors
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ForemanError::Http { status: 401 | 403, .. })
    }

    /// True when the failure was raised before anything was sent to the server
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ForemanError::TypeCoercion { .. }
                | ForemanError::Config(_)
                | ForemanError::Io(_)
        )
    }
}

impl From<serde_yaml_ng::Error> for ForemanError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ForemanError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ForemanError {
    fn from(err: serde_json::Error) -> Self {
        ForemanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForemanError>;
