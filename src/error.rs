use reqwest::Error as ReqwestError;
use std::error::Error as StdError;
use std::fmt;

/// Kind of the failure, the same for the whole group of errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input has an error or is invalid.
    ValueInvalid,
    /// The resource was not found.
    ResourceNotFound,
    /// The server couldn't be reached.
    Network,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::ValueInvalid => write!(f, "Value:invalid"),
            ErrorKind::ResourceNotFound => write!(f, "Resource:not found"),
            ErrorKind::Network => write!(f, "Network"),
        }
    }
}

/// The Errors wrapper that may occur.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A field of the input is invalid.
    ValueInvalid {
        field: &'static str,
        message: String,
    },
    /// A named resource was not found.
    ResourceNotFound {
        field: &'static str,
        message: String,
    },
    /// The request didn't reach the server.
    NetworkError(ReqwestError),
}

impl Error {
    /// Creates an error about an invalid input field.
    pub fn value_invalid(field: &'static str, message: impl Into<String>) -> Self {
        Error::ValueInvalid {
            field,
            message: message.into(),
        }
    }

    /// Creates an error about a missing resource.
    pub fn resource_not_found(field: &'static str, message: impl Into<String>) -> Self {
        Error::ResourceNotFound {
            field,
            message: message.into(),
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::ValueInvalid { .. } => ErrorKind::ValueInvalid,
            Error::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            Error::NetworkError(_) => ErrorKind::Network,
        }
    }

    /// Returns the name of the input field or resource the error is about.
    pub fn field(&self) -> &str {
        match *self {
            Error::ValueInvalid { field, .. } => field,
            Error::ResourceNotFound { field, .. } => field,
            Error::NetworkError(_) => "",
        }
    }

    /// Returns the message shown to the user.
    pub fn message(&self) -> &str {
        match *self {
            Error::ValueInvalid { ref message, .. } => message.as_str(),
            Error::ResourceNotFound { ref message, .. } => message.as_str(),
            Error::NetworkError(_) => "Network connection fail",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ValueInvalid { field, .. } => {
                debug!("invalid value of {}", field);
            }
            Error::ResourceNotFound { field, .. } => {
                debug!("{} not found", field);
            }
            Error::NetworkError(ref e) => {
                error!("{}", e);
            }
        }
        write!(f, "{}", self.message())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::NetworkError(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReqwestError> for Error {
    fn from(error: ReqwestError) -> Error {
        Error::NetworkError(error)
    }
}
