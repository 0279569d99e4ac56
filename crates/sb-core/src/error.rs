use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid descriptor for `{activity}`: {message}")]
    InvalidDescriptor { activity: String, message: String },
    #[error("cannot synthesize a type token for parameter `{param}` of `{activity}` (type `{ty}`): {reason}")]
    UnsupportedType {
        activity: String,
        param: String,
        ty: String,
        reason: String,
    },
    #[error("duplicate signature in `{activity}`: {method}({signature})")]
    DuplicateSignature {
        activity: String,
        method: String,
        signature: String,
    },
    #[error("cannot parse type `{input}`: {message}")]
    TypeParse { input: String, message: String },
    #[error("Generic error: {0}")]
    Generic(String),
}

impl Error {
    pub fn invalid_descriptor(activity: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidDescriptor {
            activity: activity.into(),
            message: message.into(),
        }
    }

    pub fn type_parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TypeParse {
            input: input.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
