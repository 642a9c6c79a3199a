use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty locator")]
    Empty,

    #[error("Unsupported xpath '{xpath}' at offset {offset}")]
    Unsupported { xpath: String, offset: usize },

    #[error("Unsupported predicate in '{0}'")]
    UnsupportedPredicate(String),

    #[error("Xpath '{0}' selects nothing expressible in css")]
    EmptySelector(String),
}
