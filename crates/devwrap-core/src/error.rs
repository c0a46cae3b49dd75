use thiserror::Error;

/// Why a share link could not be turned back into a payload.
///
/// Every variant means "no reconstructable state": callers fall back to the
/// interactive input phase rather than surfacing a fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("share link is missing `{0}`")]
    MissingField(&'static str),

    #[error("share link field `{field}` is not an integer: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("share link has an empty `github` handle")]
    EmptyHandle,
}
