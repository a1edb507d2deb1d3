use thiserror::Error;

#[derive(Debug, Error)]
pub enum StandardsError {
    /// A four-character code that does not name any known revision.
    ///
    /// Distinct from an absent code: the caller decides what absence means.
    #[error("unrecognized standard code: {code}")]
    UnknownCode { code: String },
}

pub type Result<T> = std::result::Result<T, StandardsError>;
