use axum::http::StatusCode;

/// Terminal failures of an extraction request.
///
/// The display text is the line reported to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The env file holding the deploy secret does not exist.
    #[error("Error: .env file not found!")]
    ConfigMissing,

    /// The env file exists but could not be read or parsed.
    #[error("Error: .env file could not be read!")]
    ConfigUnreadable(#[source] dotenvy::Error),

    #[error("Invalid deploy token!")]
    InvalidToken,

    #[error("Zip file not found!")]
    ArchiveNotFound,

    #[error("Failed to open zip file!")]
    ArchiveOpen(#[source] zip::result::ZipError),

    #[error("Failed to create directory.")]
    CreateDir(#[source] std::io::Error),

    /// Writing an entry failed, or an entry was rejected.
    #[error("Failed to extract zip file: {0}")]
    Extract(String),

    /// Extraction succeeded but the archive could not be removed.
    #[error("Failed to remove zip file: {0}")]
    Cleanup(#[source] std::io::Error),
}

impl ExtractError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::ArchiveNotFound => StatusCode::NOT_FOUND,
            Self::ArchiveOpen(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ConfigMissing
            | Self::ConfigUnreadable(_)
            | Self::CreateDir(_)
            | Self::Extract(_)
            | Self::Cleanup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
