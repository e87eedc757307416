#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid cell key: {0}")]
    MalformedKey(String),

    #[error("Unknown season: {0}")]
    UnknownSeason(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}
