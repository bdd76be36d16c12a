use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown nominee: {0}")]
    UnknownNominee(String),

    #[error("unknown prediction: {0}")]
    UnknownPrediction(String),

    #[error("admin access required: {0}")]
    NotAdmin(String),

    #[error("only the owner or an admin may manage prediction: {0}")]
    NotOwner(String),

    #[error("invalid pick: {0}")]
    InvalidPick(String),

    #[error("an e-mail identity is required")]
    MissingIdentity,

    #[error("prediction name must not be empty")]
    EmptyName,

    #[error("snapshot changed since it was loaded: {0}")]
    Conflict(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PoolError>;
