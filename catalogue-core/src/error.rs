use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Stop already exists: {0}")]
    DuplicateStop(String),
    #[error("Bus already exists: {0}")]
    DuplicateBus(String),
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    #[error("Bus {0} has no stops")]
    EmptyRoute(String),
    #[error("No road distance between {from} and {to}")]
    MissingDistance { from: String, to: String },
    #[error("Invalid vertex id: {0}")]
    InvalidVertex(usize),
    #[error("Routing settings are not configured")]
    RoutingNotConfigured,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
