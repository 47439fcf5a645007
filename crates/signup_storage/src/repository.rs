use async_trait::async_trait;
use signup_core::{NewRegistration, Registration};
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("time parse error: {0}")]
    Chrono(#[from] chrono::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("storage task join error: {0}")]
    Task(String),

    #[error("invalid registration data: {0}")]
    InvalidData(String),
}

/// Durable store of confirmed registrations.
///
/// Records are append-only: nothing in the bot updates or deletes a
/// registration once saved.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn init(&self) -> StorageResult<()>;

    /// Persist one confirmed registration and return it with its id and
    /// server-assigned creation time.
    async fn save(&self, registration: NewRegistration) -> StorageResult<Registration>;

    /// Every registration, newest first.
    async fn list_all(&self) -> StorageResult<Vec<Registration>>;
}
