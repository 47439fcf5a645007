pub mod export;
pub mod repository;
pub mod sqlite;

pub use export::{export_row, ExportRenderer, XlsxExportRenderer};
pub use repository::{RegistrationRepository, StorageError, StorageResult};
pub use sqlite::SqliteRegistrationRepository;
