use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use signup_core::{ChatId, Major, NewRegistration, Registration};

use crate::repository::{RegistrationRepository, StorageError, StorageResult};

const SELECT_COLUMNS: &str = "id, chat_id, username, name, phone, companions, major, \
     payment_transaction, student_id, created_at";

#[derive(Debug, Clone)]
pub struct SqliteRegistrationRepository {
    db_path: PathBuf,
}

impl SqliteRegistrationRepository {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_connection<T, F>(&self, func: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open_connection(&db_path)?;
            func(&connection)
        })
        .await
        .map_err(|error| StorageError::Task(error.to_string()))?
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepository {
    async fn init(&self) -> StorageResult<()> {
        self.with_connection(|connection| {
            connection.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    chat_id INTEGER NOT NULL,
                    username TEXT,
                    name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    companions INTEGER NOT NULL,
                    major TEXT NOT NULL,
                    payment_transaction TEXT NOT NULL,
                    student_id TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_users_chat_id ON users(chat_id);
                CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at);
                "#,
            )?;
            Ok(())
        })
        .await
    }

    async fn save(&self, registration: NewRegistration) -> StorageResult<Registration> {
        let created_at_str = format_timestamp(Utc::now());
        let created_at = parse_timestamp(&created_at_str)?;

        self.with_connection(move |connection| {
            connection.execute(
                r#"
                INSERT INTO users (
                    chat_id, username, name, phone, companions, major,
                    payment_transaction, student_id, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    registration.chat_id.0,
                    registration.submitter_handle,
                    registration.full_name,
                    registration.phone,
                    i64::from(registration.companion_count),
                    registration.major.as_str(),
                    registration.transaction_ref,
                    registration.student_id,
                    created_at_str,
                ],
            )?;
            let id = connection.last_insert_rowid();
            Ok(Registration::from_new(id, registration, created_at))
        })
        .await
    }

    async fn list_all(&self) -> StorageResult<Vec<Registration>> {
        self.with_connection(|connection| {
            let mut statement = connection.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = statement
                .query_map([], RawRegistration::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().map(RawRegistration::into_registration).collect()
        })
        .await
    }

}

/// Row as read from SQLite, before domain conversion.
struct RawRegistration {
    id: i64,
    chat_id: i64,
    username: Option<String>,
    name: String,
    phone: String,
    companions: i64,
    major: String,
    transaction: String,
    student_id: String,
    created_at: String,
}

impl RawRegistration {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            chat_id: row.get(1)?,
            username: row.get(2)?,
            name: row.get(3)?,
            phone: row.get(4)?,
            companions: row.get(5)?,
            major: row.get(6)?,
            transaction: row.get(7)?,
            student_id: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn into_registration(self) -> StorageResult<Registration> {
        let companion_count = u8::try_from(self.companions).map_err(|_| {
            StorageError::InvalidData(format!(
                "row {} has companion count {}",
                self.id, self.companions
            ))
        })?;
        let major: Major = self.major.parse().map_err(|_| {
            StorageError::InvalidData(format!("row {} has unknown major {:?}", self.id, self.major))
        })?;

        Ok(Registration {
            id: self.id,
            chat_id: ChatId(self.chat_id),
            submitter_handle: self.username,
            full_name: self.name,
            phone: self.phone,
            companion_count,
            major,
            student_id: self.student_id,
            transaction_ref: self.transaction,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn open_connection(path: &Path) -> StorageResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(path)?;
    connection.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        "#,
    )?;
    Ok(connection)
}

// Fixed width so that text order matches time order.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
