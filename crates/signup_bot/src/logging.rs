use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use signup_core::ChatId;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise process logging. An explicit filter wins over the debug flag.
pub fn init_tracing(debug: bool, filter: Option<&str>) {
    let default_filter = if debug { "debug" } else { "info" };
    let filter = filter
        .and_then(|filter| EnvFilter::try_new(filter).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Append-only transcript of what users typed and what the bot answered.
pub struct TranscriptLog {
    path: Option<PathBuf>,
    file: Mutex<Option<File>>,
}

impl TranscriptLog {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path: Some(path),
            file: Mutex::new(Some(file)),
        })
    }

    /// A transcript that drops everything.
    pub fn disabled() -> Self {
        Self {
            path: None,
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log_user(&self, chat_id: ChatId, username: Option<&str>, message: &str) {
        self.write_line(&format!(
            "{} [USER] ChatID: {} | Username: {} | Message: {}",
            timestamp(),
            chat_id,
            username.unwrap_or_default(),
            message
        ));
    }

    pub fn log_bot(&self, chat_id: ChatId, response: &str) {
        self.write_line(&format!(
            "{} [BOT] ChatID: {} | Response: {}",
            timestamp(),
            chat_id,
            response
        ));
    }

    fn write_line(&self, line: &str) {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = guard.as_mut() {
            if let Err(error) = writeln!(file, "{line}") {
                tracing::warn!("Failed to write transcript line: {}", error);
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_user_and_bot_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("bot.log");
        let transcript = TranscriptLog::open(&path).unwrap();

        transcript.log_user(ChatId(7), Some("ali_h"), "/start");
        transcript.log_bot(ChatId(7), "welcome");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[USER] ChatID: 7 | Username: ali_h | Message: /start"));
        assert!(lines[1].ends_with("[BOT] ChatID: 7 | Response: welcome"));
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bot.log");

        TranscriptLog::open(&path).unwrap().log_bot(ChatId(1), "first");
        TranscriptLog::open(&path).unwrap().log_bot(ChatId(1), "second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_disabled_transcript_has_no_path() {
        let transcript = TranscriptLog::disabled();
        transcript.log_bot(ChatId(1), "dropped");
        assert!(transcript.path().is_none());
    }
}
