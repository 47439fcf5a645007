//! Password gate in front of the registration export.
//!
//! The gate is a per-chat flag kept apart from the form sessions: raising it
//! does not touch a chat's form progress and restarting the form does not
//! lower it. While raised, typed text is taken as a password attempt.

use dashmap::DashSet;
use sha2::{Digest, Sha256};
use signup_core::ChatId;

use crate::error::{BotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAttempt {
    /// Password matched; the gate is lowered.
    Granted,
    /// Wrong password; the gate stays raised.
    Denied,
    /// The chat was not waiting for a password.
    NotRaised,
}

#[derive(Debug)]
pub struct ExportGate {
    salt: String,
    digest: String,
    waiting: DashSet<ChatId>,
}

impl ExportGate {
    /// `digest` is the lowercase or uppercase hex SHA-256 of `salt` followed
    /// by the password.
    pub fn new(salt: impl Into<String>, digest: &str) -> Result<Self> {
        let digest = digest.trim().to_ascii_lowercase();
        let valid = digest.len() == 64 && hex::decode(&digest).is_ok();
        if !valid {
            return Err(BotError::Config(
                "export password digest must be 64 hex characters (SHA-256)".to_string(),
            ));
        }

        Ok(Self {
            salt: salt.into(),
            digest,
            waiting: DashSet::new(),
        })
    }

    pub fn raise(&self, chat_id: ChatId) {
        self.waiting.insert(chat_id);
    }

    pub fn is_raised(&self, chat_id: ChatId) -> bool {
        self.waiting.contains(&chat_id)
    }

    /// Check a password attempt. There is no limit on attempts.
    pub fn attempt(&self, chat_id: ChatId, password: &str) -> GateAttempt {
        if !self.is_raised(chat_id) {
            return GateAttempt::NotRaised;
        }
        if hash_password(&self.salt, password) != self.digest {
            return GateAttempt::Denied;
        }
        self.waiting.remove(&chat_id);
        GateAttempt::Granted
    }
}

/// Lowercase hex SHA-256 of `salt || password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256 of "password".
    const PASSWORD_DIGEST: &str =
        "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

    #[test]
    fn test_hash_matches_known_sha256() {
        assert_eq!(hash_password("", "password"), PASSWORD_DIGEST);
        assert_ne!(hash_password("pepper", "password"), PASSWORD_DIGEST);
    }

    #[test]
    fn test_rejects_malformed_digest() {
        assert!(ExportGate::new("", "not-a-digest").is_err());
        assert!(ExportGate::new("", &PASSWORD_DIGEST[..63]).is_err());
        assert!(ExportGate::new("", &PASSWORD_DIGEST.to_uppercase()).is_ok());
    }

    #[test]
    fn test_wrong_password_keeps_gate_raised() {
        let gate = ExportGate::new("", PASSWORD_DIGEST).unwrap();
        gate.raise(ChatId(1));

        for _ in 0..5 {
            assert_eq!(gate.attempt(ChatId(1), "letmein"), GateAttempt::Denied);
        }
        assert!(gate.is_raised(ChatId(1)));
    }

    #[test]
    fn test_right_password_lowers_gate_once() {
        let gate = ExportGate::new("", PASSWORD_DIGEST).unwrap();
        gate.raise(ChatId(1));

        assert_eq!(gate.attempt(ChatId(1), "password"), GateAttempt::Granted);
        assert!(!gate.is_raised(ChatId(1)));
        assert_eq!(gate.attempt(ChatId(1), "password"), GateAttempt::NotRaised);
    }

    #[test]
    fn test_salted_digest_requires_the_salt() {
        let digest = hash_password("s3", "hunter2");
        let gate = ExportGate::new("s3", &digest).unwrap();
        gate.raise(ChatId(2));
        assert_eq!(gate.attempt(ChatId(2), "s3hunter2"), GateAttempt::Denied);
        assert_eq!(gate.attempt(ChatId(2), "hunter2"), GateAttempt::Granted);
    }

    #[test]
    fn test_gates_are_per_chat() {
        let gate = ExportGate::new("", PASSWORD_DIGEST).unwrap();
        gate.raise(ChatId(1));
        assert!(!gate.is_raised(ChatId(2)));
        assert_eq!(gate.attempt(ChatId(2), "password"), GateAttempt::NotRaised);
    }
}
