//! The registration under construction.

use serde::{Deserialize, Serialize};
use signup_core::{ChatId, Major, NewRegistration};

/// Fields collected so far. Each one is only ever written by the step that
/// owns it, after its validator accepted the input.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub companion_count: Option<u8>,
    pub major: Option<Major>,
    pub student_id: Option<String>,
    pub transaction_ref: Option<String>,
}

impl RegistrationDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the record to persist. `None` until every field is present.
    pub fn to_new_registration(&self, chat_id: ChatId) -> Option<NewRegistration> {
        Some(NewRegistration {
            chat_id,
            submitter_handle: None,
            full_name: self.full_name.clone()?,
            phone: self.phone.clone()?,
            companion_count: self.companion_count?,
            major: self.major?,
            student_id: self.student_id.clone()?,
            transaction_ref: self.transaction_ref.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RegistrationDraft {
        RegistrationDraft {
            full_name: Some("Ali Hosseini".into()),
            phone: Some("09123456789".into()),
            companion_count: Some(2),
            major: Some(Major::Computer),
            student_id: Some("4001234567".into()),
            transaction_ref: Some("123456".into()),
        }
    }

    #[test]
    fn test_default_draft_is_empty() {
        assert!(RegistrationDraft::default().is_empty());
        assert!(!complete().is_empty());
    }

    #[test]
    fn test_incomplete_draft_cannot_be_finalized() {
        let mut draft = complete();
        draft.major = None;
        assert!(draft.to_new_registration(ChatId(1)).is_none());
    }

    #[test]
    fn test_complete_draft_carries_every_field() {
        let new = complete().to_new_registration(ChatId(7)).unwrap();
        assert_eq!(new.chat_id, ChatId(7));
        assert_eq!(new.full_name, "Ali Hosseini");
        assert_eq!(new.companion_count, 2);
        assert_eq!(new.major, Major::Computer);
        assert_eq!(new.submitter_handle, None);
    }
}
