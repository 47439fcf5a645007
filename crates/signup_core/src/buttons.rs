//! Button tags - the fixed vocabulary of selections a user can click
//!
//! Button-driven fields (companion count, major, confirmation) are never
//! typed; the set of tags offered on a keyboard is their validation.

use serde::{Deserialize, Serialize};

use crate::registration::Major;
use crate::validation::{validate_companions, validate_major, MAX_COMPANIONS};

const COMPANIONS_PREFIX: &str = "companions_";
const MAJOR_PREFIX: &str = "major_";
const CONFIRM: &str = "confirm";
const CANCEL: &str = "cancel";

const COMPANION_LABELS: [&str; 6] = ["0️⃣", "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣"];

/// A parsed button click.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTag {
    Companions(u8),
    Major(Major),
    Confirm,
    Cancel,
}

impl ButtonTag {
    /// Parse the callback data surfaced by the transport.
    ///
    /// Companion counts and majors go through their field validators;
    /// anything they reject, or anything outside the vocabulary, is `None`.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CONFIRM => return Some(Self::Confirm),
            CANCEL => return Some(Self::Cancel),
            _ => {}
        }

        let tag = if let Some(count) = data.strip_prefix(COMPANIONS_PREFIX) {
            let count = validate_companions(count.parse().ok()?).ok()?;
            Self::Companions(count)
        } else if let Some(major) = data.strip_prefix(MAJOR_PREFIX) {
            Self::Major(validate_major(major).ok()?)
        } else {
            return None;
        };

        // Only the exact tags the keyboards emit, so "companions_02" is out.
        (tag.data() == data).then_some(tag)
    }

    /// The callback data string for this tag.
    pub fn data(&self) -> String {
        match self {
            Self::Companions(count) => format!("{COMPANIONS_PREFIX}{count}"),
            Self::Major(major) => format!("{MAJOR_PREFIX}{}", major.as_str()),
            Self::Confirm => CONFIRM.to_string(),
            Self::Cancel => CANCEL.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, tag: ButtonTag) -> Self {
        Self {
            label: label.into(),
            data: tag.data(),
        }
    }
}

/// Inline keyboard attached to an outbound message, row by row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn single_row(buttons: Vec<Button>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    pub fn companions() -> Self {
        Self::single_row(
            (0..=MAX_COMPANIONS)
                .map(|count| {
                    Button::new(COMPANION_LABELS[count as usize], ButtonTag::Companions(count))
                })
                .collect(),
        )
    }

    pub fn majors() -> Self {
        Self::single_row(
            Major::ALL
                .into_iter()
                .map(|major| Button::new(major.label(), ButtonTag::Major(major)))
                .collect(),
        )
    }

    pub fn confirmation() -> Self {
        Self::single_row(vec![
            Button::new("✅ تایید", ButtonTag::Confirm),
            Button::new("❌ انصراف", ButtonTag::Cancel),
        ])
    }

    pub fn tags(&self) -> impl Iterator<Item = ButtonTag> + '_ {
        self.rows
            .iter()
            .flatten()
            .filter_map(|button| ButtonTag::parse(&button.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_the_fixed_vocabulary() {
        assert_eq!(ButtonTag::parse("companions_0"), Some(ButtonTag::Companions(0)));
        assert_eq!(ButtonTag::parse("companions_5"), Some(ButtonTag::Companions(5)));
        assert_eq!(
            ButtonTag::parse("major_کامپیوتر"),
            Some(ButtonTag::Major(Major::Computer))
        );
        assert_eq!(ButtonTag::parse("major_برق"), Some(ButtonTag::Major(Major::Electrical)));
        assert_eq!(ButtonTag::parse("confirm"), Some(ButtonTag::Confirm));
        assert_eq!(ButtonTag::parse("cancel"), Some(ButtonTag::Cancel));
    }

    #[test]
    fn test_rejects_tags_outside_the_vocabulary() {
        for data in [
            "companions_6",
            "companions_-1",
            "companions_02",
            "companions_+1",
            "companions_",
            "major_ریاضی",
            "major_ برق",
            "CONFIRM",
            "",
        ] {
            assert_eq!(ButtonTag::parse(data), None, "{data}");
        }
    }

    #[test]
    fn test_parsing_agrees_with_field_validators() {
        for count in -2..=9 {
            assert_eq!(
                ButtonTag::parse(&format!("companions_{count}")).is_some(),
                validate_companions(count).is_ok(),
                "companions_{count}"
            );
        }
        for major in ["کامپیوتر", "برق", "ریاضی", "computer"] {
            assert_eq!(
                ButtonTag::parse(&format!("major_{major}")).is_some(),
                validate_major(major).is_ok(),
                "major_{major}"
            );
        }
    }

    #[test]
    fn test_keyboards_only_offer_parseable_tags() {
        let companions: Vec<_> = Keyboard::companions().tags().collect();
        assert_eq!(companions.len(), 6);
        assert_eq!(companions[2], ButtonTag::Companions(2));

        let majors: Vec<_> = Keyboard::majors().tags().collect();
        assert_eq!(majors, vec![ButtonTag::Major(Major::Computer), ButtonTag::Major(Major::Electrical)]);

        let confirmation: Vec<_> = Keyboard::confirmation().tags().collect();
        assert_eq!(confirmation, vec![ButtonTag::Confirm, ButtonTag::Cancel]);
    }

    #[test]
    fn test_data_round_trips() {
        let tag = ButtonTag::Major(Major::Electrical);
        assert_eq!(ButtonTag::parse(&tag.data()), Some(tag));
    }
}
