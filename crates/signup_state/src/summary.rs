use signup_core::texts::{SUMMARY_HEADER, SUMMARY_QUESTION};

use crate::draft::RegistrationDraft;

/// Review text shown with the confirm/cancel buttons.
pub fn format_summary(draft: &RegistrationDraft) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    format!(
        "{SUMMARY_HEADER}\n\
         👤 نام: {}\n\
         📞 شماره تلفن: {}\n\
         👥 نفرات همراه: {}\n\
         🎓 رشته تحصیلی: {}\n\
         🆔 شماره دانشجویی: {}\n\
         💳 شماره تراکنش: {}\n\n\
         {SUMMARY_QUESTION}",
        text(&draft.full_name),
        text(&draft.phone),
        draft.companion_count.unwrap_or_default(),
        draft.major.map(|major| major.as_str()).unwrap_or_default(),
        text(&draft.student_id),
        text(&draft.transaction_ref),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use signup_core::Major;

    #[test]
    fn test_summary_lists_every_field_in_form_order() {
        let draft = RegistrationDraft {
            full_name: Some("Ali Hosseini".into()),
            phone: Some("09123456789".into()),
            companion_count: Some(2),
            major: Some(Major::Computer),
            student_id: Some("4001234567".into()),
            transaction_ref: Some("123456".into()),
        };

        let summary = format_summary(&draft);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], SUMMARY_HEADER);
        assert_eq!(lines[1], "👤 نام: Ali Hosseini");
        assert_eq!(lines[2], "📞 شماره تلفن: 09123456789");
        assert_eq!(lines[3], "👥 نفرات همراه: 2");
        assert_eq!(lines[4], "🎓 رشته تحصیلی: کامپیوتر");
        assert_eq!(lines[5], "🆔 شماره دانشجویی: 4001234567");
        assert_eq!(lines[6], "💳 شماره تراکنش: 123456");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], SUMMARY_QUESTION);
    }
}
