//! Field validators.
//!
//! Every validator takes the trimmed text for exactly one field and either
//! returns the normalized value or the error kind for that field. They hold no
//! state and never look at the session.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::registration::Major;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub const NAME_MIN_CHARS: usize = 5;
pub const NAME_MAX_CHARS: usize = 50;
pub const PHONE_PREFIX: &str = "09";
pub const PHONE_DIGITS: usize = 11;
pub const MAX_COMPANIONS: u8 = 5;
pub const STUDENT_ID_MIN_DIGITS: usize = 10;
pub const STUDENT_ID_MAX_DIGITS: usize = 15;
pub const TRANSACTION_MIN_DIGITS: usize = 5;
pub const TRANSACTION_MAX_DIGITS: usize = 20;

// Arabic script (Persian letters included) or Latin letters, plus space.
static NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Arabic}A-Za-z ]+$").expect("name charset pattern is valid"));

/// Error kinds for field validation. The display text is what the user sees.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("نام باید حداقل ۵ حرف داشته باشد")]
    NameTooShort,

    #[error("نام نباید بیش از 50 حرف باشد")]
    NameTooLong,

    #[error("نام فقط می‌تواند شامل حروف فارسی باشد و باید شامل نام و نام خانوادگی باشد ")]
    InvalidName,

    #[error("شماره تلفن نامعتبر است و باید با ۰۹ شروع شود و ۱۱ رقم باشد")]
    InvalidPhone,

    #[error("تعداد نفرات همراه باید بین ۰ تا ۵ باشد")]
    InvalidCompanions,

    #[error("رشته تحصیلی فقط می‌تواند کامپیوتر یا برق باشد")]
    InvalidMajor,

    #[error("شماره دانشجویی باید شامل ۱۰ تا ۱۵ رقم باشد")]
    InvalidStudentId,

    #[error("شماره دانشجویی نباید بیش از 15 رقم باشد")]
    StudentIdTooLong,

    #[error("شماره رهگیری پرداخت باید شامل 5 تا 20 رقم باشد و فقط عدد باشد")]
    InvalidTransaction,
}

fn is_ascii_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Full name: 5..=50 characters, at least two tokens, letters and spaces only.
pub fn validate_full_name(text: &str) -> ValidationResult<String> {
    let name = text.trim();
    let length = name.chars().count();
    if length < NAME_MIN_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if length > NAME_MAX_CHARS {
        return Err(ValidationError::NameTooLong);
    }
    if !name.contains(' ') {
        return Err(ValidationError::InvalidName);
    }
    if !NAME_CHARSET.is_match(name) {
        return Err(ValidationError::InvalidName);
    }
    Ok(name.to_string())
}

/// Phone: eleven ASCII digits starting with `09`.
pub fn validate_phone(text: &str) -> ValidationResult<String> {
    let phone = text.trim();
    if phone.len() != PHONE_DIGITS || !phone.starts_with(PHONE_PREFIX) || !is_ascii_digits(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(phone.to_string())
}

pub fn validate_companions(count: i64) -> ValidationResult<u8> {
    if !(0..=i64::from(MAX_COMPANIONS)).contains(&count) {
        return Err(ValidationError::InvalidCompanions);
    }
    Ok(count as u8)
}

pub fn validate_major(text: &str) -> ValidationResult<Major> {
    let text = text.trim();
    Major::ALL
        .into_iter()
        .find(|major| major.as_str() == text)
        .ok_or(ValidationError::InvalidMajor)
}

/// Student id: 10..=15 ASCII digits.
pub fn validate_student_id(text: &str) -> ValidationResult<String> {
    let id = text.trim();
    if !is_ascii_digits(id) || id.len() < STUDENT_ID_MIN_DIGITS {
        return Err(ValidationError::InvalidStudentId);
    }
    if id.len() > STUDENT_ID_MAX_DIGITS {
        return Err(ValidationError::StudentIdTooLong);
    }
    Ok(id.to_string())
}

/// Payment transaction reference: 5..=20 ASCII digits.
pub fn validate_transaction_ref(text: &str) -> ValidationResult<String> {
    let reference = text.trim();
    if !is_ascii_digits(reference)
        || !(TRANSACTION_MIN_DIGITS..=TRANSACTION_MAX_DIGITS).contains(&reference.len())
    {
        return Err(ValidationError::InvalidTransaction);
    }
    Ok(reference.to_string())
}
