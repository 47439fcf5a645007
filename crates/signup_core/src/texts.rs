//! Fixed user-facing texts.
//!
//! `STEP_MESSAGES` is indexed by step number: 0 is the welcome, 1..=6 ask for
//! a field, 7 heads the confirmation, 8 is the success message and 9 answers
//! any input after a completed registration.

pub const STEP_MESSAGES: [&str; 10] = [
    "🎉 سلام! به ربات ثبت نام جشن فارغ‌التحصیلی خوش آمدید.",
    "✏️ لطفاً نام و نام خانوادگی خود را وارد کنید.",
    "📞 لطفاً شماره تلفن خود را وارد کنید.",
    "👥 تعداد نفرات همراه خود را وارد کنید.",
    "🎓 رشته تحصیلی خود را وارد کنید.",
    "🆔 شماره دانشجویی خود را وارد کنید.",
    "💳 شماره تراکنش پرداخت خود را وارد کنید.",
    "✅ لطفاً اطلاعات خود را تأیید کنید.",
    "🎊 ثبت نام شما با موفقیت انجام شد. ممنون!",
    "👏 کاربر گرامی، اطلاعات شما با موفقیت ثبت شد. در صورت نیاز به ثبت اطلاعات جدید، لطفاً بات را با دستور /start دوباره راه‌اندازی کنید.",
];

pub const WELCOME: &str = STEP_MESSAGES[0];
pub const REGISTERED: &str = STEP_MESSAGES[8];
pub const ALREADY_REGISTERED: &str = STEP_MESSAGES[9];

// Acknowledgements after a field is stored.
pub const ACK_FULL_NAME: &str = "✅ نام شما با موفقیت ثبت شد.";
pub const ACK_PHONE: &str = "✅ شماره تلفن با موفقیت ثبت شد.";
pub const ACK_COMPANIONS: &str = "👥 تعداد نفرات همراه ثبت شد.";
pub const ACK_MAJOR: &str = "🎓 رشته تحصیلی ثبت شد.";
pub const ACK_STUDENT_ID: &str = "🆔 شماره دانشجویی ثبت شد.";

pub const SUMMARY_HEADER: &str = "📋 لطفاً اطلاعات خود را بررسی کنید:";
pub const SUMMARY_QUESTION: &str = "✅ آیا اطلاعات صحیح است؟";

pub const CANCELLED: &str =
    "❌ اطلاعات پاک شد. لطفاً دوباره نام و نام خانوادگی خود را وارد کنید.";
pub const SAVE_FAILED: &str = "⚠️ خطا در ذخیره اطلاعات. لطفاً دوباره تلاش کنید.";
pub const RESTART_REQUIRED: &str = "⚠️ خطا: لطفا ربات دوباره راه اندازی کنید با /start";

/// Prefix put in front of a validation error before it is sent.
pub const ERROR_PREFIX: &str = "❌ ";

// Export gate.
pub const ASK_PASSWORD: &str = "🔑 لطفاً رمز عبور را وارد کنید:";
pub const WRONG_PASSWORD: &str = "❌ رمز عبور اشتباه است";
pub const EXPORT_FETCH_FAILED: &str = "❌ خطا در دریافت اطلاعات کاربران";
pub const EXPORT_RENDER_FAILED: &str = "❌ خطا در ایجاد فایل اکسل";
pub const EXPORT_SENT: &str = "✅ فایل اکسل کاربران ارسال شد.";

pub fn export_record_count(count: usize) -> String {
    format!("تعداد رکورد: {count}")
}

pub fn validation_error(error: &impl std::fmt::Display) -> String {
    format!("{ERROR_PREFIX}{error}")
}
