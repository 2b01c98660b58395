//! # اعتبارسنج‌های پایه (Primitive Validators)
//!
//! توابع خالص `&str -> bool` که شکل رشته رو چک میکنن.
//! این توابع خطا نمیسازن؛ ساخت پیام خطا کار `rules` هست.

use once_cell::sync::Lazy;
use regex::Regex;

/// بازه‌های یونیکد خط فارسی/عربی
const PERSIAN_RANGES: [(char, char); 5] = [
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

static MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^09[0-9]{9}$").expect("Invalid regex pattern"));

static LANDLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[0-9]{2,}[0-9]{7,}$").expect("Invalid regex pattern"));

/// سریال شناسنامه: یک حرف فارسی (یا «الف») + `/` + دو رقم + فاصله + شش رقم
static NATIONAL_SERIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\x{0627}\x{0644}\x{0641}|[\x{0628}-\x{06CC}])/[0-9]{2}\s[0-9]{6}")
        .expect("Invalid regex pattern")
});

/// همه کاراکترها رقم ASCII هستن
///
/// رشته خالی `true` برمیگردونه.
///
/// ```rust
/// use university_records::validation::primitives::is_all_digits;
///
/// assert!(is_all_digits("12342"));
/// assert!(!is_all_digits("12a42"));
/// ```
#[must_use]
pub fn is_all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// حداقل یک کاراکتر عددی یونیکد (`char::is_numeric`)، یا کاراکتری که نه حرف/عدد هست نه فاصله
#[must_use]
pub fn has_special_or_digit(s: &str) -> bool {
    s.chars()
        .any(|c| c.is_numeric() || (!c.is_alphanumeric() && c != ' '))
}

/// حداقل یک کاراکتر غیر حرف/عدد (فاصله هم special حساب میشه)
#[must_use]
pub fn has_special(s: &str) -> bool {
    s.chars().any(|c| !c.is_alphanumeric())
}

/// رشته حداقل یک کاراکتر فارسی/عربی یا یک فاصله داره
///
/// این تست «وجود» هست نه «خلوص»: `"abc د"` هم قبول میشه.
#[must_use]
pub fn is_persian_script(s: &str) -> bool {
    s.chars().any(|c| {
        c == ' '
            || PERSIAN_RANGES
                .iter()
                .any(|&(start, end)| (start..=end).contains(&c))
    })
}

/// شماره موبایل ایران
///
/// `+` اول حذف میشه و پیش‌شماره کشور `98` به `0` تبدیل میشه.
///
/// ```rust
/// use university_records::validation::primitives::is_iranian_mobile;
///
/// assert!(is_iranian_mobile("09123456789"));
/// assert!(is_iranian_mobile("+989123456789"));
/// assert!(!is_iranian_mobile("08123456789"));
/// ```
#[must_use]
pub fn is_iranian_mobile(s: &str) -> bool {
    let number = s.strip_prefix('+').unwrap_or(s);

    match number.strip_prefix("98") {
        Some(rest) => MOBILE.is_match(&format!("0{rest}")),
        None => MOBILE.is_match(number),
    }
}

/// شماره تلفن ثابت: `0` و بعد حداقل ۹ رقم
#[must_use]
pub fn is_iranian_landline(s: &str) -> bool {
    LANDLINE.is_match(s)
}

/// کد ملی ایران با الگوریتم checksum
///
/// ```rust
/// use university_records::validation::primitives::is_valid_national_code;
///
/// assert!(is_valid_national_code("1850527296"));
/// assert!(!is_valid_national_code("1111111111"));
/// ```
#[must_use]
pub fn is_valid_national_code(s: &str) -> bool {
    if s.len() != 10 || !is_all_digits(s) {
        return false;
    }

    let digits: Vec<u32> = s.bytes().map(|b| u32::from(b - b'0')).collect();

    // همه ارقام یکسان (از جمله 0000000000)
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let sum: u32 = digits[..9]
        .iter()
        .zip((2..=10).rev())
        .map(|(d, weight)| d * weight)
        .sum();
    let remainder = sum % 11;
    let check = digits[9];

    if remainder < 2 {
        check == remainder
    } else {
        check == 11 - remainder
    }
}

/// سریال شناسنامه (مثلا `ب/12 123456`)
#[must_use]
pub fn is_national_serial(s: &str) -> bool {
    NATIONAL_SERIAL.is_match(s)
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_digits() {
        assert!(is_all_digits("0123456789"));
        assert!(is_all_digits(""));
        assert!(!is_all_digits("12 34"));
        assert!(!is_all_digits("۱۲۳"));
    }

    #[test]
    fn test_special_or_digit() {
        assert!(!has_special_or_digit("علی رضا"));
        assert!(has_special_or_digit("علی2"));
        assert!(has_special_or_digit("علی-رضا"));
        assert!(has_special_or_digit("علی۲"));
        // هر کاراکتر عددی یونیکد، حتی کسر و توان
        assert!(has_special_or_digit("علی½"));
        assert!(has_special_or_digit("علی²"));
    }

    #[test]
    fn test_special() {
        assert!(!has_special("12342"));
        assert!(has_special("123 42"));
        assert!(has_special("+98912"));
    }

    #[test]
    fn test_persian_presence_not_purity() {
        assert!(is_persian_script("احمد"));
        assert!(is_persian_script("abc د"));
        assert!(is_persian_script("john smith"));
        assert!(!is_persian_script("john"));
        assert!(!is_persian_script(""));
    }

    #[test]
    fn test_mobile() {
        assert!(is_iranian_mobile("09123456789"));
        assert!(is_iranian_mobile("+989123456789"));
        assert!(is_iranian_mobile("989123456789"));
        assert!(!is_iranian_mobile("08123456789"));
        assert!(!is_iranian_mobile("0912345678"));
        assert!(!is_iranian_mobile("091234567890"));
    }

    #[test]
    fn test_landline() {
        assert!(is_iranian_landline("0211234567"));
        assert!(is_iranian_landline("06633223358"));
        assert!(!is_iranian_landline("211234567"));
        assert!(!is_iranian_landline("02112345"));
        assert!(!is_iranian_landline("021-1234567"));
    }

    #[test]
    fn test_national_code() {
        assert!(is_valid_national_code("3966343916"));
        assert!(is_valid_national_code("1850527296"));
        assert!(is_valid_national_code("0084575948"));
        assert!(!is_valid_national_code("1234467890"));
        assert!(!is_valid_national_code("0000000000"));
        assert!(!is_valid_national_code("185052729"));
        assert!(!is_valid_national_code("18505272a6"));
    }

    #[test]
    fn test_national_serial() {
        assert!(is_national_serial("ب/12 123456"));
        assert!(is_national_serial("الف/12 123456"));
        assert!(!is_national_serial("b/12 123456"));
        assert!(!is_national_serial("ب/1 123456"));
        assert!(!is_national_serial("ب12 123456"));
    }
}
