//! # قوانین فیلدها (Field Rules)
//!
//! هر فیلد یک `Rule` داره و هر entity یک جدول مرتب از `FieldRule`.
//! ترتیب جدول همون ترتیب اعتبارسنجیه و اولین قانونی که fail بشه گزارش میشه.
//!
//! ## مفاهیم Rust:
//! - **Enum dispatch**: به جای reflection، هر قانون یک variant هست
//! - **Static tables**: `&'static [FieldRule]` در زمان کامپایل ساخته میشن
//! - **Lazy statics**: لیست شهرها و دانشکده‌ها یک بار ساخته میشن

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::primitives::{
    has_special, has_special_or_digit, is_all_digits, is_iranian_landline, is_iranian_mobile,
    is_national_serial, is_persian_script, is_valid_national_code,
};
use crate::database::Document;
use crate::error::{AppError, Result};
use crate::utils::current_jalali_year;

// =====================================
// Enumerations
// =====================================

/// شهرهای مجاز برای محل تولد
pub const CITIES: &[&str] = &[
    "اراک",
    "اردبیل",
    "تبریز",
    "اصفهان",
    "اهواز",
    "ایلام",
    "بجنورد",
    "بندرعباس",
    "بوشهر",
    "بیرجند",
    "ارومیه",
    "تهران",
    "خرم آباد",
    "رشت",
    "زاهدان",
    "زنجان",
    "ساری",
    "سمنان",
    "سنندج",
    "شهرکرد",
    "شیراز",
    "قزوین",
    "قم",
    "کرج",
    "کرمان",
    "کرمانشاه",
    "گرگان",
    "مشهد",
    "همدان",
    "یاسوج",
    "یزد",
];

/// دانشکده‌ها
pub const DEPARTMENTS: &[&str] = &[
    "فنی و مهندسی",
    "علوم پایه",
    "ادبیات و علوم انسانی",
    "مدیریت و اقتصاد",
    "کشاورزی",
    "منابع طبیعی",
    "دامپزشکی",
    "شیمی",
];

/// رشته‌ها
pub const MAJORS: &[&str] = &[
    "مهندسی کامپیوتر",
    "مهندسی برق الکترونیک",
    "مهندسی برق قدرت",
    "مهندسی مکانیک و پلیمر",
    "مهندسی معدن",
    "مهندسی عمران",
    "مهندسی شهرسازی",
];

static CITY_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| CITIES.iter().copied().collect());
static DEPARTMENT_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DEPARTMENTS.iter().copied().collect());
static MAJOR_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| MAJORS.iter().copied().collect());

static DEPARTMENT_MESSAGE: Lazy<String> = Lazy::new(|| {
    format!(
        "Department must be one of the following: {}",
        quoted_list(DEPARTMENTS)
    )
});

static MAJOR_MESSAGE: Lazy<String> = Lazy::new(|| {
    format!(
        "Major must be one of the following : {}",
        quoted_list(MAJORS)
    )
});

/// `['a', 'b']`
fn quoted_list(items: &[&str]) -> String {
    let inner = items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

// =====================================
// Rule Context
// =====================================
/// مقادیری که قوانین از محیط میگیرن
///
/// سال جاری شمسی اینجا نگه داشته میشه تا تست‌ها بتونن ثابتش کنن.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    pub current_year: i32,
}

impl RuleContext {
    /// context با سال جاری شمسی
    #[must_use]
    pub fn current() -> Self {
        Self {
            current_year: current_jalali_year(),
        }
    }

    /// context با سال مشخص (برای تست)
    #[must_use]
    pub fn with_year(current_year: i32) -> Self {
        Self { current_year }
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::current()
    }
}

// =====================================
// Rule
// =====================================
/// دسته‌بندی فیلدها بر اساس قانون اعتبارسنجی
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    PersonalName,
    CourseName,
    StudentId,
    LecturerId,
    CourseId,
    Credit,
    BirthDate,
    NationalSerial,
    BornCity,
    Address,
    PostalCode,
    MobilePhone,
    Landline,
    Department,
    Major,
    NationalCode,
}

/// قانون یک فیلد
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
}

impl FieldRule {
    #[must_use]
    pub const fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }
}

fn fail(message: impl Into<String>) -> Result<()> {
    Err(AppError::bad_input(message))
}

/// طول بر حسب کاراکتر، نه بایت
fn char_len(value: &str) -> usize {
    value.chars().count()
}

impl Rule {
    /// اعمال قانون روی مقدار
    ///
    /// # Errors
    /// `AppError::BadInput` با پیام دقیق قانون
    pub fn check(self, value: &str, ctx: &RuleContext) -> Result<()> {
        match self {
            Self::PersonalName => check_personal_name(value),
            Self::CourseName => {
                if char_len(value) > 25 || !is_persian_script(value) || has_special_or_digit(value)
                {
                    return fail("Course name must be in Persian, shorter than 25 characters, and not contain any special characters or numbers");
                }
                Ok(())
            }
            Self::StudentId => {
                let chars: Vec<char> = value.chars().collect();
                let infix: String = chars
                    .get(3..9)
                    .map(|c| c.iter().collect::<String>())
                    .unwrap_or_default();
                if chars.len() != 11 || infix != "114150" {
                    let year = ctx.current_year.to_string();
                    let suffix = year.get(1..4).unwrap_or(&year);
                    return fail(format!("Invalid student id. ex: {suffix}11415001"));
                }
                Ok(())
            }
            Self::LecturerId => {
                if value.len() != 6 || !is_all_digits(value) || has_special(value) {
                    return fail("Invalid lecturer id");
                }
                Ok(())
            }
            Self::CourseId => {
                if value.len() != 5 || !is_all_digits(value) || has_special(value) {
                    return fail("Invalid course id. Course id must be 5 digits and not contain any special characters");
                }
                Ok(())
            }
            Self::Credit => check_credit(value),
            Self::BirthDate => check_birth_date(value, ctx),
            Self::NationalSerial => {
                if !is_national_serial(value) {
                    return fail("Incorrect national id format. ex: ب/12 123456");
                }
                Ok(())
            }
            Self::BornCity => {
                if !CITY_SET.contains(value) {
                    return fail("Born city must be a valid Iranian city");
                }
                Ok(())
            }
            Self::Address => {
                if char_len(value) > 100 {
                    return fail("Address length must not surpass 100 characters");
                }
                Ok(())
            }
            Self::PostalCode => {
                if value.len() != 10 || !is_all_digits(value) || has_special(value) {
                    return fail("Invalid postal code. Postal code must be 10 digits and not contain any special characters or letters");
                }
                Ok(())
            }
            Self::MobilePhone => {
                if !is_iranian_mobile(value) || !is_all_digits(value) || has_special(value) {
                    return fail("Phone number must be a valid Iranian number. ex: 989123456789");
                }
                Ok(())
            }
            Self::Landline => {
                if !is_iranian_landline(value) {
                    return fail("Incorrect home number format. ex: 0211234567");
                }
                Ok(())
            }
            Self::Department => {
                if !DEPARTMENT_SET.contains(value) {
                    return fail(DEPARTMENT_MESSAGE.as_str());
                }
                Ok(())
            }
            Self::Major => {
                if !MAJOR_SET.contains(value) {
                    return fail(MAJOR_MESSAGE.as_str());
                }
                Ok(())
            }
            Self::NationalCode => {
                if !is_valid_national_code(value) {
                    return fail("Invalid national code");
                }
                Ok(())
            }
        }
    }
}

fn check_personal_name(value: &str) -> Result<()> {
    if char_len(value) > 10 {
        return fail("Your name must be shorter than 10 characters");
    }
    if !is_persian_script(value) {
        return fail("Your name must be in Persian");
    }
    if has_special_or_digit(value) {
        return fail("Name must not contain digits or special characters");
    }
    Ok(())
}

fn check_credit(value: &str) -> Result<()> {
    const MESSAGE: &str =
        "Course credit must be between 1-3 and not contain any letter or special character";

    if value.is_empty() || !is_all_digits(value) || has_special(value) {
        return fail(MESSAGE);
    }
    match value.parse::<u32>() {
        Ok(credit) if (1..4).contains(&credit) => Ok(()),
        _ => fail(MESSAGE),
    }
}

/// تاریخ تولد شمسی به شکل `YYYY/MM/DD`
///
/// ماه خارج از ۱ تا ۱۲ بررسی روز نداره و فقط سال چک میشه.
fn check_birth_date(value: &str, ctx: &RuleContext) -> Result<()> {
    let parts: Vec<&str> = value.split('/').collect();
    let parsed: Option<Vec<i64>> = parts
        .get(..3)
        .and_then(|p| p.iter().map(|s| s.trim().parse::<i64>().ok()).collect());

    let Some([year, month, day]) = parsed.as_deref().and_then(|p| <[i64; 3]>::try_from(p).ok())
    else {
        return fail("Invalid birthdate. ex: 1383/11/01");
    };

    match month {
        1..=6 if !(1..=31).contains(&day) => {
            return fail("Day value must be between 1-31");
        }
        7..=11 if !(1..=30).contains(&day) => {
            return fail("Day value must be between 1-30 ex: 1383/11/01");
        }
        12 if !(1..=29).contains(&day) => {
            return fail("Day value must be between 1-29 ex: 1383/11/01");
        }
        _ => {}
    }

    let current = i64::from(ctx.current_year);
    if year <= current - 120 || year >= current {
        return fail(format!(
            "Year value must be between {} and {current} ex: 1383/11/01",
            current - 120
        ));
    }

    Ok(())
}

// =====================================
// Applying rule tables
// =====================================
/// اعمال جدول قوانین روی سند
///
/// فیلدهایی که در سند نیستن (یا `null` هستن) رد میشن. این همون رفتار
/// update جزئیه؛ در create همه فیلدها حاضرن.
///
/// # Errors
/// اولین قانونی که fail بشه، یا `BadInput` اگه مقدار فیلد رشته نباشه
pub fn apply_rules(rules: &[FieldRule], document: &Document, ctx: &RuleContext) -> Result<()> {
    for FieldRule { field, rule } in rules {
        match document.get(*field) {
            None | Some(Value::Null) => continue,
            Some(Value::String(value)) => rule.check(value, ctx)?,
            Some(_) => {
                return Err(AppError::bad_input(format!("Field '{field}' must be a string")));
            }
        }
    }
    Ok(())
}

// =====================================
// Per-entity tables
// =====================================
pub const COURSE_RULES: &[FieldRule] = &[
    FieldRule::new("cid", Rule::CourseId),
    FieldRule::new("cname", Rule::CourseName),
    FieldRule::new("department", Rule::Department),
    FieldRule::new("credit", Rule::Credit),
];

pub const LECTURER_RULES: &[FieldRule] = &[
    FieldRule::new("lid", Rule::LecturerId),
    FieldRule::new("fname", Rule::PersonalName),
    FieldRule::new("lname", Rule::PersonalName),
    FieldRule::new("birth", Rule::BirthDate),
    FieldRule::new("borncity", Rule::BornCity),
    FieldRule::new("address", Rule::Address),
    FieldRule::new("postalcode", Rule::PostalCode),
    FieldRule::new("cphone", Rule::MobilePhone),
    FieldRule::new("hphone", Rule::Landline),
    FieldRule::new("department", Rule::Department),
    FieldRule::new("major", Rule::Major),
    FieldRule::new("id", Rule::NationalCode),
];

pub const STUDENT_RULES: &[FieldRule] = &[
    FieldRule::new("stid", Rule::StudentId),
    FieldRule::new("fname", Rule::PersonalName),
    FieldRule::new("lname", Rule::PersonalName),
    FieldRule::new("father", Rule::PersonalName),
    FieldRule::new("birth", Rule::BirthDate),
    FieldRule::new("ids", Rule::NationalSerial),
    FieldRule::new("borncity", Rule::BornCity),
    FieldRule::new("address", Rule::Address),
    FieldRule::new("postalcode", Rule::PostalCode),
    FieldRule::new("cphone", Rule::MobilePhone),
    FieldRule::new("hphone", Rule::Landline),
    FieldRule::new("department", Rule::Department),
    FieldRule::new("major", Rule::Major),
    FieldRule::new("id", Rule::NationalCode),
];

/// مشترک بین CourseRegister و PresentedCourse
pub const OFFERING_RULES: &[FieldRule] = &[
    FieldRule::new("cid", Rule::CourseId),
    FieldRule::new("cname", Rule::CourseName),
    FieldRule::new("department", Rule::Department),
    FieldRule::new("credit", Rule::Credit),
    FieldRule::new("fname", Rule::PersonalName),
    FieldRule::new("lname", Rule::PersonalName),
];
