//! # ماژول توابع کمکی (Utilities)
//!
//! تبدیل تاریخ میلادی به شمسی (هجری خورشیدی).
//!
//! قانون تاریخ تولد و پیام خطای شماره دانشجویی به سال جاری شمسی نیاز دارن.

use chrono::{Datelike, Local, NaiveDate};

/// تاریخ شمسی (سال، ماه، روز)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// روزهای تجمعی قبل از هر ماه میلادی (سال غیر کبیسه)
const GREGORIAN_DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

impl JalaliDate {
    /// تبدیل از تاریخ میلادی
    ///
    /// # مثال
    /// ```rust
    /// use chrono::NaiveDate;
    /// use university_records::utils::JalaliDate;
    ///
    /// let nowruz = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    /// let jalali = JalaliDate::from_gregorian(nowruz);
    /// assert_eq!((jalali.year, jalali.month, jalali.day), (1403, 1, 1));
    /// ```
    #[must_use]
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let gy = i64::from(date.year());
        let gm = date.month() as usize;
        let gd = i64::from(date.day());

        let gy2 = if gm > 2 { gy + 1 } else { gy };
        let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100
            + (gy2 + 399) / 400
            + gd
            + GREGORIAN_DAYS_BEFORE_MONTH[gm - 1];

        // چرخه‌های ۳۳ ساله و ۴ ساله
        let mut jy = -1595 + 33 * (days / 12_053);
        days %= 12_053;
        jy += 4 * (days / 1461);
        days %= 1461;
        if days > 365 {
            jy += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        // شش ماه اول ۳۱ روزه، بقیه ۳۰ روزه
        let (jm, jd) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Self {
            year: jy as i32,
            month: jm as u32,
            day: jd as u32,
        }
    }

    /// تاریخ شمسی امروز (بر اساس ساعت محلی)
    #[must_use]
    pub fn today() -> Self {
        Self::from_gregorian(Local::now().date_naive())
    }
}

/// سال جاری شمسی
#[must_use]
pub fn current_jalali_year() -> i32 {
    JalaliDate::today().year
}
