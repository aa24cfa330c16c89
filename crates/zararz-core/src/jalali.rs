//! Jalali (Solar Hijri) calendar dates for report headers.

use std::fmt::{Display, Formatter};

use time::{Date, OffsetDateTime, UtcOffset};

/// Cumulative day counts before each Gregorian month in a common year.
const GREGORIAN_DAYS_BEFORE_MONTH: [i64; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A calendar date in the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    pub year: i64,
    pub month: u8,
    pub day: u8,
}

impl JalaliDate {
    /// Converts a Gregorian date using the 33-year arithmetic cycle.
    /// Valid for dates from 1600 CE onwards.
    pub fn from_gregorian(date: Date) -> Self {
        let month = i64::from(u8::from(date.month()));
        let day = i64::from(date.day());
        let mut gregorian_year = i64::from(date.year());

        let mut year = if gregorian_year > 1600 {
            gregorian_year -= 1600;
            979
        } else {
            gregorian_year -= 621;
            0
        };

        let leap_year_basis = if month > 2 {
            gregorian_year + 1
        } else {
            gregorian_year
        };
        let mut days = 365 * gregorian_year
            + (leap_year_basis + 3) / 4
            - (leap_year_basis + 99) / 100
            + (leap_year_basis + 399) / 400
            - 80
            + day
            + GREGORIAN_DAYS_BEFORE_MONTH[(month - 1) as usize];

        year += 33 * (days / 12_053);
        days %= 12_053;
        year += 4 * (days / 1_461);
        days %= 1_461;
        if days > 365 {
            year += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        let (month, day) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Self {
            year,
            month: month as u8,
            day: day as u8,
        }
    }
}

impl Display for JalaliDate {
    /// `YYYY/MM/DD`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Date and wall-clock time strings shown in a report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JalaliStamp {
    pub date: String,
    pub time: String,
}

impl JalaliStamp {
    pub fn at(moment: OffsetDateTime) -> Self {
        Self {
            date: JalaliDate::from_gregorian(moment.date()).to_string(),
            time: format!("{:02}:{:02}", moment.hour(), moment.minute()),
        }
    }
}

/// Source of the current time for report headers.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock shifted to a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub const fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, PrimitiveDateTime, Time};

    use super::*;

    fn gregorian(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).expect("valid date")
    }

    fn jalali(year: i64, month: u8, day: u8) -> JalaliDate {
        JalaliDate { year, month, day }
    }

    #[test]
    fn nowruz_starts_the_year() {
        assert_eq!(
            JalaliDate::from_gregorian(gregorian(2024, Month::March, 20)),
            jalali(1403, 1, 1)
        );
        assert_eq!(
            JalaliDate::from_gregorian(gregorian(2025, Month::March, 21)),
            jalali(1404, 1, 1)
        );
    }

    #[test]
    fn leap_year_ends_on_esfand_thirtieth() {
        assert_eq!(
            JalaliDate::from_gregorian(gregorian(2025, Month::March, 20)),
            jalali(1403, 12, 30)
        );
    }

    #[test]
    fn converts_autumn_dates() {
        assert_eq!(
            JalaliDate::from_gregorian(gregorian(2026, Month::October, 18)),
            jalali(1405, 7, 26)
        );
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(jalali(1403, 1, 1).to_string(), "1403/01/01");
    }

    #[test]
    fn stamp_uses_the_moments_own_offset() {
        let offset = UtcOffset::from_hms(3, 30, 0).expect("valid offset");
        let utc = PrimitiveDateTime::new(
            gregorian(2024, Month::March, 19),
            Time::from_hms(21, 5, 0).expect("valid time"),
        )
        .assume_utc();

        let stamp = JalaliStamp::at(utc.to_offset(offset));
        assert_eq!(stamp.date, "1403/01/01");
        assert_eq!(stamp.time, "00:35");
    }
}
