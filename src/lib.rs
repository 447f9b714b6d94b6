//! Multi-calendar date computation over a shared epoch-day axis.
//!
//! Five calendar systems (ISO, Hijrah, Japanese Imperial, Thai Buddhist,
//! Minguo) convert between their (era, year-of-era, month, day) fields and
//! a universal linear day count, resolve partially-specified field bags into
//! concrete dates under configurable strictness, and perform calendar-native
//! arithmetic.
//!
//! ```
//! use polycal::{Calendar, DateField, FieldBag, FixedClock, Resolution, ResolutionMode};
//!
//! let iso = Calendar::iso();
//! let date = iso.date_from_fields(2024, 2, 29)?;
//! assert_eq!(date.epoch_day(), 19_782);
//!
//! let mut bag: FieldBag = [
//!     (DateField::Year, 2024),
//!     (DateField::MonthOfYear, 2),
//!     (DateField::DayOfMonth, 31),
//! ]
//! .into_iter()
//! .collect();
//! let clock = FixedClock::new(0);
//! let resolved = polycal::resolve_date(&iso, &mut bag, ResolutionMode::Smart, &clock)?;
//! assert_eq!(resolved, Resolution::Resolved(date)); // day clamped to Feb 29
//! # Ok::<(), polycal::DateError>(())
//! ```

mod calendar;
mod clock;
mod consts;
mod epoch;
mod era;
mod error;
mod fields;
mod hijrah;
mod iso;
mod japanese;
mod minguo;
mod period;
mod prelude;
mod registry;
mod resolver;
mod thai_buddhist;

pub use calendar::{Calendar, CalendarKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use era::{Era, HijrahEra, IsoEra, JapaneseEra, MinguoEra, ThaiBuddhistEra};
pub use error::DateError;
pub use fields::{DateField, FieldBag, ValueRange};
pub use hijrah::{Deviation, HijrahCalendar};
pub use iso::IsoCalendar;
pub use japanese::{JapaneseCalendar, JapaneseEraRow};
pub use minguo::MinguoCalendar;
pub use period::Period;
pub use registry::ChronologyRegistry;
pub use resolver::{Resolution, ResolutionMode, resolve_date};
pub use thai_buddhist::ThaiBuddhistCalendar;

use crate::prelude::*;
use std::cmp::Ordering;

/// A date in one calendar system, normalized to an epoch day with cached
/// derived fields.
///
/// Values are created only through `Calendar` factory operations and are
/// immutable; the cached fields are always consistent with the epoch day
/// under the owning calendar's rules. Arithmetic produces new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{calendar} {era} {year_of_era}-{month:02}-{day:02}")]
pub struct CalendarDate {
    pub(crate) calendar: CalendarKind,
    pub(crate) epoch_day: i64,
    pub(crate) era: Era,
    pub(crate) year_of_era: i32,
    pub(crate) proleptic_year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) day_of_year: u16,
    pub(crate) day_of_week: u8,
    pub(crate) leap_year: bool,
}

impl CalendarDate {
    /// The calendar system this date belongs to.
    #[inline]
    pub const fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    /// Days since 1970-01-01 (Gregorian), the universal comparison key.
    #[inline]
    pub const fn epoch_day(&self) -> i64 {
        self.epoch_day
    }

    /// The era this date falls in.
    #[inline]
    pub const fn era(&self) -> Era {
        self.era
    }

    /// Year as presented within the era (>= 1).
    #[inline]
    pub const fn year_of_era(&self) -> i32 {
        self.year_of_era
    }

    /// Proleptic year on the calendar's own year axis.
    #[inline]
    pub const fn proleptic_year(&self) -> i32 {
        self.proleptic_year
    }

    /// Month of year, 1-based.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, 1-based.
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Day of year, 1-based.
    #[inline]
    pub const fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    /// Day of week in the calendar's numbering, 1..=7.
    #[inline]
    pub const fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Whether the containing proleptic year is a leap year.
    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        self.leap_year
    }

    /// Months elapsed since month 1 of proleptic year 0.
    #[inline]
    pub const fn proleptic_month(&self) -> i64 {
        self.proleptic_year as i64 * 12 + self.month as i64 - 1
    }

    /// Value of any date field for this date.
    ///
    /// The aligned week/day fields express positions within fixed groups of
    /// seven days counted from the start of the month or year.
    pub const fn field(&self, field: DateField) -> i64 {
        match field {
            DateField::Era => self.era.value() as i64,
            DateField::YearOfEra => self.year_of_era as i64,
            DateField::Year => self.proleptic_year as i64,
            DateField::MonthOfYear => self.month as i64,
            DateField::ProlepticMonth => self.proleptic_month(),
            DateField::DayOfMonth => self.day as i64,
            DateField::DayOfYear => self.day_of_year as i64,
            DateField::DayOfWeek => self.day_of_week as i64,
            DateField::AlignedWeekOfMonth => (self.day as i64 - 1) / 7 + 1,
            DateField::AlignedDayOfWeekInMonth => (self.day as i64 - 1) % 7 + 1,
            DateField::AlignedWeekOfYear => (self.day_of_year as i64 - 1) / 7 + 1,
            DateField::AlignedDayOfWeekInYear => (self.day_of_year as i64 - 1) % 7 + 1,
            DateField::EpochDay => self.epoch_day,
        }
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare on the universal day count first…
        match self.epoch_day.cmp(&other.epoch_day) {
            // …then break ties between calendars deterministically.
            Ordering::Equal => self.calendar.cmp(&other.calendar),
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CalendarDate {
        Calendar::iso().date_from_fields(2024, 2, 29).unwrap()
    }

    #[test]
    fn test_accessors() {
        let date = sample();
        assert_eq!(date.calendar(), CalendarKind::Iso);
        assert_eq!(date.proleptic_year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
        assert_eq!(date.day_of_year(), 60);
        assert_eq!(date.year_of_era(), 2024);
        assert_eq!(date.era(), Era::Iso(IsoEra::Ce));
        assert!(date.is_leap_year());
        assert_eq!(date.day_of_week(), 4); // Thursday
    }

    #[test]
    fn test_proleptic_month() {
        let date = sample();
        assert_eq!(date.proleptic_month(), 2024 * 12 + 1);
    }

    #[test]
    fn test_field_values() {
        let date = sample();
        assert_eq!(date.field(DateField::Era), 1);
        assert_eq!(date.field(DateField::Year), 2024);
        assert_eq!(date.field(DateField::MonthOfYear), 2);
        assert_eq!(date.field(DateField::DayOfMonth), 29);
        assert_eq!(date.field(DateField::EpochDay), 19_782);
        assert_eq!(date.field(DateField::AlignedWeekOfMonth), 5);
        assert_eq!(date.field(DateField::AlignedDayOfWeekInMonth), 1);
        assert_eq!(date.field(DateField::AlignedWeekOfYear), 9);
        assert_eq!(date.field(DateField::AlignedDayOfWeekInYear), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "ISO CE 2024-02-29");
    }

    #[test]
    fn test_ordering_is_epoch_day_first() {
        let iso = Calendar::iso();
        let earlier = iso.date_from_fields(2024, 2, 28).unwrap();
        let later = sample();
        assert!(earlier < later);

        // same instant in two calendars: epoch days equal, kind breaks the tie
        let buddhist = Calendar::thai_buddhist()
            .date_from_epoch_day(later.epoch_day())
            .unwrap();
        assert_eq!(buddhist.epoch_day(), later.epoch_day());
        assert!(later < buddhist);
    }
}
