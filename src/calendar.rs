//! The calendar engine abstraction: one closed enum over the five engines,
//! dispatched by exhaustive match, plus the arithmetic shared by all of
//! them.

use crate::CalendarDate;
use crate::clock::Clock;
use crate::era::{Era, HijrahEra, IsoEra, MinguoEra, ThaiBuddhistEra};
use crate::error::DateError;
use crate::fields::{DateField, ValueRange};
use crate::hijrah::HijrahCalendar;
use crate::iso::IsoCalendar;
use crate::japanese::JapaneseCalendar;
use crate::minguo::MinguoCalendar;
use crate::period::Period;
use crate::prelude::*;
use crate::thai_buddhist::ThaiBuddhistCalendar;

/// Identifies one of the supported calendar systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum CalendarKind {
    /// The ISO (proleptic Gregorian) calendar.
    #[display(fmt = "ISO")]
    Iso,
    /// The Hijrah (tabular Islamic) calendar.
    #[display(fmt = "Hijrah")]
    Hijrah,
    /// The Japanese Imperial calendar.
    #[display(fmt = "Japanese")]
    Japanese,
    /// The Thai Buddhist calendar.
    #[display(fmt = "ThaiBuddhist")]
    ThaiBuddhist,
    /// The Minguo (Republic of China) calendar.
    #[display(fmt = "Minguo")]
    Minguo,
}

impl CalendarKind {
    /// Stable name, identical to the `Display` output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso => "ISO",
            Self::Hijrah => "Hijrah",
            Self::Japanese => "Japanese",
            Self::ThaiBuddhist => "ThaiBuddhist",
            Self::Minguo => "Minguo",
        }
    }
}

/// A calendar engine.
///
/// Construct one directly, or via the convenience constructors for the
/// standard variants. Engines are immutable and every operation is pure;
/// share one freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Calendar {
    /// ISO engine.
    Iso(IsoCalendar),
    /// Hijrah engine (any deviation variant).
    Hijrah(HijrahCalendar),
    /// Japanese engine.
    Japanese(JapaneseCalendar),
    /// Thai Buddhist engine.
    ThaiBuddhist(ThaiBuddhistCalendar),
    /// Minguo engine.
    Minguo(MinguoCalendar),
}

impl Calendar {
    /// The standard ISO engine.
    pub fn iso() -> Self {
        Self::Iso(IsoCalendar)
    }

    /// The nominal Hijrah engine (no deviations).
    pub fn hijrah() -> Self {
        Self::Hijrah(HijrahCalendar::nominal())
    }

    /// The Japanese engine with the built-in era table.
    pub fn japanese() -> Self {
        Self::Japanese(JapaneseCalendar::new())
    }

    /// The standard Thai Buddhist engine.
    pub fn thai_buddhist() -> Self {
        Self::ThaiBuddhist(ThaiBuddhistCalendar)
    }

    /// The standard Minguo engine.
    pub fn minguo() -> Self {
        Self::Minguo(MinguoCalendar)
    }

    /// Which calendar system this engine implements.
    pub const fn kind(&self) -> CalendarKind {
        match self {
            Self::Iso(_) => CalendarKind::Iso,
            Self::Hijrah(_) => CalendarKind::Hijrah,
            Self::Japanese(_) => CalendarKind::Japanese,
            Self::ThaiBuddhist(_) => CalendarKind::ThaiBuddhist,
            Self::Minguo(_) => CalendarKind::Minguo,
        }
    }

    /// Registry id (distinguishes Hijrah variants).
    pub fn id(&self) -> &str {
        match self {
            Self::Hijrah(calendar) => calendar.id(),
            other => other.kind().name(),
        }
    }

    /// Locale calendar type.
    pub fn calendar_type(&self) -> &str {
        match self {
            Self::Iso(_) => "iso8601",
            Self::Hijrah(calendar) => calendar.calendar_type(),
            Self::Japanese(_) => "japanese",
            Self::ThaiBuddhist(_) => "buddhist",
            Self::Minguo(_) => "roc",
        }
    }

    fn check_owned(&self, date: &CalendarDate) -> Result<(), DateError> {
        if date.calendar() == self.kind() {
            Ok(())
        } else {
            Err(DateError::ChronologyMismatch {
                expected: self.kind().name(),
                found: date.calendar().name(),
            })
        }
    }

    /// Date from (proleptic year, month, day).
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if a piece is out of range for this
    /// calendar.
    pub fn date_from_fields(&self, year: i32, month: i32, day: i32) -> Result<CalendarDate, DateError> {
        match self {
            Self::Iso(calendar) => calendar.date_from_fields(year, month, day),
            Self::Hijrah(calendar) => calendar.date_from_fields(year, month, day),
            Self::Japanese(calendar) => calendar.date_from_fields(year, month, day),
            Self::ThaiBuddhist(calendar) => calendar.date_from_fields(year, month, day),
            Self::Minguo(calendar) => calendar.date_from_fields(year, month, day),
        }
    }

    /// Date from (era, year-of-era, month, day).
    ///
    /// # Errors
    /// Returns `DateError::InvalidEra` for an era of another calendar, or
    /// `DateError::InvalidDate` as for `date_from_fields`.
    pub fn date_from_era_year(
        &self,
        era: Era,
        year_of_era: i32,
        month: i32,
        day: i32,
    ) -> Result<CalendarDate, DateError> {
        let year = self.proleptic_year(era, year_of_era)?;
        self.date_from_fields(year, month, day)
    }

    /// Date from (proleptic year, day-of-year).
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if `day_of_year` exceeds the year's
    /// actual length.
    pub fn date_from_year_day(&self, year: i32, day_of_year: i32) -> Result<CalendarDate, DateError> {
        match self {
            Self::Iso(calendar) => calendar.date_from_year_day(year, day_of_year),
            Self::Hijrah(calendar) => calendar.date_from_year_day(year, day_of_year),
            Self::Japanese(calendar) => calendar.date_from_year_day(year, day_of_year),
            Self::ThaiBuddhist(calendar) => calendar.date_from_year_day(year, day_of_year),
            Self::Minguo(calendar) => calendar.date_from_year_day(year, day_of_year),
        }
    }

    /// Date for an epoch day; total within the supported range.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` outside the supported span.
    pub fn date_from_epoch_day(&self, epoch_day: i64) -> Result<CalendarDate, DateError> {
        match self {
            Self::Iso(calendar) => calendar.date_from_epoch_day(epoch_day),
            Self::Hijrah(calendar) => calendar.date_from_epoch_day(epoch_day),
            Self::Japanese(calendar) => calendar.date_from_epoch_day(epoch_day),
            Self::ThaiBuddhist(calendar) => calendar.date_from_epoch_day(epoch_day),
            Self::Minguo(calendar) => calendar.date_from_epoch_day(epoch_day),
        }
    }

    /// Today's date according to the injected clock.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the clock reports a day outside
    /// the supported span.
    pub fn date_now(&self, clock: &dyn Clock) -> Result<CalendarDate, DateError> {
        self.date_from_epoch_day(clock.current_epoch_day())
    }

    /// Whether `year` is a leap year under this calendar's rules.
    ///
    /// Total over all inputs; calendars without the concept answer `false`.
    pub fn is_leap_year(&self, year: i32) -> bool {
        match self {
            Self::Iso(calendar) => calendar.is_leap_year(year),
            Self::Hijrah(calendar) => calendar.is_leap_year(year),
            Self::Japanese(calendar) => calendar.is_leap_year(year),
            Self::ThaiBuddhist(calendar) => calendar.is_leap_year(year),
            Self::Minguo(calendar) => calendar.is_leap_year(year),
        }
    }

    /// Combines an era and year-of-era into a proleptic year; backward eras
    /// count away from year 1.
    ///
    /// # Errors
    /// Returns `DateError::InvalidEra` for an era of another calendar.
    pub fn proleptic_year(&self, era: Era, year_of_era: i32) -> Result<i32, DateError> {
        let backward = |year_of_era: i32| {
            (1 - i64::from(year_of_era))
                .try_into()
                .map_err(|_| DateError::ArithmeticOverflow {
                    operation: "proleptic_year",
                })
        };
        match (self, era) {
            (Self::Iso(_), Era::Iso(IsoEra::Ce)) => Ok(year_of_era),
            (Self::Iso(_), Era::Iso(IsoEra::Bce)) => backward(year_of_era),
            (Self::Hijrah(_), Era::Hijrah(HijrahEra::Ah)) => Ok(year_of_era),
            (Self::Hijrah(_), Era::Hijrah(HijrahEra::BeforeAh)) => backward(year_of_era),
            (Self::Japanese(calendar), Era::Japanese(era)) => {
                calendar.proleptic_year(era, year_of_era)
            }
            (Self::ThaiBuddhist(_), Era::ThaiBuddhist(ThaiBuddhistEra::Be)) => Ok(year_of_era),
            (Self::ThaiBuddhist(_), Era::ThaiBuddhist(ThaiBuddhistEra::BeforeBe)) => {
                backward(year_of_era)
            }
            (Self::Minguo(_), Era::Minguo(MinguoEra::Roc)) => Ok(year_of_era),
            (Self::Minguo(_), Era::Minguo(MinguoEra::BeforeRoc)) => backward(year_of_era),
            (calendar, era) => Err(DateError::InvalidEra {
                era: i64::from(era.value()),
                calendar: calendar.kind().name(),
            }),
        }
    }

    /// Era for a numeric era value.
    ///
    /// # Errors
    /// Returns `DateError::InvalidEra` for an unmapped value.
    pub fn era_of(&self, value: i32) -> Result<Era, DateError> {
        let unmapped = || DateError::InvalidEra {
            era: i64::from(value),
            calendar: self.kind().name(),
        };
        match self {
            Self::Iso(_) => IsoEra::of(value).map(Era::Iso).ok_or_else(unmapped),
            Self::Hijrah(_) => HijrahEra::of(value).map(Era::Hijrah).ok_or_else(unmapped),
            Self::Japanese(calendar) => calendar.era_of(value),
            Self::ThaiBuddhist(_) => ThaiBuddhistEra::of(value)
                .map(Era::ThaiBuddhist)
                .ok_or_else(unmapped),
            Self::Minguo(_) => MinguoEra::of(value).map(Era::Minguo).ok_or_else(unmapped),
        }
    }

    /// Every era of this calendar, oldest first.
    pub fn eras(&self) -> Vec<Era> {
        match self {
            Self::Iso(_) => vec![Era::Iso(IsoEra::Bce), Era::Iso(IsoEra::Ce)],
            Self::Hijrah(_) => vec![
                Era::Hijrah(HijrahEra::BeforeAh),
                Era::Hijrah(HijrahEra::Ah),
            ],
            Self::Japanese(calendar) => calendar.eras(),
            Self::ThaiBuddhist(_) => vec![
                Era::ThaiBuddhist(ThaiBuddhistEra::BeforeBe),
                Era::ThaiBuddhist(ThaiBuddhistEra::Be),
            ],
            Self::Minguo(_) => vec![
                Era::Minguo(MinguoEra::BeforeRoc),
                Era::Minguo(MinguoEra::Roc),
            ],
        }
    }

    /// This calendar's declared bounds for a field.
    pub fn valid_range(&self, field: DateField) -> ValueRange {
        match self {
            Self::Iso(calendar) => calendar.valid_range(field),
            Self::Hijrah(calendar) => calendar.valid_range(field),
            Self::Japanese(calendar) => calendar.valid_range(field),
            Self::ThaiBuddhist(calendar) => calendar.valid_range(field),
            Self::Minguo(calendar) => calendar.valid_range(field),
        }
    }

    /// Length in days of the given month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` for an out-of-range year or month.
    pub fn month_length(&self, year: i32, month: i32) -> Result<i64, DateError> {
        match self {
            Self::Iso(calendar) => calendar.month_length(year, month),
            Self::Hijrah(calendar) => calendar.month_length(year, month),
            Self::Japanese(calendar) => calendar.month_length(year, month),
            Self::ThaiBuddhist(calendar) => calendar.month_length(year, month),
            Self::Minguo(calendar) => calendar.month_length(year, month),
        }
    }

    /// Length in days of the given year.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` for an out-of-range year.
    pub fn year_length(&self, year: i32) -> Result<i64, DateError> {
        match self {
            Self::Iso(calendar) => calendar.year_length(year),
            Self::Hijrah(calendar) => calendar.checked_year_length(year),
            Self::Japanese(calendar) => calendar.year_length(year),
            Self::ThaiBuddhist(calendar) => calendar.year_length(year),
            Self::Minguo(calendar) => calendar.year_length(year),
        }
    }

    /// Adds days by shifting the epoch day.
    ///
    /// # Errors
    /// Fails loudly on overflow or when leaving the supported span.
    pub fn plus_days(&self, date: &CalendarDate, days: i64) -> Result<CalendarDate, DateError> {
        self.check_owned(date)?;
        if days == 0 {
            return Ok(*date);
        }
        let epoch_day =
            date.epoch_day()
                .checked_add(days)
                .ok_or(DateError::ArithmeticOverflow {
                    operation: "plus_days",
                })?;
        self.date_from_epoch_day(epoch_day)
    }

    /// Adds months on the calendar-native axis, clamping the day-of-month to
    /// the target month's length.
    ///
    /// # Errors
    /// Fails loudly on overflow or when leaving the supported span.
    pub fn plus_months(&self, date: &CalendarDate, months: i64) -> Result<CalendarDate, DateError> {
        self.check_owned(date)?;
        if months == 0 {
            return Ok(*date);
        }
        let total = date
            .proleptic_month()
            .checked_add(months)
            .ok_or(DateError::ArithmeticOverflow {
                operation: "plus_months",
            })?;
        let year: i32 =
            total
                .div_euclid(12)
                .try_into()
                .map_err(|_| DateError::ArithmeticOverflow {
                    operation: "plus_months",
                })?;
        let month = (total.rem_euclid(12) + 1) as i32;
        let day = i64::from(date.day()).min(self.month_length(year, month)?);
        self.date_from_fields(year, month, day as i32)
    }

    /// Adds years on the calendar-native axis, clamping the day-of-month
    /// within the unchanged month.
    ///
    /// # Errors
    /// Fails loudly on overflow or when leaving the supported span.
    pub fn plus_years(&self, date: &CalendarDate, years: i64) -> Result<CalendarDate, DateError> {
        self.check_owned(date)?;
        if years == 0 {
            return Ok(*date);
        }
        let year: i32 = (i64::from(date.proleptic_year()))
            .checked_add(years)
            .and_then(|year| year.try_into().ok())
            .ok_or(DateError::ArithmeticOverflow {
                operation: "plus_years",
            })?;
        let month = i32::from(date.month());
        let day = i64::from(date.day()).min(self.month_length(year, month)?);
        self.date_from_fields(year, month, day as i32)
    }

    /// Subtracts days; the negation of `plus_days`.
    ///
    /// # Errors
    /// As for `plus_days`.
    pub fn minus_days(&self, date: &CalendarDate, days: i64) -> Result<CalendarDate, DateError> {
        self.plus_days(date, negate(days, "minus_days")?)
    }

    /// Subtracts months; the negation of `plus_months`.
    ///
    /// # Errors
    /// As for `plus_months`.
    pub fn minus_months(&self, date: &CalendarDate, months: i64) -> Result<CalendarDate, DateError> {
        self.plus_months(date, negate(months, "minus_months")?)
    }

    /// Subtracts years; the negation of `plus_years`.
    ///
    /// # Errors
    /// As for `plus_years`.
    pub fn minus_years(&self, date: &CalendarDate, years: i64) -> Result<CalendarDate, DateError> {
        self.plus_years(date, negate(years, "minus_years")?)
    }

    /// The period from `start` to `end` in this calendar's units, negative
    /// if `end` is earlier.
    ///
    /// # Errors
    /// Returns `DateError::ChronologyMismatch` for dates of another
    /// calendar.
    pub fn until(&self, start: &CalendarDate, end: &CalendarDate) -> Result<Period, DateError> {
        self.check_owned(start)?;
        self.check_owned(end)?;
        let mut total_months = end.proleptic_month() - start.proleptic_month();
        let mut days = i64::from(end.day()) - i64::from(start.day());
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let adjusted = self.plus_months(start, total_months)?;
            days = end.epoch_day() - adjusted.epoch_day();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= self.month_length(end.proleptic_year(), i32::from(end.month()))?;
        }
        let overflow = || DateError::ArithmeticOverflow { operation: "until" };
        Ok(Period::new(
            self.kind(),
            (total_months / 12).try_into().map_err(|_| overflow())?,
            (total_months % 12) as i32,
            days.try_into().map_err(|_| overflow())?,
        ))
    }

    /// Adds a period of this chronology: years, then months, then days.
    ///
    /// # Errors
    /// Returns `DateError::ChronologyMismatch` for a period of another
    /// calendar; otherwise as for the underlying arithmetic.
    pub fn add_period(&self, date: &CalendarDate, period: &Period) -> Result<CalendarDate, DateError> {
        if period.calendar() != self.kind() {
            return Err(DateError::ChronologyMismatch {
                expected: self.kind().name(),
                found: period.calendar().name(),
            });
        }
        let date = self.plus_years(date, i64::from(period.years()))?;
        let date = self.plus_months(&date, i64::from(period.months()))?;
        self.plus_days(&date, i64::from(period.days()))
    }
}

fn negate(amount: i64, operation: &'static str) -> Result<i64, DateError> {
    amount
        .checked_neg()
        .ok_or(DateError::ArithmeticOverflow { operation })
}
