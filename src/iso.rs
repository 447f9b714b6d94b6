//! The ISO (proleptic Gregorian) calendar engine.
//!
//! Also home to the field ranges and validation helpers shared by the other
//! ISO-shaped engines (Japanese, Thai Buddhist, Minguo).

use crate::CalendarDate;
use crate::calendar::CalendarKind;
use crate::consts::{MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR};
use crate::epoch::{
    day_of_year, days_in_month, epoch_day_from_gregorian, gregorian_from_epoch_day,
    is_leap_year, iso_day_of_week, month_day_from_day_of_year, year_length,
};
use crate::era::{Era, IsoEra};
use crate::error::DateError;
use crate::fields::{DateField, ValueRange};

pub(crate) const YEAR_RANGE: ValueRange =
    ValueRange::new(MIN_YEAR as i64, MAX_YEAR as i64);
pub(crate) const YEAR_OF_ERA_RANGE: ValueRange =
    ValueRange::with_smallest_max(1, MAX_YEAR as i64, MAX_YEAR as i64 + 1);
pub(crate) const MONTH_RANGE: ValueRange = ValueRange::new(1, 12);
pub(crate) const PROLEPTIC_MONTH_RANGE: ValueRange =
    ValueRange::new(MIN_YEAR as i64 * 12, MAX_YEAR as i64 * 12 + 11);
pub(crate) const DAY_OF_MONTH_RANGE: ValueRange = ValueRange::with_smallest_max(1, 28, 31);
pub(crate) const DAY_OF_YEAR_RANGE: ValueRange = ValueRange::with_smallest_max(1, 365, 366);
pub(crate) const DAY_OF_WEEK_RANGE: ValueRange = ValueRange::new(1, 7);
pub(crate) const ALIGNED_WEEK_OF_MONTH_RANGE: ValueRange = ValueRange::with_smallest_max(1, 4, 5);
pub(crate) const ALIGNED_WEEK_OF_YEAR_RANGE: ValueRange = ValueRange::new(1, 53);
pub(crate) const EPOCH_DAY_RANGE: ValueRange = ValueRange::new(MIN_EPOCH_DAY, MAX_EPOCH_DAY);
pub(crate) const TWO_ERA_RANGE: ValueRange = ValueRange::new(0, 1);

/// Validates an ISO-shaped (month, day) pair for the given ISO year.
pub(crate) fn check_month_day(year: i64, month: i32, day: i32) -> Result<(u8, u8), DateError> {
    let month = MONTH_RANGE.check(DateField::MonthOfYear, i64::from(month))? as u8;
    let max_day = days_in_month(year, month);
    let day = ValueRange::new(1, i64::from(max_day)).check(DateField::DayOfMonth, i64::from(day))?;
    Ok((month, day as u8))
}

/// Validates an ISO-shaped day-of-year and splits it into (month, day).
pub(crate) fn check_year_day(year: i64, day_of_year: i32) -> Result<(u8, u8), DateError> {
    let length = year_length(year);
    let doy = ValueRange::new(1, i64::from(length))
        .check(DateField::DayOfYear, i64::from(day_of_year))?;
    Ok(month_day_from_day_of_year(year, doy as u16))
}

/// The ISO calendar engine: the proleptic Gregorian calendar with eras
/// BCE/CE, the reference system every other calendar converts through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsoCalendar;

impl IsoCalendar {
    fn build(self, epoch_day: i64, year: i32, month: u8, day: u8) -> CalendarDate {
        let (era, year_of_era) = if year >= 1 {
            (IsoEra::Ce, year)
        } else {
            (IsoEra::Bce, 1 - year)
        };
        CalendarDate {
            calendar: CalendarKind::Iso,
            epoch_day,
            era: Era::Iso(era),
            year_of_era,
            proleptic_year: year,
            month,
            day,
            day_of_year: day_of_year(i64::from(year), month, day),
            day_of_week: iso_day_of_week(epoch_day),
            leap_year: is_leap_year(i64::from(year)),
        }
    }

    pub(crate) fn date_from_fields(
        self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<CalendarDate, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let (month, day) = check_month_day(year64, month, day)?;
        let epoch_day = epoch_day_from_gregorian(year64, i64::from(month), i64::from(day));
        Ok(self.build(epoch_day, year, month, day))
    }

    pub(crate) fn date_from_year_day(
        self,
        year: i32,
        day_of_year: i32,
    ) -> Result<CalendarDate, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let (month, day) = check_year_day(year64, day_of_year)?;
        let epoch_day = epoch_day_from_gregorian(year64, i64::from(month), i64::from(day));
        Ok(self.build(epoch_day, year, month, day))
    }

    pub(crate) fn date_from_epoch_day(self, epoch_day: i64) -> Result<CalendarDate, DateError> {
        EPOCH_DAY_RANGE.check(DateField::EpochDay, epoch_day)?;
        let (year, month, day) = gregorian_from_epoch_day(epoch_day);
        Ok(self.build(epoch_day, year as i32, month, day))
    }

    pub(crate) fn is_leap_year(self, year: i32) -> bool {
        is_leap_year(i64::from(year))
    }

    pub(crate) fn month_length(self, year: i32, month: i32) -> Result<i64, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let month = MONTH_RANGE.check(DateField::MonthOfYear, i64::from(month))?;
        Ok(i64::from(days_in_month(year64, month as u8)))
    }

    pub(crate) fn year_length(self, year: i32) -> Result<i64, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        Ok(i64::from(year_length(year64)))
    }

    pub(crate) fn valid_range(self, field: DateField) -> ValueRange {
        match field {
            DateField::Era => TWO_ERA_RANGE,
            DateField::YearOfEra => YEAR_OF_ERA_RANGE,
            DateField::Year => YEAR_RANGE,
            DateField::MonthOfYear => MONTH_RANGE,
            DateField::ProlepticMonth => PROLEPTIC_MONTH_RANGE,
            DateField::DayOfMonth => DAY_OF_MONTH_RANGE,
            DateField::DayOfYear => DAY_OF_YEAR_RANGE,
            DateField::DayOfWeek
            | DateField::AlignedDayOfWeekInMonth
            | DateField::AlignedDayOfWeekInYear => DAY_OF_WEEK_RANGE,
            DateField::AlignedWeekOfMonth => ALIGNED_WEEK_OF_MONTH_RANGE,
            DateField::AlignedWeekOfYear => ALIGNED_WEEK_OF_YEAR_RANGE,
            DateField::EpochDay => EPOCH_DAY_RANGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year_rule() {
        let iso = IsoCalendar;
        assert!(!iso.is_leap_year(1900));
        assert!(iso.is_leap_year(2000));
        assert!(iso.is_leap_year(1904));
        assert!(!iso.is_leap_year(2023));
        for year in -400..=2400 {
            let expected = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
            assert_eq!(iso.is_leap_year(year), expected, "year {year}");
        }
    }

    #[test]
    fn test_date_from_fields() {
        let date = IsoCalendar.date_from_fields(1970, 1, 1).unwrap();
        assert_eq!(date.epoch_day(), 0);
        assert_eq!(date.day_of_week(), 4);

        let date = IsoCalendar.date_from_fields(2000, 2, 29).unwrap();
        assert_eq!(date.day_of_year(), 60);
        assert!(date.is_leap_year());
    }

    #[test]
    fn test_invalid_dates() {
        let result = IsoCalendar.date_from_fields(2021, 2, 29);
        assert!(matches!(
            result,
            Err(DateError::InvalidDate {
                field: DateField::DayOfMonth,
                value: 29,
                min: 1,
                max: 28,
            })
        ));
        assert!(IsoCalendar.date_from_fields(2021, 13, 1).is_err());
        assert!(IsoCalendar.date_from_fields(2021, 0, 1).is_err());
        assert!(IsoCalendar.date_from_fields(2021, 1, 0).is_err());
        assert!(IsoCalendar.date_from_fields(1_000_000_000, 1, 1).is_err());
    }

    #[test]
    fn test_bce_era_mapping() {
        // era BCE year 1 == proleptic year 0
        let by_era = IsoCalendar.date_from_fields(0, 1, 1).unwrap();
        assert_eq!(by_era.era(), Era::Iso(IsoEra::Bce));
        assert_eq!(by_era.year_of_era(), 1);

        let date = IsoCalendar.date_from_fields(-3, 6, 15).unwrap();
        assert_eq!(date.year_of_era(), 4);
    }

    #[test]
    fn test_date_from_year_day() {
        let date = IsoCalendar.date_from_year_day(2020, 366).unwrap();
        assert_eq!((date.month(), date.day()), (12, 31));
        assert!(IsoCalendar.date_from_year_day(2021, 366).is_err());
        assert!(IsoCalendar.date_from_year_day(2021, 0).is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut epoch_day = -1_000_000;
        while epoch_day < 1_000_000 {
            let date = IsoCalendar.date_from_epoch_day(epoch_day).unwrap();
            let back = IsoCalendar
                .date_from_fields(
                    date.proleptic_year(),
                    i32::from(date.month()),
                    i32::from(date.day()),
                )
                .unwrap();
            assert_eq!(back.epoch_day(), epoch_day);
            let by_doy = IsoCalendar
                .date_from_year_day(date.proleptic_year(), i32::from(date.day_of_year()))
                .unwrap();
            assert_eq!(by_doy.epoch_day(), epoch_day);
            epoch_day += 2003;
        }
    }

    #[test]
    fn test_month_and_year_length() {
        assert_eq!(IsoCalendar.month_length(2020, 2).unwrap(), 29);
        assert_eq!(IsoCalendar.month_length(2021, 2).unwrap(), 28);
        assert_eq!(IsoCalendar.year_length(2020).unwrap(), 366);
        assert_eq!(IsoCalendar.year_length(2021).unwrap(), 365);
    }

    #[test]
    fn test_ranges() {
        let iso = IsoCalendar;
        assert_eq!(iso.valid_range(DateField::MonthOfYear).max(), 12);
        assert_eq!(iso.valid_range(DateField::DayOfMonth).smallest_max(), 28);
        assert_eq!(iso.valid_range(DateField::DayOfMonth).max(), 31);
        assert_eq!(iso.valid_range(DateField::Era).max(), 1);
        assert!(iso.valid_range(DateField::EpochDay).contains(0));
    }
}
