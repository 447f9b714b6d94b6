//! The Minguo (Republic of China) calendar engine, a year-shifted view of
//! ISO.

use crate::CalendarDate;
use crate::calendar::CalendarKind;
use crate::consts::{MAX_YEAR, MIN_YEAR, MINGUO_YEAR_OFFSET};
use crate::epoch::{
    day_of_year, days_in_month, epoch_day_from_gregorian, gregorian_from_epoch_day, is_leap_year,
    iso_day_of_week, year_length,
};
use crate::era::{Era, MinguoEra};
use crate::error::DateError;
use crate::fields::{DateField, ValueRange};
use crate::iso::{self, check_month_day, check_year_day};

const OFFSET: i64 = MINGUO_YEAR_OFFSET as i64;

pub(crate) const YEAR_RANGE: ValueRange =
    ValueRange::new(MIN_YEAR as i64 - OFFSET, MAX_YEAR as i64 - OFFSET);
pub(crate) const YEAR_OF_ERA_RANGE: ValueRange =
    ValueRange::with_smallest_max(1, MAX_YEAR as i64 - OFFSET, -(MIN_YEAR as i64 - OFFSET) + 1);
pub(crate) const PROLEPTIC_MONTH_RANGE: ValueRange = ValueRange::new(
    (MIN_YEAR as i64 - OFFSET) * 12,
    (MAX_YEAR as i64 - OFFSET) * 12 + 11,
);

/// The Minguo calendar: ISO months and days with the year axis shifted back
/// by 1911 (ROC 59 began during ISO 1970).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinguoCalendar;

impl MinguoCalendar {
    const fn iso_year(year: i32) -> i64 {
        year as i64 + OFFSET
    }

    fn build(self, epoch_day: i64, year: i32, month: u8, day: u8) -> CalendarDate {
        let iso_year = Self::iso_year(year);
        let (era, year_of_era) = if year >= 1 {
            (MinguoEra::Roc, year)
        } else {
            (MinguoEra::BeforeRoc, 1 - year)
        };
        CalendarDate {
            calendar: CalendarKind::Minguo,
            epoch_day,
            era: Era::Minguo(era),
            year_of_era,
            proleptic_year: year,
            month,
            day,
            day_of_year: day_of_year(iso_year, month, day),
            day_of_week: iso_day_of_week(epoch_day),
            leap_year: is_leap_year(iso_year),
        }
    }

    pub(crate) fn date_from_fields(
        self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<CalendarDate, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let iso_year = Self::iso_year(year);
        let (month, day) = check_month_day(iso_year, month, day)?;
        let epoch_day = epoch_day_from_gregorian(iso_year, i64::from(month), i64::from(day));
        Ok(self.build(epoch_day, year, month, day))
    }

    pub(crate) fn date_from_year_day(
        self,
        year: i32,
        day_of_year: i32,
    ) -> Result<CalendarDate, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let iso_year = Self::iso_year(year);
        let (month, day) = check_year_day(iso_year, day_of_year)?;
        let epoch_day = epoch_day_from_gregorian(iso_year, i64::from(month), i64::from(day));
        Ok(self.build(epoch_day, year, month, day))
    }

    pub(crate) fn date_from_epoch_day(self, epoch_day: i64) -> Result<CalendarDate, DateError> {
        iso::EPOCH_DAY_RANGE.check(DateField::EpochDay, epoch_day)?;
        let (iso_year, month, day) = gregorian_from_epoch_day(epoch_day);
        Ok(self.build(epoch_day, (iso_year - OFFSET) as i32, month, day))
    }

    pub(crate) fn is_leap_year(self, year: i32) -> bool {
        is_leap_year(Self::iso_year(year))
    }

    pub(crate) fn month_length(self, year: i32, month: i32) -> Result<i64, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let month = iso::MONTH_RANGE.check(DateField::MonthOfYear, i64::from(month))?;
        Ok(i64::from(days_in_month(Self::iso_year(year), month as u8)))
    }

    pub(crate) fn year_length(self, year: i32) -> Result<i64, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        Ok(i64::from(year_length(Self::iso_year(year))))
    }

    pub(crate) fn valid_range(self, field: DateField) -> ValueRange {
        match field {
            DateField::YearOfEra => YEAR_OF_ERA_RANGE,
            DateField::Year => YEAR_RANGE,
            DateField::ProlepticMonth => PROLEPTIC_MONTH_RANGE,
            // the year shift moves nothing else; ISO supplies the rest
            _ => iso::IsoCalendar.valid_range(field),
        }
    }
}
