//! The Japanese Imperial calendar engine.
//!
//! ISO months and days; the era and year-of-era are derived from a table of
//! era start dates. The table ships with Seireki through Reiwa and may be
//! extended with configured successor eras at construction time; it is fixed
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::CalendarDate;
use crate::calendar::CalendarKind;
use crate::epoch::{
    day_of_year, days_in_month, epoch_day_from_gregorian, gregorian_from_epoch_day, is_leap_year,
    iso_day_of_week, year_length,
};
use crate::era::{Era, JapaneseEra};
use crate::error::DateError;
use crate::fields::{DateField, ValueRange};
use crate::iso::{self, check_month_day, check_year_day};

const MIN_YEAR: i64 = 1;
const MAX_YEAR: i64 = 9999;

pub(crate) const YEAR_RANGE: ValueRange = ValueRange::new(MIN_YEAR, MAX_YEAR);
pub(crate) const PROLEPTIC_MONTH_RANGE: ValueRange =
    ValueRange::new(MIN_YEAR * 12, MAX_YEAR * 12 + 11);
pub(crate) const EPOCH_DAY_RANGE: ValueRange = ValueRange::new(
    epoch_day_from_gregorian(MIN_YEAR, 1, 1),
    epoch_day_from_gregorian(MAX_YEAR, 12, 31),
);

/// One configured era, applied on top of the built-in table at construction.
///
/// Rows deserialize from host configuration; the era value is assigned from
/// the position after the built-in eras (6, 7, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapaneseEraRow {
    /// Display name of the era.
    pub name: String,
    /// ISO year the era starts in.
    pub since_year: i32,
    /// Month of the era's first day.
    pub since_month: u8,
    /// Day of month of the era's first day.
    pub since_day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EraDef {
    era: JapaneseEra,
    name: String,
    since_year: i32,
    since_epoch_day: i64,
}

impl EraDef {
    fn builtin(era: JapaneseEra, name: &str, year: i32, month: i64, day: i64) -> Self {
        Self {
            era,
            name: name.to_owned(),
            since_year: year,
            since_epoch_day: epoch_day_from_gregorian(i64::from(year), month, day),
        }
    }
}

/// The Japanese Imperial calendar engine.
///
/// The proleptic year axis is the ISO year axis; only era presentation
/// differs. Supported years are 1..=9999.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JapaneseCalendar {
    eras: Vec<EraDef>,
}

impl Default for JapaneseCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl JapaneseCalendar {
    /// Engine with the built-in era table (Seireki through Reiwa).
    pub fn new() -> Self {
        Self {
            eras: vec![
                EraDef::builtin(JapaneseEra::SEIREKI, "Seireki", 1, 1, 1),
                EraDef::builtin(JapaneseEra::MEIJI, "Meiji", 1868, 1, 1),
                EraDef::builtin(JapaneseEra::TAISHO, "Taisho", 1912, 7, 30),
                EraDef::builtin(JapaneseEra::SHOWA, "Showa", 1926, 12, 25),
                EraDef::builtin(JapaneseEra::HEISEI, "Heisei", 1989, 1, 8),
                EraDef::builtin(JapaneseEra::REIWA, "Reiwa", 2019, 5, 1),
            ],
        }
    }

    /// Engine extended with configured eras after Reiwa.
    ///
    /// Each row's start date must be a valid date strictly after the
    /// previous era's start; values continue from 6 in row order. The era
    /// set is fixed once this returns.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` for a malformed start date and
    /// `DateError::InvalidEra` for a non-monotonic one.
    pub fn with_extra_eras(rows: &[JapaneseEraRow]) -> Result<Self, DateError> {
        let mut calendar = Self::new();
        for (index, row) in rows.iter().enumerate() {
            let value = 6 + index as i32;
            YEAR_RANGE.check(DateField::Year, i64::from(row.since_year))?;
            let (month, day) = check_month_day(
                i64::from(row.since_year),
                i32::from(row.since_month),
                i32::from(row.since_day),
            )?;
            let since_epoch_day = epoch_day_from_gregorian(
                i64::from(row.since_year),
                i64::from(month),
                i64::from(day),
            );
            if let Some(last) = calendar.eras.last() {
                if since_epoch_day <= last.since_epoch_day {
                    return Err(DateError::InvalidEra {
                        era: i64::from(value),
                        calendar: "Japanese",
                    });
                }
            }
            calendar.eras.push(EraDef {
                era: JapaneseEra::from(value),
                name: row.name.clone(),
                since_year: row.since_year,
                since_epoch_day,
            });
        }
        Ok(calendar)
    }

    fn era_for(&self, epoch_day: i64) -> &EraDef {
        self.eras
            .iter()
            .rev()
            .find(|def| def.since_epoch_day <= epoch_day)
            .unwrap_or(&self.eras[0])
    }

    fn def_of(&self, era: JapaneseEra) -> Result<&EraDef, DateError> {
        self.eras
            .iter()
            .find(|def| def.era == era)
            .ok_or(DateError::InvalidEra {
                era: i64::from(era.value()),
                calendar: "Japanese",
            })
    }

    fn build(&self, epoch_day: i64, year: i32, month: u8, day: u8) -> CalendarDate {
        let def = self.era_for(epoch_day);
        CalendarDate {
            calendar: CalendarKind::Japanese,
            epoch_day,
            era: Era::Japanese(def.era),
            year_of_era: year - def.since_year + 1,
            proleptic_year: year,
            month,
            day,
            day_of_year: day_of_year(i64::from(year), month, day),
            day_of_week: iso_day_of_week(epoch_day),
            leap_year: is_leap_year(i64::from(year)),
        }
    }

    pub(crate) fn date_from_fields(
        &self,
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
        &self,
        year: i32,
        day_of_year: i32,
    ) -> Result<CalendarDate, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let (month, day) = check_year_day(year64, day_of_year)?;
        let epoch_day = epoch_day_from_gregorian(year64, i64::from(month), i64::from(day));
        Ok(self.build(epoch_day, year, month, day))
    }

    pub(crate) fn date_from_epoch_day(&self, epoch_day: i64) -> Result<CalendarDate, DateError> {
        EPOCH_DAY_RANGE.check(DateField::EpochDay, epoch_day)?;
        let (year, month, day) = gregorian_from_epoch_day(epoch_day);
        Ok(self.build(epoch_day, year as i32, month, day))
    }

    pub(crate) fn is_leap_year(&self, year: i32) -> bool {
        is_leap_year(i64::from(year))
    }

    pub(crate) fn proleptic_year(&self, era: JapaneseEra, year_of_era: i32) -> Result<i32, DateError> {
        let def = self.def_of(era)?;
        let year = i64::from(def.since_year) + i64::from(year_of_era) - 1;
        year.try_into().map_err(|_| DateError::ArithmeticOverflow {
            operation: "proleptic_year",
        })
    }

    pub(crate) fn era_of(&self, value: i32) -> Result<Era, DateError> {
        self.def_of(JapaneseEra::from(value))
            .map(|def| Era::Japanese(def.era))
    }

    pub(crate) fn eras(&self) -> Vec<Era> {
        self.eras.iter().map(|def| Era::Japanese(def.era)).collect()
    }

    /// Display name for an era of this calendar, if the table maps it.
    pub fn era_name(&self, era: JapaneseEra) -> Option<&str> {
        self.eras
            .iter()
            .find(|def| def.era == era)
            .map(|def| def.name.as_str())
    }

    pub(crate) fn month_length(&self, year: i32, month: i32) -> Result<i64, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let month = iso::MONTH_RANGE.check(DateField::MonthOfYear, i64::from(month))?;
        Ok(i64::from(days_in_month(year64, month as u8)))
    }

    pub(crate) fn year_length(&self, year: i32) -> Result<i64, DateError> {
        let year64 = YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        Ok(i64::from(year_length(year64)))
    }

    pub(crate) fn valid_range(&self, field: DateField) -> ValueRange {
        match field {
            DateField::Era => {
                let newest = self.eras.last().map_or(5, |def| def.era.value());
                ValueRange::new(0, i64::from(newest))
            }
            // bounded by how far the newest era can run
            DateField::YearOfEra => {
                let since = self.eras.last().map_or(1, |def| def.since_year);
                ValueRange::new(1, MAX_YEAR - i64::from(since) + 1)
            }
            DateField::Year => YEAR_RANGE,
            DateField::ProlepticMonth => PROLEPTIC_MONTH_RANGE,
            DateField::EpochDay => EPOCH_DAY_RANGE,
            _ => iso::IsoCalendar.valid_range(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_boundaries() {
        struct TestCase {
            date: (i32, i32, i32),
            era: JapaneseEra,
            year_of_era: i32,
        }

        let cases = [
            TestCase {
                date: (1912, 7, 29),
                era: JapaneseEra::MEIJI,
                year_of_era: 45,
            },
            TestCase {
                date: (1912, 7, 30),
                era: JapaneseEra::TAISHO,
                year_of_era: 1,
            },
            TestCase {
                date: (1926, 12, 24),
                era: JapaneseEra::TAISHO,
                year_of_era: 15,
            },
            TestCase {
                date: (1926, 12, 25),
                era: JapaneseEra::SHOWA,
                year_of_era: 1,
            },
            TestCase {
                date: (1989, 1, 7),
                era: JapaneseEra::SHOWA,
                year_of_era: 64,
            },
            TestCase {
                date: (1989, 1, 8),
                era: JapaneseEra::HEISEI,
                year_of_era: 1,
            },
            TestCase {
                date: (2019, 4, 30),
                era: JapaneseEra::HEISEI,
                year_of_era: 31,
            },
            TestCase {
                date: (2019, 5, 1),
                era: JapaneseEra::REIWA,
                year_of_era: 1,
            },
            TestCase {
                date: (1867, 12, 31),
                era: JapaneseEra::SEIREKI,
                year_of_era: 1867,
            },
        ];

        let calendar = JapaneseCalendar::new();
        for case in &cases {
            let (y, m, d) = case.date;
            let date = calendar.date_from_fields(y, m, d).unwrap();
            assert_eq!(
                date.era(),
                Era::Japanese(case.era),
                "era for {y}-{m:02}-{d:02}"
            );
            assert_eq!(
                date.year_of_era(),
                case.year_of_era,
                "year of era for {y}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn test_boundary_is_one_day_wide() {
        let calendar = JapaneseCalendar::new();
        let before = calendar.date_from_fields(2019, 4, 30).unwrap();
        let after = calendar.date_from_epoch_day(before.epoch_day() + 1).unwrap();
        assert_eq!(after.era(), Era::Japanese(JapaneseEra::REIWA));
        assert_eq!(after.year_of_era(), 1);
    }

    #[test]
    fn test_proleptic_year_is_iso_year() {
        let calendar = JapaneseCalendar::new();
        assert_eq!(
            calendar.proleptic_year(JapaneseEra::HEISEI, 18).unwrap(),
            2006
        );
        assert_eq!(calendar.proleptic_year(JapaneseEra::REIWA, 1).unwrap(), 2019);
        assert_eq!(calendar.proleptic_year(JapaneseEra::SEIREKI, 800).unwrap(), 800);
        assert!(calendar.proleptic_year(JapaneseEra::from(9), 1).is_err());
    }

    #[test]
    fn test_era_of() {
        let calendar = JapaneseCalendar::new();
        assert_eq!(
            calendar.era_of(3).unwrap(),
            Era::Japanese(JapaneseEra::SHOWA)
        );
        assert!(matches!(
            calendar.era_of(6),
            Err(DateError::InvalidEra {
                era: 6,
                calendar: "Japanese",
            })
        ));
        assert_eq!(calendar.era_name(JapaneseEra::SHOWA), Some("Showa"));
    }

    #[test]
    fn test_extra_eras() {
        let rows = [JapaneseEraRow {
            name: "Kibo".to_owned(),
            since_year: 2063,
            since_month: 4,
            since_day: 1,
        }];
        let calendar = JapaneseCalendar::with_extra_eras(&rows).unwrap();
        let date = calendar.date_from_fields(2064, 1, 1).unwrap();
        assert_eq!(date.era(), Era::Japanese(JapaneseEra::from(6)));
        assert_eq!(date.year_of_era(), 2);
        assert_eq!(calendar.era_name(JapaneseEra::from(6)), Some("Kibo"));
        assert_eq!(calendar.valid_range(DateField::Era).max(), 6);

        // before the configured era nothing changes
        let date = calendar.date_from_fields(2020, 1, 1).unwrap();
        assert_eq!(date.era(), Era::Japanese(JapaneseEra::REIWA));
    }

    #[test]
    fn test_extra_era_rejects_regression() {
        let rows = [JapaneseEraRow {
            name: "Backwards".to_owned(),
            since_year: 1950,
            since_month: 1,
            since_day: 1,
        }];
        let result = JapaneseCalendar::with_extra_eras(&rows);
        assert!(matches!(result, Err(DateError::InvalidEra { era: 6, .. })));

        let rows = [JapaneseEraRow {
            name: "Nonexistent".to_owned(),
            since_year: 2063,
            since_month: 2,
            since_day: 30,
        }];
        assert!(matches!(
            JapaneseCalendar::with_extra_eras(&rows),
            Err(DateError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_era_row_deserializes() {
        let row: JapaneseEraRow =
            serde_json::from_str(r#"{"name":"Kibo","since_year":2063,"since_month":4,"since_day":1}"#)
                .unwrap();
        assert_eq!(row.name, "Kibo");
        assert_eq!(row.since_year, 2063);
    }

    #[test]
    fn test_year_of_era_range_tracks_newest_era() {
        let calendar = JapaneseCalendar::new();
        let range = calendar.valid_range(DateField::YearOfEra);
        assert_eq!(range.min(), 1);
        assert_eq!(range.max(), 9999 - 2019 + 1);

        let rows = [JapaneseEraRow {
            name: "Kibo".to_owned(),
            since_year: 2063,
            since_month: 4,
            since_day: 1,
        }];
        let extended = JapaneseCalendar::with_extra_eras(&rows).unwrap();
        assert_eq!(
            extended.valid_range(DateField::YearOfEra).max(),
            9999 - 2063 + 1
        );
    }

    #[test]
    fn test_round_trip() {
        let calendar = JapaneseCalendar::new();
        let mut epoch_day = -500_000;
        while epoch_day < 500_000 {
            let date = calendar.date_from_epoch_day(epoch_day).unwrap();
            let back = calendar
                .date_from_fields(
                    date.proleptic_year(),
                    i32::from(date.month()),
                    i32::from(date.day()),
                )
                .unwrap();
            assert_eq!(back.epoch_day(), epoch_day);
            epoch_day += 1019;
        }
    }

    #[test]
    fn test_year_bounds() {
        let calendar = JapaneseCalendar::new();
        assert!(calendar.date_from_fields(0, 1, 1).is_err());
        assert!(calendar.date_from_fields(10_000, 1, 1).is_err());
        assert!(calendar.date_from_fields(9999, 12, 31).is_ok());
    }
}
