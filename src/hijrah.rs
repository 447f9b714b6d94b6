//! The Hijrah (tabular Islamic) calendar engine.
//!
//! The nominal model is a 30-year cycle of 10631 days with leap years
//! {2,5,7,10,13,16,18,21,24,26,29} (355 days instead of 354); within a year
//! odd months have 30 days and even months 29, except month 12 which gains a
//! day in leap years. Deviation records patch the nominal month lengths over
//! a year/month range to match observed sightings; they are folded into
//! cumulative lookup tables at construction and invisible afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::CalendarDate;
use crate::calendar::CalendarKind;
use crate::era::{Era, HijrahEra};
use crate::error::DateError;
use crate::fields::{DateField, ValueRange};

/// Epoch day of Hijrah 1-1-1 AH (622-07-19 proleptic Gregorian, a Friday).
const HIJRAH_EPOCH_DAY: i64 = -492_148;

/// Years per cycle.
const CYCLE_YEARS: i64 = 30;

/// Days per nominal 30-year cycle.
const CYCLE_DAYS: i64 = 10_631;

/// Largest supported year of the AH era.
const MAX_HIJRAH_YEAR: i32 = 9999;

/// Smallest supported proleptic year (BEFORE_AH 9999).
const MIN_HIJRAH_YEAR: i32 = 1 - MAX_HIJRAH_YEAR;

/// Number of 30-year cycles covered by the adjusted cycle-start table, plus
/// one trailing entry so the last cycle's length stays computable.
const CYCLE_TABLE_LEN: usize = (MAX_HIJRAH_YEAR as usize).div_ceil(CYCLE_YEARS as usize) + 1;

/// Cumulative day-of-year at the start of each month (identical for common
/// and leap years; only month 12's length differs).
const NOMINAL_MONTH_STARTS: [i64; 12] =
    [0, 30, 59, 89, 118, 148, 177, 207, 236, 266, 295, 325];

/// Month lengths of a common year.
const NOMINAL_MONTH_LENGTHS: [i64; 12] = [30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29];

/// Cumulative day-of-cycle at the start of each year within a 30-year cycle.
const NOMINAL_YEAR_STARTS: [i64; 30] = [
    0, 354, 709, 1063, 1417, 1772, 2126, 2481, 2835, 3189, 3544, 3898, 4252, 4607, 4961, 5315,
    5670, 6024, 6379, 6733, 7087, 7442, 7796, 8150, 8505, 8859, 9214, 9568, 9922, 10_277,
];

pub(crate) const YEAR_RANGE: ValueRange =
    ValueRange::new(MIN_HIJRAH_YEAR as i64, MAX_HIJRAH_YEAR as i64);
pub(crate) const YEAR_OF_ERA_RANGE: ValueRange = ValueRange::new(1, MAX_HIJRAH_YEAR as i64);
pub(crate) const PROLEPTIC_MONTH_RANGE: ValueRange = ValueRange::new(
    MIN_HIJRAH_YEAR as i64 * 12,
    MAX_HIJRAH_YEAR as i64 * 12 + 11,
);
pub(crate) const ALIGNED_WEEK_OF_YEAR_RANGE: ValueRange = ValueRange::new(1, 51);
pub(crate) const ALIGNED_WEEK_OF_MONTH_RANGE: ValueRange = ValueRange::new(1, 5);

/// Whether the given proleptic Hijrah year is a nominal leap year.
const fn is_hijrah_leap_year(year: i64) -> bool {
    (14 + 11 * year).rem_euclid(30) < 11
}

/// Day-of-week for an epoch day, numbered 1 = Sunday .. 7 = Saturday.
///
/// The fixed +5 offset pins the Hijrah epoch to its Friday reference point
/// and epoch day 0 (a Thursday) to 5; it is load-bearing calibration.
const fn hijrah_day_of_week(epoch_day: i64) -> u8 {
    let folded = (epoch_day + 5).rem_euclid(7);
    if folded == 0 { 7 } else { folded as u8 }
}

/// A patch to the nominal month lengths over a half-open year/month range.
///
/// Months are 0-based (0 = Muharram). Records deserialize from host
/// configuration; an absent source is simply an empty slice, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    /// First affected year (1..=9999).
    pub start_year: i32,
    /// First affected month, 0-based.
    pub start_month: u8,
    /// Last affected year (>= `start_year`).
    pub end_year: i32,
    /// Last affected month, 0-based.
    pub end_month: u8,
    /// Day shift, within -2..=2 and nonzero.
    pub offset: i8,
}

impl Deviation {
    fn validate(&self) -> Result<(), DateError> {
        if self.start_year < 1 || self.start_year > MAX_HIJRAH_YEAR {
            return Err(DateError::InvalidDeviation {
                reason: "start year outside 1..=9999",
            });
        }
        if self.end_year < 1 || self.end_year > MAX_HIJRAH_YEAR {
            return Err(DateError::InvalidDeviation {
                reason: "end year outside 1..=9999",
            });
        }
        if self.start_month > 11 {
            return Err(DateError::InvalidDeviation {
                reason: "start month outside 0..=11",
            });
        }
        if self.end_month > 11 {
            return Err(DateError::InvalidDeviation {
                reason: "end month outside 0..=11",
            });
        }
        if (self.end_year, self.end_month) < (self.start_year, self.start_month) {
            return Err(DateError::InvalidDeviation {
                reason: "range end precedes start",
            });
        }
        if self.offset == 0 || self.offset < -2 || self.offset > 2 {
            return Err(DateError::InvalidDeviation {
                reason: "offset outside -2..=2 or zero",
            });
        }
        Ok(())
    }
}

/// The Hijrah calendar engine.
///
/// Several variants may coexist, keyed by id: the nominal tabular calendar
/// plus any deviation-patched variants the host constructs. All lookup
/// tables are precomputed; the engine is immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HijrahCalendar {
    id: String,
    calendar_type: String,
    /// Days since the Hijrah epoch at the start of each 30-year cycle.
    cycle_starts: Vec<i64>,
    /// Adjusted per-cycle year-start tables, keyed by cycle number.
    cycle_years: HashMap<i64, [i64; 30]>,
    /// Adjusted cumulative month-start tables, keyed by year.
    month_starts: HashMap<i32, [i64; 12]>,
    /// Adjusted month-length tables, keyed by year.
    month_lengths: HashMap<i32, [i64; 12]>,
    day_of_month_range: ValueRange,
    day_of_year_range: ValueRange,
    epoch_day_range: ValueRange,
}

impl HijrahCalendar {
    /// The nominal tabular calendar with no deviations applied.
    pub fn nominal() -> Self {
        // an empty deviation slice cannot fail
        Self::with_deviations("Hijrah", "islamic-civil", &[]).unwrap_or_else(|_| {
            unreachable!("nominal Hijrah construction takes no deviations")
        })
    }

    /// A variant with the given deviation records folded in, applied in
    /// order.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDeviation` for a malformed record.
    pub fn with_deviations(
        id: &str,
        calendar_type: &str,
        deviations: &[Deviation],
    ) -> Result<Self, DateError> {
        let mut cycle_starts = Vec::with_capacity(CYCLE_TABLE_LEN);
        for cycle in 0..CYCLE_TABLE_LEN {
            cycle_starts.push(cycle as i64 * CYCLE_DAYS);
        }
        let mut calendar = Self {
            id: id.to_owned(),
            calendar_type: calendar_type.to_owned(),
            cycle_starts,
            cycle_years: HashMap::new(),
            month_starts: HashMap::new(),
            month_lengths: HashMap::new(),
            day_of_month_range: ValueRange::with_smallest_max(1, 29, 30),
            day_of_year_range: ValueRange::with_smallest_max(1, 354, 355),
            epoch_day_range: ValueRange::new(0, 0),
        };
        for deviation in deviations {
            deviation.validate()?;
            calendar.apply_deviation(deviation);
        }
        calendar.recompute_ranges();
        Ok(calendar)
    }

    /// Registry id of this variant.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Locale calendar type of this variant.
    pub fn calendar_type(&self) -> &str {
        &self.calendar_type
    }

    fn nominal_month_lengths(year: i32) -> [i64; 12] {
        let mut lengths = NOMINAL_MONTH_LENGTHS;
        if is_hijrah_leap_year(i64::from(year)) {
            lengths[11] += 1;
        }
        lengths
    }

    fn month_starts_for(&self, year: i32) -> [i64; 12] {
        self.month_starts
            .get(&year)
            .copied()
            .unwrap_or(NOMINAL_MONTH_STARTS)
    }

    fn month_lengths_for(&self, year: i32) -> [i64; 12] {
        self.month_lengths
            .get(&year)
            .copied()
            .unwrap_or_else(|| Self::nominal_month_lengths(year))
    }

    fn cycle_years_for(&self, cycle: i64) -> [i64; 30] {
        self.cycle_years
            .get(&cycle)
            .copied()
            .unwrap_or(NOMINAL_YEAR_STARTS)
    }

    fn cycle_start(&self, cycle: i64) -> i64 {
        if cycle >= 0 && (cycle as usize) < self.cycle_starts.len() {
            self.cycle_starts[cycle as usize]
        } else {
            cycle * CYCLE_DAYS
        }
    }

    /// Folds one deviation into the cumulative tables, exactly mirroring the
    /// cycle bookkeeping: the start side subtracts the offset going forward,
    /// the end side adds it back, leaving only the covered range shifted.
    fn apply_deviation(&mut self, deviation: &Deviation) {
        let offset = i64::from(deviation.offset);
        let start_year = deviation.start_year;
        let end_year = deviation.end_year;
        let start_month = usize::from(deviation.start_month);
        let end_month = usize::from(deviation.end_month);

        // start year: months after the start month begin earlier,
        // the start month itself shrinks
        let mut starts = self.month_starts_for(start_year);
        for entry in starts.iter_mut().skip(start_month + 1) {
            *entry -= offset;
        }
        self.month_starts.insert(start_year, starts);
        let mut lengths = self.month_lengths_for(start_year);
        lengths[start_month] -= offset;
        self.month_lengths.insert(start_year, lengths);

        if start_year != end_year {
            // years after the start year within its cycle begin earlier
            let start_cycle = i64::from(start_year - 1) / CYCLE_YEARS;
            let start_in_cycle = usize::try_from(i64::from(start_year - 1) % CYCLE_YEARS)
                .unwrap_or(0);
            let mut years = self.cycle_years_for(start_cycle);
            for entry in years.iter_mut().skip(start_in_cycle + 1) {
                *entry -= offset;
            }
            self.cycle_years.insert(start_cycle, years);

            let end_cycle = i64::from(end_year - 1) / CYCLE_YEARS;
            if start_cycle != end_cycle {
                // the shift crosses a 30-year boundary: push it through the
                // global cycle table, restoring it after the end cycle
                for cycle in (start_cycle + 1) as usize..self.cycle_starts.len() {
                    self.cycle_starts[cycle] -= offset;
                }
                for cycle in (end_cycle + 1) as usize..self.cycle_starts.len() {
                    self.cycle_starts[cycle] += offset;
                }
            }

            // years after the end year within its cycle are restored
            let end_in_cycle = usize::try_from(i64::from(end_year - 1) % CYCLE_YEARS).unwrap_or(0);
            let mut years = self.cycle_years_for(end_cycle);
            for entry in years.iter_mut().skip(end_in_cycle + 1) {
                *entry += offset;
            }
            self.cycle_years.insert(end_cycle, years);
        }

        // end year: months after the end month are restored,
        // the end month itself grows
        let mut starts = self.month_starts_for(end_year);
        for entry in starts.iter_mut().skip(end_month + 1) {
            *entry += offset;
        }
        self.month_starts.insert(end_year, starts);
        let mut lengths = self.month_lengths_for(end_year);
        lengths[end_month] += offset;
        self.month_lengths.insert(end_year, lengths);
    }

    /// Recomputes the global day-of-month / day-of-year bounds and the
    /// supported epoch-day span from the (possibly adjusted) tables.
    fn recompute_ranges(&mut self) {
        let mut smallest_month = 29;
        let mut largest_month = 30;
        let mut smallest_year = 354;
        let mut largest_year = 355;
        let adjusted_years: Vec<i32> = self.month_lengths.keys().copied().collect();
        for year in adjusted_years {
            for length in self.month_lengths_for(year) {
                smallest_month = smallest_month.min(length);
                largest_month = largest_month.max(length);
            }
            let length = self.year_length(year);
            smallest_year = smallest_year.min(length);
            largest_year = largest_year.max(length);
        }
        self.day_of_month_range = ValueRange::with_smallest_max(1, smallest_month, largest_month);
        self.day_of_year_range = ValueRange::with_smallest_max(1, smallest_year, largest_year);
        let max_month_length = self.month_length_unchecked(MAX_HIJRAH_YEAR, 12);
        self.epoch_day_range = ValueRange::new(
            self.epoch_day_for(MIN_HIJRAH_YEAR, 1, 1),
            self.epoch_day_for(MAX_HIJRAH_YEAR, 12, max_month_length),
        );
    }

    fn month_length_unchecked(&self, year: i32, month: i32) -> i64 {
        self.month_lengths_for(year)[(month - 1) as usize]
    }

    fn year_length(&self, year: i32) -> i64 {
        let year_index = i64::from(year) - 1;
        let cycle = year_index.div_euclid(CYCLE_YEARS);
        let in_cycle = year_index.rem_euclid(CYCLE_YEARS) as usize;
        let years = self.cycle_years_for(cycle);
        let next_start = if in_cycle == 29 {
            self.cycle_start(cycle + 1) - self.cycle_start(cycle)
        } else {
            years[in_cycle + 1]
        };
        next_start - years[in_cycle]
    }

    /// Epoch day for an already-validated (year, month, day).
    fn epoch_day_for(&self, year: i32, month: i32, day: i64) -> i64 {
        let year_index = i64::from(year) - 1;
        let cycle = year_index.div_euclid(CYCLE_YEARS);
        let in_cycle = year_index.rem_euclid(CYCLE_YEARS) as usize;
        let day_of_year = self.month_starts_for(year)[(month - 1) as usize] + day - 1;
        HIJRAH_EPOCH_DAY
            + self.cycle_start(cycle)
            + self.cycle_years_for(cycle)[in_cycle]
            + day_of_year
    }

    /// Splits an epoch day into (year, 0-based day-of-year).
    fn year_and_day(&self, epoch_day: i64) -> (i32, i64) {
        let days = epoch_day - HIJRAH_EPOCH_DAY;
        if days >= 0 {
            // the cycle whose (possibly adjusted) start is the greatest
            // value <= days
            let cycle = self.cycle_starts.partition_point(|&start| start <= days) - 1;
            let in_cycle = days - self.cycle_starts[cycle];
            let years = self.cycle_years_for(cycle as i64);
            let year_in_cycle = (0..30)
                .rev()
                .find(|&index| years[index] <= in_cycle)
                .unwrap_or(0);
            let year = cycle as i64 * CYCLE_YEARS + year_in_cycle as i64 + 1;
            (year as i32, in_cycle - years[year_in_cycle])
        } else {
            // before the Hijrah epoch: same math mirrored through floor
            // division over the nominal tables (deviations never reach here)
            let cycle = days.div_euclid(CYCLE_DAYS);
            let in_cycle = days.rem_euclid(CYCLE_DAYS);
            let year_in_cycle = (0..30)
                .rev()
                .find(|&index| NOMINAL_YEAR_STARTS[index] <= in_cycle)
                .unwrap_or(0);
            let year = cycle * CYCLE_YEARS + year_in_cycle as i64 + 1;
            (year as i32, in_cycle - NOMINAL_YEAR_STARTS[year_in_cycle])
        }
    }

    fn build(&self, epoch_day: i64, year: i32, month: u8, day: u8, day_of_year: u16) -> CalendarDate {
        let (era, year_of_era) = if year >= 1 {
            (HijrahEra::Ah, year)
        } else {
            (HijrahEra::BeforeAh, 1 - year)
        };
        CalendarDate {
            calendar: CalendarKind::Hijrah,
            epoch_day,
            era: Era::Hijrah(era),
            year_of_era,
            proleptic_year: year,
            month,
            day,
            day_of_year,
            day_of_week: hijrah_day_of_week(epoch_day),
            leap_year: is_hijrah_leap_year(i64::from(year)),
        }
    }

    pub(crate) fn date_from_fields(
        &self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<CalendarDate, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let month = ValueRange::new(1, 12).check(DateField::MonthOfYear, i64::from(month))? as i32;
        let max_day = self.month_length_unchecked(year, month);
        let day = ValueRange::new(1, max_day).check(DateField::DayOfMonth, i64::from(day))?;
        let epoch_day = self.epoch_day_for(year, month, day);
        let day_of_year = self.month_starts_for(year)[(month - 1) as usize] + day;
        Ok(self.build(epoch_day, year, month as u8, day as u8, day_of_year as u16))
    }

    pub(crate) fn date_from_year_day(
        &self,
        year: i32,
        day_of_year: i32,
    ) -> Result<CalendarDate, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let length = self.year_length(year);
        let day_of_year =
            ValueRange::new(1, length).check(DateField::DayOfYear, i64::from(day_of_year))?;
        let starts = self.month_starts_for(year);
        let month_index = (0..12)
            .rev()
            .find(|&index| starts[index] < day_of_year)
            .unwrap_or(0);
        let day = day_of_year - starts[month_index];
        let epoch_day = self.epoch_day_for(year, month_index as i32 + 1, day);
        Ok(self.build(
            epoch_day,
            year,
            month_index as u8 + 1,
            day as u8,
            day_of_year as u16,
        ))
    }

    pub(crate) fn date_from_epoch_day(&self, epoch_day: i64) -> Result<CalendarDate, DateError> {
        self.epoch_day_range.check(DateField::EpochDay, epoch_day)?;
        let (year, day_of_year0) = self.year_and_day(epoch_day);
        let starts = self.month_starts_for(year);
        let month_index = (0..12)
            .rev()
            .find(|&index| starts[index] <= day_of_year0)
            .unwrap_or(0);
        let day = day_of_year0 - starts[month_index] + 1;
        Ok(self.build(
            epoch_day,
            year,
            month_index as u8 + 1,
            day as u8,
            (day_of_year0 + 1) as u16,
        ))
    }

    pub(crate) fn is_leap_year(&self, year: i32) -> bool {
        is_hijrah_leap_year(i64::from(year))
    }

    pub(crate) fn month_length(&self, year: i32, month: i32) -> Result<i64, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        let month = ValueRange::new(1, 12).check(DateField::MonthOfYear, i64::from(month))?;
        Ok(self.month_length_unchecked(year, month as i32))
    }

    pub(crate) fn checked_year_length(&self, year: i32) -> Result<i64, DateError> {
        YEAR_RANGE.check(DateField::Year, i64::from(year))?;
        Ok(self.year_length(year))
    }

    pub(crate) fn valid_range(&self, field: DateField) -> ValueRange {
        match field {
            DateField::Era => ValueRange::new(0, 1),
            DateField::YearOfEra => YEAR_OF_ERA_RANGE,
            DateField::Year => YEAR_RANGE,
            DateField::MonthOfYear => ValueRange::new(1, 12),
            DateField::ProlepticMonth => PROLEPTIC_MONTH_RANGE,
            DateField::DayOfMonth => self.day_of_month_range,
            DateField::DayOfYear => self.day_of_year_range,
            DateField::DayOfWeek
            | DateField::AlignedDayOfWeekInMonth
            | DateField::AlignedDayOfWeekInYear => ValueRange::new(1, 7),
            DateField::AlignedWeekOfMonth => ALIGNED_WEEK_OF_MONTH_RANGE,
            DateField::AlignedWeekOfYear => ALIGNED_WEEK_OF_YEAR_RANGE,
            DateField::EpochDay => self.epoch_day_range,
        }
    }
}
