//! Generic field resolution: turning an unordered bag of date fields into a
//! concrete date under a strictness mode.
//!
//! The algorithm runs a fixed precedence order, each step consuming the
//! fields it understands: an epoch day is authoritative; a proleptic month
//! splits into year and month through a reference date; year-of-era combines
//! with an era (given, inferred from the year, or assumed newest); then the
//! first matching field group builds the date. "Not enough fields" is a
//! normal outcome, reported as [`Resolution::Incomplete`] rather than an
//! error.

use crate::CalendarDate;
use crate::calendar::Calendar;
use crate::clock::Clock;
use crate::error::DateError;
use crate::fields::{DateField, FieldBag};
use crate::prelude::*;

/// How strictly field combinations are validated during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ResolutionMode {
    /// Every field must validate exactly; no clamping, no correction.
    #[display(fmt = "STRICT")]
    Strict,
    /// Sensible corrections: an overlarge day-of-month clamps to the last
    /// day of its month.
    #[display(fmt = "SMART")]
    Smart,
    /// Arithmetic rolling: out-of-range values spill into adjacent months
    /// and years.
    #[display(fmt = "LENIENT")]
    Lenient,
}

/// Outcome of a resolution that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The fields identified exactly one date.
    Resolved(CalendarDate),
    /// Too few fields were supplied to identify any known combination.
    Incomplete,
}

/// Resolves a field bag into a single date under the given mode.
///
/// Fields are removed from the bag as they are consumed. Under STRICT and
/// SMART, fields left over after a successful resolution are cross-checked
/// against the resolved date; LENIENT ignores them.
///
/// # Errors
/// Returns `DateError::ConflictingFields` when bound values disagree,
/// `DateError::InconsistentResolution` when a computed date escapes its
/// requested month or year, and `DateError::InvalidDate` /
/// `DateError::InvalidEra` for out-of-range pieces.
pub fn resolve_date(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
    clock: &dyn Clock,
) -> Result<Resolution, DateError> {
    // an epoch day is authoritative: all other fields are ignored
    if let Some(epoch_day) = bag.remove(DateField::EpochDay) {
        return calendar
            .date_from_epoch_day(epoch_day)
            .map(Resolution::Resolved);
    }
    resolve_proleptic_month(calendar, bag, mode, clock)?;
    resolve_year_of_era(calendar, bag, mode)?;
    match build_date(calendar, bag, mode)? {
        Some(date) => {
            if mode != ResolutionMode::Lenient {
                cross_check(&date, bag)?;
            }
            Ok(Resolution::Resolved(date))
        }
        None => Ok(Resolution::Incomplete),
    }
}

fn checked(calendar: &Calendar, field: DateField, value: i64) -> Result<i64, DateError> {
    calendar.valid_range(field).check(field, value)
}

fn to_i32(value: i64, operation: &'static str) -> Result<i32, DateError> {
    value
        .try_into()
        .map_err(|_| DateError::ArithmeticOverflow { operation })
}

fn sub_one(value: i64) -> Result<i64, DateError> {
    value.checked_sub(1).ok_or(DateError::ArithmeticOverflow {
        operation: "resolve_date",
    })
}

/// Removes a field the dispatch has already established to be present.
fn take(bag: &mut FieldBag, field: DateField) -> i64 {
    bag.remove(field).unwrap_or_default()
}

/// Splits PROLEPTIC_MONTH into YEAR and MONTH_OF_YEAR by shifting a
/// reference date (today, pinned to day 1) by the month delta, merging both
/// derived fields with conflict checking.
fn resolve_proleptic_month(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
    clock: &dyn Clock,
) -> Result<(), DateError> {
    let Some(proleptic_month) = bag.remove(DateField::ProlepticMonth) else {
        return Ok(());
    };
    if mode != ResolutionMode::Lenient {
        checked(calendar, DateField::ProlepticMonth, proleptic_month)?;
    }
    let today = calendar.date_now(clock)?;
    let reference =
        calendar.date_from_fields(today.proleptic_year(), i32::from(today.month()), 1)?;
    let delta = proleptic_month
        .checked_sub(reference.proleptic_month())
        .ok_or(DateError::ArithmeticOverflow {
            operation: "resolve_date",
        })?;
    let shifted = calendar.plus_months(&reference, delta)?;
    bag.merge(DateField::MonthOfYear, i64::from(shifted.month()))?;
    bag.merge(DateField::Year, i64::from(shifted.proleptic_year()))?;
    Ok(())
}

/// Combines YEAR_OF_ERA with an era into YEAR: an explicit ERA wins, then an
/// era probed from an already-present YEAR, otherwise the newest era is
/// assumed (except under STRICT, which defers by reinstating the field).
fn resolve_year_of_era(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<(), DateError> {
    let Some(raw) = bag.remove(DateField::YearOfEra) else {
        if let Some(era_value) = bag.get(DateField::Era) {
            // a bare era is validated but left for the cross-check
            calendar.era_of(to_i32(era_value, "resolve_date")?)?;
        }
        return Ok(());
    };
    let year_of_era = if mode == ResolutionMode::Lenient {
        raw
    } else {
        checked(calendar, DateField::YearOfEra, raw)?
    };
    let year_of_era = to_i32(year_of_era, "resolve_date")?;
    if let Some(era_value) = bag.remove(DateField::Era) {
        let era = calendar.era_of(to_i32(era_value, "resolve_date")?)?;
        let year = calendar.proleptic_year(era, year_of_era)?;
        bag.merge(DateField::Year, i64::from(year))?;
    } else if let Some(year) = bag.get(DateField::Year) {
        let year = to_i32(checked(calendar, DateField::Year, year)?, "resolve_date")?;
        let probe = calendar.date_from_year_day(year, 1)?;
        let combined = calendar.proleptic_year(probe.era(), year_of_era)?;
        bag.merge(DateField::Year, i64::from(combined))?;
    } else if mode == ResolutionMode::Strict {
        // do not invent an era: reinstate the field untouched
        bag.insert(DateField::YearOfEra, raw);
    } else if let Some(era) = calendar.eras().last().copied() {
        let year = calendar.proleptic_year(era, year_of_era)?;
        bag.merge(DateField::Year, i64::from(year))?;
    } else {
        bag.merge(DateField::Year, i64::from(year_of_era))?;
    }
    Ok(())
}

/// Builds the date from the first matching field group, in priority order.
fn build_date(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<Option<CalendarDate>, DateError> {
    if !bag.contains(DateField::Year) {
        return Ok(None);
    }
    if bag.contains(DateField::MonthOfYear) {
        if bag.contains(DateField::DayOfMonth) {
            return resolve_ymd(calendar, bag, mode).map(Some);
        }
        if bag.contains(DateField::AlignedWeekOfMonth) {
            if bag.contains(DateField::AlignedDayOfWeekInMonth) {
                return resolve_month_aligned_day(calendar, bag, mode).map(Some);
            }
            if bag.contains(DateField::DayOfWeek) {
                return resolve_month_day_of_week(calendar, bag, mode).map(Some);
            }
        }
    }
    if bag.contains(DateField::DayOfYear) {
        return resolve_year_day(calendar, bag, mode).map(Some);
    }
    if bag.contains(DateField::AlignedWeekOfYear) {
        if bag.contains(DateField::AlignedDayOfWeekInYear) {
            return resolve_year_aligned_day(calendar, bag, mode).map(Some);
        }
        if bag.contains(DateField::DayOfWeek) {
            return resolve_year_day_of_week(calendar, bag, mode).map(Some);
        }
    }
    Ok(None)
}

/// YEAR is range-validated in every mode, including LENIENT.
fn take_year(calendar: &Calendar, bag: &mut FieldBag) -> Result<i32, DateError> {
    let year = checked(calendar, DateField::Year, take(bag, DateField::Year))?;
    to_i32(year, "resolve_date")
}

fn resolve_ymd(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<CalendarDate, DateError> {
    let year = take_year(calendar, bag)?;
    match mode {
        ResolutionMode::Lenient => {
            let months = sub_one(take(bag, DateField::MonthOfYear))?;
            let days = sub_one(take(bag, DateField::DayOfMonth))?;
            let base = calendar.date_from_fields(year, 1, 1)?;
            let date = calendar.plus_months(&base, months)?;
            calendar.plus_days(&date, days)
        }
        ResolutionMode::Smart => {
            let month = to_i32(
                checked(calendar, DateField::MonthOfYear, take(bag, DateField::MonthOfYear))?,
                "resolve_date",
            )?;
            let day = checked(calendar, DateField::DayOfMonth, take(bag, DateField::DayOfMonth))?;
            // clamp to the last valid day rather than rolling over
            let day = day.min(calendar.month_length(year, month)?);
            calendar.date_from_fields(year, month, day as i32)
        }
        ResolutionMode::Strict => {
            let month = to_i32(
                checked(calendar, DateField::MonthOfYear, take(bag, DateField::MonthOfYear))?,
                "resolve_date",
            )?;
            let day = to_i32(
                checked(calendar, DateField::DayOfMonth, take(bag, DateField::DayOfMonth))?,
                "resolve_date",
            )?;
            calendar.date_from_fields(year, month, day)
        }
    }
}

/// Rejects a computed date that escaped its requested containing field.
fn check_containment(
    date: &CalendarDate,
    field: DateField,
    expected: i64,
) -> Result<(), DateError> {
    let actual = date.field(field);
    if actual == expected {
        Ok(())
    } else {
        Err(DateError::InconsistentResolution {
            field,
            expected,
            actual,
        })
    }
}

fn resolve_month_aligned_day(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<CalendarDate, DateError> {
    let year = take_year(calendar, bag)?;
    if mode == ResolutionMode::Lenient {
        let months = sub_one(take(bag, DateField::MonthOfYear))?;
        let weeks = sub_one(take(bag, DateField::AlignedWeekOfMonth))?;
        let days = sub_one(take(bag, DateField::AlignedDayOfWeekInMonth))?;
        let base = calendar.date_from_fields(year, 1, 1)?;
        let date = calendar.plus_months(&base, months)?;
        let offset = weeks
            .checked_mul(7)
            .and_then(|days_of_weeks| days_of_weeks.checked_add(days))
            .ok_or(DateError::ArithmeticOverflow {
                operation: "resolve_date",
            })?;
        return calendar.plus_days(&date, offset);
    }
    let month = to_i32(
        checked(calendar, DateField::MonthOfYear, take(bag, DateField::MonthOfYear))?,
        "resolve_date",
    )?;
    let week = checked(
        calendar,
        DateField::AlignedWeekOfMonth,
        take(bag, DateField::AlignedWeekOfMonth),
    )?;
    let day = checked(
        calendar,
        DateField::AlignedDayOfWeekInMonth,
        take(bag, DateField::AlignedDayOfWeekInMonth),
    )?;
    let base = calendar.date_from_fields(year, month, 1)?;
    let date = calendar.plus_days(&base, (week - 1) * 7 + (day - 1))?;
    check_containment(&date, DateField::MonthOfYear, i64::from(month))?;
    Ok(date)
}

fn resolve_month_day_of_week(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<CalendarDate, DateError> {
    let year = take_year(calendar, bag)?;
    if mode == ResolutionMode::Lenient {
        let months = sub_one(take(bag, DateField::MonthOfYear))?;
        let weeks = sub_one(take(bag, DateField::AlignedWeekOfMonth))?;
        let day_of_week = take(bag, DateField::DayOfWeek);
        let base = calendar.date_from_fields(year, 1, 1)?;
        let base = calendar.plus_months(&base, months)?;
        return resolve_aligned(calendar, &base, weeks, day_of_week);
    }
    let month = to_i32(
        checked(calendar, DateField::MonthOfYear, take(bag, DateField::MonthOfYear))?,
        "resolve_date",
    )?;
    let week = checked(
        calendar,
        DateField::AlignedWeekOfMonth,
        take(bag, DateField::AlignedWeekOfMonth),
    )?;
    let day_of_week = checked(calendar, DateField::DayOfWeek, take(bag, DateField::DayOfWeek))?;
    let base = calendar.date_from_fields(year, month, 1)?;
    let date = calendar.plus_days(&base, (week - 1) * 7)?;
    let date = next_or_same(calendar, &date, day_of_week)?;
    check_containment(&date, DateField::MonthOfYear, i64::from(month))?;
    Ok(date)
}

fn resolve_year_day(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<CalendarDate, DateError> {
    let year = take_year(calendar, bag)?;
    if mode == ResolutionMode::Lenient {
        let days = sub_one(take(bag, DateField::DayOfYear))?;
        let base = calendar.date_from_year_day(year, 1)?;
        return calendar.plus_days(&base, days);
    }
    // smart is the same as strict here: no clamping within a year
    let day_of_year = checked(calendar, DateField::DayOfYear, take(bag, DateField::DayOfYear))?;
    calendar.date_from_year_day(year, day_of_year as i32)
}

fn resolve_year_aligned_day(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<CalendarDate, DateError> {
    let year = take_year(calendar, bag)?;
    if mode == ResolutionMode::Lenient {
        let weeks = sub_one(take(bag, DateField::AlignedWeekOfYear))?;
        let days = sub_one(take(bag, DateField::AlignedDayOfWeekInYear))?;
        let base = calendar.date_from_year_day(year, 1)?;
        let offset = weeks
            .checked_mul(7)
            .and_then(|days_of_weeks| days_of_weeks.checked_add(days))
            .ok_or(DateError::ArithmeticOverflow {
                operation: "resolve_date",
            })?;
        return calendar.plus_days(&base, offset);
    }
    let week = checked(
        calendar,
        DateField::AlignedWeekOfYear,
        take(bag, DateField::AlignedWeekOfYear),
    )?;
    let day = checked(
        calendar,
        DateField::AlignedDayOfWeekInYear,
        take(bag, DateField::AlignedDayOfWeekInYear),
    )?;
    let base = calendar.date_from_year_day(year, 1)?;
    let date = calendar.plus_days(&base, (week - 1) * 7 + (day - 1))?;
    check_containment(&date, DateField::Year, i64::from(year))?;
    Ok(date)
}

fn resolve_year_day_of_week(
    calendar: &Calendar,
    bag: &mut FieldBag,
    mode: ResolutionMode,
) -> Result<CalendarDate, DateError> {
    let year = take_year(calendar, bag)?;
    if mode == ResolutionMode::Lenient {
        let weeks = sub_one(take(bag, DateField::AlignedWeekOfYear))?;
        let day_of_week = take(bag, DateField::DayOfWeek);
        let base = calendar.date_from_year_day(year, 1)?;
        return resolve_aligned(calendar, &base, weeks, day_of_week);
    }
    let week = checked(
        calendar,
        DateField::AlignedWeekOfYear,
        take(bag, DateField::AlignedWeekOfYear),
    )?;
    let day_of_week = checked(calendar, DateField::DayOfWeek, take(bag, DateField::DayOfWeek))?;
    let base = calendar.date_from_year_day(year, 1)?;
    let date = calendar.plus_days(&base, (week - 1) * 7)?;
    let date = next_or_same(calendar, &date, day_of_week)?;
    check_containment(&date, DateField::Year, i64::from(year))?;
    Ok(date)
}

/// LENIENT aligned resolution: a day-of-week outside 1..=7 folds whole weeks
/// into the week count; the remainder resolves via next-or-same matching.
fn resolve_aligned(
    calendar: &Calendar,
    base: &CalendarDate,
    weeks: i64,
    day_of_week: i64,
) -> Result<CalendarDate, DateError> {
    let overflow = DateError::ArithmeticOverflow {
        operation: "resolve_date",
    };
    let mut weeks = weeks;
    let mut day_of_week = day_of_week;
    if day_of_week > 7 {
        weeks = weeks
            .checked_add((day_of_week - 1) / 7)
            .ok_or(overflow.clone())?;
        day_of_week = (day_of_week - 1) % 7 + 1;
    } else if day_of_week < 1 {
        weeks = weeks
            .checked_add((day_of_week - 7) / 7)
            .ok_or(overflow.clone())?;
        day_of_week = (day_of_week + 6).rem_euclid(7) + 1;
    }
    let date = calendar.plus_days(base, weeks.checked_mul(7).ok_or(overflow)?)?;
    next_or_same(calendar, &date, day_of_week)
}

/// Advances to the next date whose day-of-week matches, staying put on a
/// match.
fn next_or_same(
    calendar: &Calendar,
    date: &CalendarDate,
    day_of_week: i64,
) -> Result<CalendarDate, DateError> {
    let delta = (day_of_week - i64::from(date.day_of_week())).rem_euclid(7);
    calendar.plus_days(date, delta)
}

/// Compares every remaining bound field against the resolved date,
/// consuming the ones that agree.
fn cross_check(date: &CalendarDate, bag: &mut FieldBag) -> Result<(), DateError> {
    let entries: Vec<_> = bag.entries().collect();
    for (field, value) in entries {
        let actual = date.field(field);
        if actual != value {
            return Err(DateError::ConflictingFields {
                field,
                existing: value,
                value: actual,
            });
        }
        bag.remove(field);
    }
    Ok(())
}
