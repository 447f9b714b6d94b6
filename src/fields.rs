//! Date fields, their valid ranges, and the mutable field bag consumed by
//! the resolver.

use std::collections::BTreeMap;

use crate::error::DateError;
use crate::prelude::*;

/// A date-based field understood by the calendar engines.
///
/// Values are carried as `i64` in a [`FieldBag`]; each calendar reports its
/// own bounds per field via `Calendar::valid_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum DateField {
    /// Era value within the calendar.
    #[display(fmt = "ERA")]
    Era,
    /// Year as presented within an era (always >= 1).
    #[display(fmt = "YEAR_OF_ERA")]
    YearOfEra,
    /// Proleptic year, the calendar-internal year axis.
    #[display(fmt = "YEAR")]
    Year,
    /// Month of year, 1-based.
    #[display(fmt = "MONTH_OF_YEAR")]
    MonthOfYear,
    /// Months elapsed since month 1 of proleptic year 0.
    #[display(fmt = "PROLEPTIC_MONTH")]
    ProlepticMonth,
    /// Day of month, 1-based.
    #[display(fmt = "DAY_OF_MONTH")]
    DayOfMonth,
    /// Day of year, 1-based.
    #[display(fmt = "DAY_OF_YEAR")]
    DayOfYear,
    /// Day of week in the calendar's numbering, 1..=7.
    #[display(fmt = "DAY_OF_WEEK")]
    DayOfWeek,
    /// Week within a month counted in fixed groups of seven days.
    #[display(fmt = "ALIGNED_WEEK_OF_MONTH")]
    AlignedWeekOfMonth,
    /// Position within an aligned week of the month, 1..=7.
    #[display(fmt = "ALIGNED_DAY_OF_WEEK_IN_MONTH")]
    AlignedDayOfWeekInMonth,
    /// Week within a year counted in fixed groups of seven days.
    #[display(fmt = "ALIGNED_WEEK_OF_YEAR")]
    AlignedWeekOfYear,
    /// Position within an aligned week of the year, 1..=7.
    #[display(fmt = "ALIGNED_DAY_OF_WEEK_IN_YEAR")]
    AlignedDayOfWeekInYear,
    /// Days since 1970-01-01, the universal comparison key.
    #[display(fmt = "EPOCH_DAY")]
    EpochDay,
}

impl DateField {
    /// Every field, in resolution precedence order.
    pub const ALL: [Self; 13] = [
        Self::Era,
        Self::YearOfEra,
        Self::Year,
        Self::MonthOfYear,
        Self::ProlepticMonth,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::DayOfWeek,
        Self::AlignedWeekOfMonth,
        Self::AlignedDayOfWeekInMonth,
        Self::AlignedWeekOfYear,
        Self::AlignedDayOfWeekInYear,
        Self::EpochDay,
    ];

    /// Stable upper-case name, identical to the `Display` output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Era => "ERA",
            Self::YearOfEra => "YEAR_OF_ERA",
            Self::Year => "YEAR",
            Self::MonthOfYear => "MONTH_OF_YEAR",
            Self::ProlepticMonth => "PROLEPTIC_MONTH",
            Self::DayOfMonth => "DAY_OF_MONTH",
            Self::DayOfYear => "DAY_OF_YEAR",
            Self::DayOfWeek => "DAY_OF_WEEK",
            Self::AlignedWeekOfMonth => "ALIGNED_WEEK_OF_MONTH",
            Self::AlignedDayOfWeekInMonth => "ALIGNED_DAY_OF_WEEK_IN_MONTH",
            Self::AlignedWeekOfYear => "ALIGNED_WEEK_OF_YEAR",
            Self::AlignedDayOfWeekInYear => "ALIGNED_DAY_OF_WEEK_IN_YEAR",
            Self::EpochDay => "EPOCH_DAY",
        }
    }

    /// Looks a field up by its stable name.
    ///
    /// # Errors
    /// Returns `DateError::UnsupportedField` for a name no calendar
    /// recognizes.
    pub fn from_name(name: &str) -> Result<Self, DateError> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| DateError::UnsupportedField {
                name: name.to_owned(),
            })
    }
}

/// Inclusive bounds a calendar declares for one field.
///
/// `smallest_max` is the largest value guaranteed valid in every unit (e.g.
/// 28 for ISO day-of-month), while `max` is the outer bound (31). Outer-bound
/// validation uses `min..=max`; exact validation is the engines' job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{min}..={max}")]
pub struct ValueRange {
    min: i64,
    smallest_max: i64,
    max: i64,
}

impl ValueRange {
    /// A range whose maximum never varies.
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max: max,
            max,
        }
    }

    /// A range whose maximum varies between `smallest_max` and `max`.
    pub const fn with_smallest_max(min: i64, smallest_max: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max,
            max,
        }
    }

    /// Smallest accepted value.
    #[inline]
    pub const fn min(self) -> i64 {
        self.min
    }

    /// Largest value valid in every unit.
    #[inline]
    pub const fn smallest_max(self) -> i64 {
        self.smallest_max
    }

    /// Largest accepted value.
    #[inline]
    pub const fn max(self) -> i64 {
        self.max
    }

    /// Whether `value` lies within the outer bounds.
    #[inline]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Validates `value` against the outer bounds.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` naming `field` when out of range.
    pub fn check(self, field: DateField, value: i64) -> Result<i64, DateError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(DateError::InvalidDate {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A transient, mutable mapping from field to value.
///
/// The resolver removes fields as it consumes them; whatever remains after
/// resolution was not understood (and is cross-checked under the
/// non-lenient modes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBag {
    values: BTreeMap<DateField, i64>,
}

impl FieldBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `field` to `value`, returning any previous binding.
    pub fn insert(&mut self, field: DateField, value: i64) -> Option<i64> {
        self.values.insert(field, value)
    }

    /// Conflict-checked bind: writing a different value over an existing
    /// binding fails, writing an equal value is a no-op.
    ///
    /// # Errors
    /// Returns `DateError::ConflictingFields` naming both values.
    pub fn merge(&mut self, field: DateField, value: i64) -> Result<(), DateError> {
        match self.values.get(&field) {
            Some(&existing) if existing != value => Err(DateError::ConflictingFields {
                field,
                existing,
                value,
            }),
            Some(_) => Ok(()),
            None => {
                self.values.insert(field, value);
                Ok(())
            }
        }
    }

    /// Removes and returns the binding for `field`.
    pub fn remove(&mut self, field: DateField) -> Option<i64> {
        self.values.remove(&field)
    }

    /// Returns the binding for `field` without consuming it.
    pub fn get(&self, field: DateField) -> Option<i64> {
        self.values.get(&field).copied()
    }

    /// Whether `field` is bound.
    pub fn contains(&self, field: DateField) -> bool {
        self.values.contains_key(&field)
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates the bindings in field order.
    pub fn entries(&self) -> impl Iterator<Item = (DateField, i64)> + '_ {
        self.values.iter().map(|(&field, &value)| (field, value))
    }
}

impl FromIterator<(DateField, i64)> for FieldBag {
    fn from_iter<I: IntoIterator<Item = (DateField, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
