//! An amount of time in calendar-native units, tied to one chronology.

use crate::calendar::CalendarKind;
use crate::error::DateError;
use crate::prelude::*;

/// Years, months and days interpreted against one specific calendar.
///
/// Because month and year lengths vary per calendar, two periods only
/// compare within the same chronology; there is deliberately no ordering
/// across calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{calendar} P{years}Y{months}M{days}D")]
pub struct Period {
    calendar: CalendarKind,
    years: i32,
    months: i32,
    days: i32,
}

impl Period {
    /// Creates a period of the given chronology.
    pub const fn new(calendar: CalendarKind, years: i32, months: i32, days: i32) -> Self {
        Self {
            calendar,
            years,
            months,
            days,
        }
    }

    /// The chronology this period is interpreted against.
    #[inline]
    pub const fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    /// The years component.
    #[inline]
    pub const fn years(&self) -> i32 {
        self.years
    }

    /// The months component.
    #[inline]
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// The days component.
    #[inline]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Whether all three components are zero.
    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// The same span with every component negated.
    ///
    /// # Errors
    /// Returns `DateError::ArithmeticOverflow` if a component is `i32::MIN`.
    pub fn negated(&self) -> Result<Self, DateError> {
        let overflow = || DateError::ArithmeticOverflow {
            operation: "negated",
        };
        Ok(Self {
            calendar: self.calendar,
            years: self.years.checked_neg().ok_or_else(overflow)?,
            months: self.months.checked_neg().ok_or_else(overflow)?,
            days: self.days.checked_neg().ok_or_else(overflow)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let period = Period::new(CalendarKind::Hijrah, 1, 2, 3);
        assert_eq!(period.calendar(), CalendarKind::Hijrah);
        assert_eq!((period.years(), period.months(), period.days()), (1, 2, 3));
        assert!(!period.is_zero());
        assert!(Period::new(CalendarKind::Iso, 0, 0, 0).is_zero());
    }

    #[test]
    fn test_equality_requires_same_chronology() {
        let iso = Period::new(CalendarKind::Iso, 1, 2, 3);
        let hijrah = Period::new(CalendarKind::Hijrah, 1, 2, 3);
        assert_ne!(iso, hijrah);
        assert_eq!(iso, Period::new(CalendarKind::Iso, 1, 2, 3));
    }

    #[test]
    fn test_negated() {
        let period = Period::new(CalendarKind::Iso, 1, -2, 3).negated().unwrap();
        assert_eq!((period.years(), period.months(), period.days()), (-1, 2, -3));
        let result = Period::new(CalendarKind::Iso, i32::MIN, 0, 0).negated();
        assert!(matches!(result, Err(DateError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Period::new(CalendarKind::Minguo, 1, 0, -2).to_string(),
            "Minguo P1Y0M-2D"
        );
    }
}
