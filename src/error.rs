//! Error type shared by every calendar engine and the field resolver.

use crate::fields::DateField;

/// Error type for all fallible date operations.
///
/// Every failure is local and synchronous; nothing is retried or swallowed.
/// The one sanctioned soft fallback lives outside this type: an absent
/// Hijrah deviation source is an empty slice, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Returned when a field combination is out of range or does not name a
    /// real date under the calendar's rules.
    #[error("invalid {field}: {value} is outside {min}..={max}")]
    InvalidDate {
        /// The field that failed validation.
        field: DateField,
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// Returned when an era value does not belong to the target calendar.
    #[error("era {era} does not belong to the {calendar} calendar")]
    InvalidEra {
        /// The numeric era value that was rejected.
        era: i64,
        /// Name of the calendar that rejected it.
        calendar: &'static str,
    },

    /// Returned when a deviation record is malformed at Hijrah engine
    /// construction time.
    #[error("invalid deviation: {reason}")]
    InvalidDeviation {
        /// What was wrong with the record.
        reason: &'static str,
    },

    /// Returned when two already-bound field values disagree during
    /// resolution.
    #[error("conflicting values for {field}: {existing} differs from {value}")]
    ConflictingFields {
        /// The field both values were bound to.
        field: DateField,
        /// The value already present in the bag.
        existing: i64,
        /// The value that could not be merged.
        value: i64,
    },

    /// Returned when resolution produced a date whose recomputed containing
    /// field does not match what was requested.
    #[error("resolved {field} is {actual}, requested {expected}")]
    InconsistentResolution {
        /// The containing field that was checked (month or year).
        field: DateField,
        /// The requested value.
        expected: i64,
        /// The value the resolved date actually carries.
        actual: i64,
    },

    /// Returned when a field name is not recognized by any calendar.
    #[error("unsupported field: {name}")]
    UnsupportedField {
        /// The unrecognized name.
        name: String,
    },

    /// Returned when a date or period belonging to one calendar is handed to
    /// another calendar's operations.
    #[error("chronology mismatch: expected {expected}, found {found}")]
    ChronologyMismatch {
        /// The calendar that was asked to operate.
        expected: &'static str,
        /// The calendar the value belongs to.
        found: &'static str,
    },

    /// Returned when date arithmetic would overflow the representable range.
    #[error("arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// The operation that overflowed.
        operation: &'static str,
    },
}
