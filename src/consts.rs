/// Maximum supported proleptic ISO year (inclusive)
pub const MAX_YEAR: i32 = 999_999_999;

/// Minimum supported proleptic ISO year (inclusive)
pub const MIN_YEAR: i32 = -999_999_999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each ISO month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Days in one full 400-year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i64 = 146_097;

/// Epoch day of 0000-03-01 relative to the 400-year cycle origin used by the
/// epoch-day conversion (shifts day 0 to 1970-01-01)
pub(crate) const EPOCH_SHIFT_DAYS: i64 = 719_468;

/// Year offset between the Thai Buddhist and ISO proleptic year axes
/// (BE 2513 began during ISO 1970)
pub const BUDDHIST_YEAR_OFFSET: i32 = 543;

/// Year offset between the ISO and Minguo proleptic year axes
/// (ROC 59 began during ISO 1970)
pub const MINGUO_YEAR_OFFSET: i32 = 1911;

/// Smallest epoch day any calendar accepts (January 1 of `MIN_YEAR`)
pub const MIN_EPOCH_DAY: i64 = crate::epoch::epoch_day_from_gregorian(MIN_YEAR as i64, 1, 1);

/// Largest epoch day any calendar accepts (December 31 of `MAX_YEAR`)
pub const MAX_EPOCH_DAY: i64 = crate::epoch::epoch_day_from_gregorian(MAX_YEAR as i64, 12, 31);
