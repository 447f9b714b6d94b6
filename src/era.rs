//! Era enumerations for every supported calendar.
//!
//! Era values are stable integers: for the two-era calendars the era active
//! at the calendar's epoch has value 1 and the era before it value 0. The
//! Japanese calendar numbers its eras monotonically from Seireki (0) through
//! Reiwa (5); eras configured at engine construction continue from 6.

use crate::calendar::CalendarKind;
use crate::prelude::*;

/// Era of the ISO calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum IsoEra {
    /// Before the common era, years counted backward.
    #[display(fmt = "BCE")]
    Bce,
    /// The common era.
    #[display(fmt = "CE")]
    Ce,
}

impl IsoEra {
    /// Numeric era value (BCE 0, CE 1).
    pub const fn value(self) -> i32 {
        match self {
            Self::Bce => 0,
            Self::Ce => 1,
        }
    }

    /// Era for a numeric value, if mapped.
    pub const fn of(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Bce),
            1 => Some(Self::Ce),
            _ => None,
        }
    }
}

/// Era of the Hijrah calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum HijrahEra {
    /// Before the Hijrah, years counted backward.
    #[display(fmt = "BEFORE_AH")]
    BeforeAh,
    /// Anno Hegirae.
    #[display(fmt = "AH")]
    Ah,
}

impl HijrahEra {
    /// Numeric era value (BEFORE_AH 0, AH 1).
    pub const fn value(self) -> i32 {
        match self {
            Self::BeforeAh => 0,
            Self::Ah => 1,
        }
    }

    /// Era for a numeric value, if mapped.
    pub const fn of(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::BeforeAh),
            1 => Some(Self::Ah),
            _ => None,
        }
    }
}

/// Era of the Thai Buddhist calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ThaiBuddhistEra {
    /// Before the Buddhist era, years counted backward.
    #[display(fmt = "BEFORE_BE")]
    BeforeBe,
    /// The Buddhist era.
    #[display(fmt = "BE")]
    Be,
}

impl ThaiBuddhistEra {
    /// Numeric era value (BEFORE_BE 0, BE 1).
    pub const fn value(self) -> i32 {
        match self {
            Self::BeforeBe => 0,
            Self::Be => 1,
        }
    }

    /// Era for a numeric value, if mapped.
    pub const fn of(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::BeforeBe),
            1 => Some(Self::Be),
            _ => None,
        }
    }
}

/// Era of the Minguo calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum MinguoEra {
    /// Before the Republic of China era, years counted backward.
    #[display(fmt = "BEFORE_ROC")]
    BeforeRoc,
    /// The Republic of China era.
    #[display(fmt = "ROC")]
    Roc,
}

impl MinguoEra {
    /// Numeric era value (BEFORE_ROC 0, ROC 1).
    pub const fn value(self) -> i32 {
        match self {
            Self::BeforeRoc => 0,
            Self::Roc => 1,
        }
    }

    /// Era for a numeric value, if mapped.
    pub const fn of(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::BeforeRoc),
            1 => Some(Self::Roc),
            _ => None,
        }
    }
}

/// Era of the Japanese Imperial calendar, identified by its stable value.
///
/// The built-in eras are `SEIREKI` (0) through `REIWA` (5). The full era
/// set, including any eras added from configuration at engine construction,
/// lives in the `JapaneseCalendar` era table; values here are only valid if
/// that table maps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct JapaneseEra(i32);

impl JapaneseEra {
    /// The Gregorian years before Meiji.
    pub const SEIREKI: Self = Self(0);
    /// Meiji, since 1868-01-01.
    pub const MEIJI: Self = Self(1);
    /// Taisho, since 1912-07-30.
    pub const TAISHO: Self = Self(2);
    /// Showa, since 1926-12-25.
    pub const SHOWA: Self = Self(3);
    /// Heisei, since 1989-01-08.
    pub const HEISEI: Self = Self(4);
    /// Reiwa, since 2019-05-01.
    pub const REIWA: Self = Self(5);

    /// Numeric era value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for JapaneseEra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "Seireki"),
            1 => write!(f, "Meiji"),
            2 => write!(f, "Taisho"),
            3 => write!(f, "Showa"),
            4 => write!(f, "Heisei"),
            5 => write!(f, "Reiwa"),
            value => write!(f, "Era{value}"),
        }
    }
}

/// An era of any supported calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Era {
    /// ISO era.
    #[display(fmt = "{_0}")]
    Iso(IsoEra),
    /// Hijrah era.
    #[display(fmt = "{_0}")]
    Hijrah(HijrahEra),
    /// Japanese era.
    #[display(fmt = "{_0}")]
    Japanese(JapaneseEra),
    /// Thai Buddhist era.
    #[display(fmt = "{_0}")]
    ThaiBuddhist(ThaiBuddhistEra),
    /// Minguo era.
    #[display(fmt = "{_0}")]
    Minguo(MinguoEra),
}

impl Era {
    /// Numeric era value within the owning calendar.
    pub const fn value(self) -> i32 {
        match self {
            Self::Iso(era) => era.value(),
            Self::Hijrah(era) => era.value(),
            Self::Japanese(era) => era.value(),
            Self::ThaiBuddhist(era) => era.value(),
            Self::Minguo(era) => era.value(),
        }
    }

    /// The calendar this era belongs to.
    pub const fn calendar(self) -> CalendarKind {
        match self {
            Self::Iso(_) => CalendarKind::Iso,
            Self::Hijrah(_) => CalendarKind::Hijrah,
            Self::Japanese(_) => CalendarKind::Japanese,
            Self::ThaiBuddhist(_) => CalendarKind::ThaiBuddhist,
            Self::Minguo(_) => CalendarKind::Minguo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_era_values() {
        assert_eq!(IsoEra::Bce.value(), 0);
        assert_eq!(IsoEra::Ce.value(), 1);
        assert_eq!(HijrahEra::Ah.value(), 1);
        assert_eq!(ThaiBuddhistEra::Be.value(), 1);
        assert_eq!(MinguoEra::Roc.value(), 1);
    }

    #[test]
    fn test_era_of_round_trip() {
        for value in 0..=1 {
            assert_eq!(IsoEra::of(value).map(IsoEra::value), Some(value));
            assert_eq!(HijrahEra::of(value).map(HijrahEra::value), Some(value));
        }
        assert_eq!(IsoEra::of(2), None);
        assert_eq!(HijrahEra::of(-1), None);
    }

    #[test]
    fn test_japanese_era_ordering() {
        assert!(JapaneseEra::SEIREKI < JapaneseEra::MEIJI);
        assert!(JapaneseEra::HEISEI < JapaneseEra::REIWA);
        assert_eq!(JapaneseEra::REIWA.value(), 5);
        assert_eq!(JapaneseEra::from(7).value(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(Era::Iso(IsoEra::Bce).to_string(), "BCE");
        assert_eq!(Era::Hijrah(HijrahEra::Ah).to_string(), "AH");
        assert_eq!(Era::Japanese(JapaneseEra::REIWA).to_string(), "Reiwa");
        assert_eq!(Era::Japanese(JapaneseEra::from(6)).to_string(), "Era6");
        assert_eq!(Era::ThaiBuddhist(ThaiBuddhistEra::Be).to_string(), "BE");
        assert_eq!(Era::Minguo(MinguoEra::BeforeRoc).to_string(), "BEFORE_ROC");
    }

    #[test]
    fn test_owning_calendar() {
        assert_eq!(Era::Iso(IsoEra::Ce).calendar(), CalendarKind::Iso);
        assert_eq!(
            Era::Japanese(JapaneseEra::SHOWA).calendar(),
            CalendarKind::Japanese
        );
    }
}
