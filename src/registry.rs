//! Registry mapping calendar ids and locale calendar types to engines.
//!
//! The registry is an ordinary constructed object, injected where needed.
//! Registration is insert-if-absent: the first writer for an id wins and
//! later attempts are reported (not errors), so a host can log duplicates.
//! The registry itself never logs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::calendar::Calendar;

#[derive(Debug, Default)]
struct Maps {
    by_id: HashMap<String, Arc<Calendar>>,
    by_type: HashMap<String, Arc<Calendar>>,
}

/// Thread-safe map from calendar id / calendar type to a shared engine.
///
/// Lookups take a read lock; registration takes the write lock once. Engines
/// are immutable, so a returned `Arc` can be used freely without further
/// locking.
#[derive(Debug, Default)]
pub struct ChronologyRegistry {
    maps: RwLock<Maps>,
}

impl ChronologyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the five standard engines.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(Calendar::iso()));
        registry.register(Arc::new(Calendar::hijrah()));
        registry.register(Arc::new(Calendar::japanese()));
        registry.register(Arc::new(Calendar::thai_buddhist()));
        registry.register(Arc::new(Calendar::minguo()));
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, Maps> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Maps> {
        self.maps.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an engine under its id and calendar type.
    ///
    /// Returns `false` if the id was already present; the existing engine is
    /// kept and the attempt is otherwise ignored.
    pub fn register(&self, calendar: Arc<Calendar>) -> bool {
        let mut maps = self.write();
        let id = calendar.id();
        if maps.by_id.contains_key(id) {
            return false;
        }
        let id = id.to_owned();
        let calendar_type = calendar.calendar_type().to_owned();
        maps.by_id.insert(id, Arc::clone(&calendar));
        maps.by_type.entry(calendar_type).or_insert(calendar);
        true
    }

    /// The engine registered under `id`, if any.
    pub fn lookup(&self, id: &str) -> Option<Arc<Calendar>> {
        self.read().by_id.get(id).cloned()
    }

    /// The engine registered under the locale calendar type, if any.
    pub fn lookup_by_type(&self, calendar_type: &str) -> Option<Arc<Calendar>> {
        self.read().by_type.get(calendar_type).cloned()
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().by_id.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hijrah::{Deviation, HijrahCalendar};

    #[test]
    fn test_defaults() {
        let registry = ChronologyRegistry::with_defaults();
        assert_eq!(
            registry.ids(),
            vec!["Hijrah", "ISO", "Japanese", "Minguo", "ThaiBuddhist"]
        );
        let iso = registry.lookup("ISO").unwrap();
        assert_eq!(iso.id(), "ISO");
        assert!(registry.lookup("Gregorian").is_none());
    }

    #[test]
    fn test_lookup_by_type() {
        let registry = ChronologyRegistry::with_defaults();
        let hijrah = registry.lookup_by_type("islamic-civil").unwrap();
        assert_eq!(hijrah.id(), "Hijrah");
        assert!(registry.lookup_by_type("japanese").is_some());
        assert!(registry.lookup_by_type("roc").is_some());
        assert!(registry.lookup_by_type("hebrew").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = ChronologyRegistry::with_defaults();
        let replacement = Arc::new(Calendar::iso());
        assert!(!registry.register(Arc::clone(&replacement)));
        let kept = registry.lookup("ISO").unwrap();
        // the original instance survives
        assert!(!Arc::ptr_eq(&kept, &replacement));
    }

    #[test]
    fn test_hijrah_variants_coexist() {
        let registry = ChronologyRegistry::with_defaults();
        let deviations = [Deviation {
            start_year: 1426,
            start_month: 0,
            end_year: 1426,
            end_month: 11,
            offset: 1,
        }];
        let variant =
            HijrahCalendar::with_deviations("Hijrah-sighted", "islamic-sighted", &deviations)
                .unwrap();
        assert!(registry.register(Arc::new(Calendar::Hijrah(variant))));
        assert!(registry.lookup("Hijrah").is_some());
        assert!(registry.lookup("Hijrah-sighted").is_some());
        assert_eq!(
            registry.lookup_by_type("islamic-sighted").unwrap().id(),
            "Hijrah-sighted"
        );
    }

    #[test]
    fn test_concurrent_registration_converges() {
        let registry = ChronologyRegistry::new();
        let winners = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let registry = &registry;
                    scope.spawn(move || {
                        let mut won = 0;
                        if registry.register(Arc::new(Calendar::iso())) {
                            won += 1;
                        }
                        if registry.register(Arc::new(Calendar::hijrah())) {
                            won += 1;
                        }
                        // readers must only ever observe a complete engine
                        if let Some(calendar) = registry.lookup("ISO") {
                            assert!(calendar.date_from_epoch_day(0).is_ok());
                        }
                        won
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(0))
                .sum::<i32>()
        });
        // exactly one writer won per id
        assert_eq!(winners, 2);
        assert_eq!(registry.ids(), vec!["Hijrah", "ISO"]);
    }
}
