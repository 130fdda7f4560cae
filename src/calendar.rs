use crate::errors::CalendarError;
use crate::gifts::{assign_gifts, gift_drafts};
use crate::messages::{MessageGenerator, message_or_fallback};
use crate::models::{CalendarState, DayEntry, DayView, Person};
use crate::reveal::{self, RevealError, RevealStep};
use crate::storage::{CalendarStore, load_calendar, save_calendar};
use crate::unlock::UnlockRule;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftsSaved {
    pub target: Person,
    pub slots: usize,
    pub filled: usize,
}

/// Owns the calendar state and every mutation of it. Each mutation is
/// persisted as a whole-collection overwrite before it returns.
pub struct CalendarService {
    store: Arc<dyn CalendarStore>,
    generator: Arc<dyn MessageGenerator>,
    rule: UnlockRule,
    state: Mutex<CalendarState>,
    revealing: std::sync::Mutex<HashSet<u8>>,
}

impl CalendarService {
    /// Loads the stored calendar; a freshly generated one is saved straight away.
    pub async fn open(
        store: Arc<dyn CalendarStore>,
        generator: Arc<dyn MessageGenerator>,
        rule: UnlockRule,
    ) -> Result<Self, CalendarError> {
        let loaded = load_calendar(store.as_ref()).await?;
        if loaded.fresh {
            save_calendar(store.as_ref(), &loaded.state).await?;
        }

        Ok(Self {
            store,
            generator,
            rule,
            state: Mutex::new(loaded.state),
            revealing: std::sync::Mutex::new(HashSet::new()),
        })
    }

    pub async fn snapshot(&self) -> CalendarState {
        self.state.lock().await.clone()
    }

    /// Per-day views for the grid. Person and content stay hidden until a day is opened.
    pub async fn views(&self, today: NaiveDate) -> Vec<DayView> {
        let state = self.state.lock().await;
        let in_flight = self.in_flight();
        state
            .days
            .iter()
            .map(|entry| {
                let opened = entry.is_opened;
                DayView {
                    day: entry.day,
                    phase: reveal::phase_of(entry, in_flight.contains(&entry.day)),
                    can_open: self.rule.can_open(entry.day, today),
                    is_opened: opened,
                    person: opened.then_some(entry.person),
                    gift_content: opened.then(|| entry.gift_content.clone()),
                    generated_message: if opened { entry.generated_message.clone() } else { None },
                }
            })
            .collect()
    }

    pub async fn reveal(&self, day: u8, today: NaiveDate) -> Result<DayEntry, CalendarError> {
        let step = {
            let state = self.state.lock().await;
            let entry = state.entry(day).ok_or(RevealError::UnknownDay(day))?;
            reveal::begin(entry, &self.rule, today)?
        };

        // The claim is held until the result is written back.
        let (message, _claim) = match step {
            RevealStep::Ready => (None, None),
            RevealStep::NeedsMessage { person, day } => {
                let claim = self.claim(day)?;
                if self.needs_message(day).await {
                    let result = self.generator.generate(person, day).await;
                    (Some(message_or_fallback(result, person, day)), Some(claim))
                } else {
                    (None, Some(claim))
                }
            }
        };

        let mut state = self.state.lock().await;
        let mut revealed = state.entry(day).ok_or(RevealError::UnknownDay(day))?.clone();
        if !reveal::finish(&mut revealed, message) {
            return Ok(revealed);
        }

        // Memory only takes the change once it is on disk.
        let mut updated = state.clone();
        if let Some(entry) = updated.entry_mut(day) {
            *entry = revealed.clone();
        }
        save_calendar(self.store.as_ref(), &updated).await?;
        *state = updated;
        info!(day, person = %revealed.person, "day revealed");
        Ok(revealed)
    }

    pub async fn gift_drafts(&self, acting: Person) -> Vec<String> {
        let state = self.state.lock().await;
        gift_drafts(&state.days, acting.other())
    }

    /// Writes `gifts` onto the days of `acting`'s counterpart.
    pub async fn save_gifts(
        &self,
        acting: Person,
        gifts: &[String],
        shuffle: bool,
    ) -> Result<GiftsSaved, CalendarError> {
        let target = acting.other();
        let mut state = self.state.lock().await;
        let days = assign_gifts(&state.days, target, gifts, shuffle);
        let updated = CalendarState { days };
        save_calendar(self.store.as_ref(), &updated).await?;
        *state = updated;

        let slots = state.days_for(target).count();
        let filled = state
            .days_for(target)
            .filter(|entry| !entry.gift_content.trim().is_empty())
            .count();
        info!(%acting, %target, slots, filled, shuffle, "gifts saved");

        Ok(GiftsSaved { target, slots, filled })
    }

    async fn needs_message(&self, day: u8) -> bool {
        let state = self.state.lock().await;
        state
            .entry(day)
            .is_some_and(|entry| !entry.is_opened && !entry.has_content())
    }

    fn in_flight(&self) -> HashSet<u8> {
        self.revealing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn claim(&self, day: u8) -> Result<RevealClaim<'_>, RevealError> {
        let mut revealing = self.revealing.lock().unwrap_or_else(PoisonError::into_inner);
        if !revealing.insert(day) {
            return Err(RevealError::InProgress(day));
        }
        Ok(RevealClaim { service: self, day })
    }
}

/// Marks a day as `Revealing` until dropped.
struct RevealClaim<'a> {
    service: &'a CalendarService,
    day: u8,
}

impl Drop for RevealClaim<'_> {
    fn drop(&mut self) {
        self.service
            .revealing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{GenerationError, MISSING_KEY_MESSAGE, PlaceholderGenerator};
    use crate::models::TOTAL_DAYS;
    use crate::storage::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingGenerator {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl MessageGenerator for CountingGenerator {
        async fn generate(&self, person: Person, day: u8) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GenerationError::Payload("boom".to_string()));
            }
            Ok(format!("Bravo {person} pour le jour {day}"))
        }
    }

    /// Memory-backed store whose writes can be made to fail.
    #[derive(Debug, Default)]
    struct FailingStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl CalendarStore for FailingStore {
        async fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.read().await
        }

        async fn write(&self, payload: Vec<u8>) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io {
                    path: "memory".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.write(payload).await
        }
    }

    fn december(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    async fn service_with(generator: Arc<CountingGenerator>) -> (CalendarService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let service = CalendarService::open(store.clone(), generator, UnlockRule::default())
            .await
            .expect("open service");
        (service, store)
    }

    fn stored_days(store: &MemoryStore) -> Vec<DayEntry> {
        serde_json::from_slice(&store.blob().expect("blob written")).unwrap()
    }

    #[tokio::test]
    async fn open_persists_a_fresh_calendar() {
        let (service, store) = service_with(Arc::default()).await;
        let days = stored_days(&store);
        assert_eq!(days.len(), usize::from(TOTAL_DAYS));
        assert_eq!(days, service.snapshot().await.days);
    }

    #[tokio::test]
    async fn open_reuses_stored_calendar() {
        let store = Arc::new(MemoryStore::default());
        let first = CalendarService::open(store.clone(), Arc::new(PlaceholderGenerator), UnlockRule::default())
            .await
            .unwrap();
        let second = CalendarService::open(store.clone(), Arc::new(PlaceholderGenerator), UnlockRule::default())
            .await
            .unwrap();
        assert_eq!(first.snapshot().await, second.snapshot().await);
    }

    #[tokio::test]
    async fn open_fails_on_corrupt_blob() {
        let store = Arc::new(MemoryStore::with_blob("[{\"day\":"));
        let result = CalendarService::open(store, Arc::new(PlaceholderGenerator), UnlockRule::default()).await;
        assert!(matches!(result, Err(CalendarError::Store(_))));
    }

    #[tokio::test]
    async fn reveal_generates_caches_and_persists() {
        let generator = Arc::new(CountingGenerator::default());
        let (service, store) = service_with(generator.clone()).await;

        let entry = service.reveal(5, december(5)).await.unwrap();
        assert!(entry.is_opened);
        assert_eq!(
            entry.generated_message,
            Some(format!("Bravo {} pour le jour 5", entry.person))
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

        let stored = stored_days(&store);
        assert_eq!(stored[4], entry);
    }

    #[tokio::test]
    async fn revealing_twice_does_not_call_the_generator_again() {
        let generator = Arc::new(CountingGenerator::default());
        let (service, _store) = service_with(generator.clone()).await;

        let first = service.reveal(1, december(1)).await.unwrap();
        let second = service.reveal(1, december(24)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn opened_day_stays_revealable_after_the_season() {
        let generator = Arc::new(CountingGenerator::default());
        let (service, _store) = service_with(generator.clone()).await;
        service.reveal(3, december(3)).await.unwrap();

        let june = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert!(service.reveal(3, june).await.is_ok());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_generation_falls_back() {
        let generator = Arc::new(CountingGenerator {
            fail: true,
            ..CountingGenerator::default()
        });
        let (service, _store) = service_with(generator).await;

        let entry = service.reveal(2, december(2)).await.unwrap();
        assert_eq!(
            entry.generated_message,
            Some(format!("Joyeux jour 2 {} ! 🎄", entry.person))
        );
        assert!(entry.is_opened);
    }

    #[tokio::test]
    async fn placeholder_message_is_cached() {
        let store = Arc::new(MemoryStore::default());
        let service = CalendarService::open(store, Arc::new(PlaceholderGenerator), UnlockRule::default())
            .await
            .unwrap();
        let entry = service.reveal(1, december(1)).await.unwrap();
        assert_eq!(entry.generated_message.as_deref(), Some(MISSING_KEY_MESSAGE));
    }

    #[tokio::test]
    async fn locked_and_unknown_days_are_rejected() {
        let (service, _store) = service_with(Arc::default()).await;

        let locked = service.reveal(11, december(10)).await.unwrap_err();
        assert!(matches!(locked, CalendarError::Reveal(RevealError::Locked(11))));

        let unknown = service.reveal(25, december(31)).await.unwrap_err();
        assert!(matches!(unknown, CalendarError::Reveal(RevealError::UnknownDay(25))));

        let before_season = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        let views = service.views(before_season).await;
        assert!(views.iter().all(|view| !view.can_open));
    }

    #[tokio::test]
    async fn gift_content_skips_generation() {
        let generator = Arc::new(CountingGenerator::default());
        let (service, _store) = service_with(generator.clone()).await;

        let day_one_person = service.snapshot().await.days[0].person;
        let acting = day_one_person.other();
        let gifts: Vec<String> = (1..=12).map(|n| format!("Cadeau {n}")).collect();
        service.save_gifts(acting, &gifts, false).await.unwrap();

        let entry = service.reveal(1, december(1)).await.unwrap();
        assert_eq!(entry.gift_content, "Cadeau 1");
        assert_eq!(entry.generated_message, None);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn save_gifts_targets_the_counterpart() {
        let (service, store) = service_with(Arc::default()).await;
        let before = service.snapshot().await;

        let gifts = vec!["Un livre".to_string(), String::new(), "Du thé".to_string()];
        let saved = service.save_gifts(Person::Mathilde, &gifts, true).await.unwrap();
        assert_eq!(saved.target, Person::Gaylord);
        assert_eq!(saved.slots, 12);
        assert_eq!(saved.filled, 2);

        let after = service.snapshot().await;
        for (old, new) in before.days.iter().zip(&after.days) {
            if old.person == Person::Mathilde {
                assert_eq!(old, new);
            }
        }
        let mut placed = service.gift_drafts(Person::Mathilde).await;
        placed.retain(|gift| !gift.is_empty());
        placed.sort();
        assert_eq!(placed, vec!["Du thé".to_string(), "Un livre".to_string()]);
        assert_eq!(stored_days(&store), after.days);
    }

    #[tokio::test]
    async fn views_hide_unopened_details() {
        let (service, _store) = service_with(Arc::default()).await;
        service.reveal(1, december(2)).await.unwrap();

        let views = service.views(december(2)).await;
        assert_eq!(views.len(), 24);
        assert!(views[0].is_opened && views[0].person.is_some());
        assert!(views[1].can_open && views[1].person.is_none() && views[1].gift_content.is_none());
        assert!(!views[2].can_open);
    }

    #[tokio::test]
    async fn concurrent_reveal_of_same_day_is_rejected() {
        let (service, _store) = service_with(Arc::default()).await;
        let _claim = service.claim(4).unwrap();

        let err = service.reveal(4, december(4)).await.unwrap_err();
        assert!(matches!(err, CalendarError::Reveal(RevealError::InProgress(4))));
        let views = service.views(december(4)).await;
        assert_eq!(views[3].phase, crate::models::RevealPhase::Revealing);
    }

    #[tokio::test]
    async fn failed_save_leaves_memory_untouched_and_retry_persists() {
        let store = Arc::new(FailingStore::default());
        let generator = Arc::new(CountingGenerator::default());
        let service = CalendarService::open(store.clone(), generator.clone(), UnlockRule::default())
            .await
            .unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = service.reveal(5, december(5)).await.unwrap_err();
        assert!(matches!(err, CalendarError::Store(_)));
        let entry = service.snapshot().await.days[4].clone();
        assert!(!entry.is_opened);
        assert_eq!(entry.generated_message, None);

        store.fail_writes.store(false, Ordering::SeqCst);
        let revealed = service.reveal(5, december(5)).await.unwrap();
        assert!(revealed.is_opened);

        let stored = stored_days(&store.inner);
        assert_eq!(stored, service.snapshot().await.days);
        assert!(stored[4].is_opened);
        assert_eq!(stored[4].generated_message, revealed.generated_message);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }
}
