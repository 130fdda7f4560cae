use crate::models::{CalendarState, DayEntry, Person, TOTAL_DAYS};
use crate::shuffle::shuffle_with;
use async_trait::async_trait;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

pub const STORAGE_KEY: &str = "mg_advent_calendar_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored calendar is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored calendar is malformed: {0}")]
    Malformed(String),
}

/// Keyed blob holding the serialized day list.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    async fn write(&self, payload: Vec<u8>) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        Path::new("data").join(format!("{STORAGE_KEY}.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl CalendarStore for JsonFileStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    async fn write(&self, payload: Vec<u8>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|err| self.io_error(err))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).await.map_err(|err| self.io_error(err))?;
        fs::rename(&tmp, &self.path).await.map_err(|err| self.io_error(err))?;
        Ok(())
    }
}

/// In-process blob, for tests and embedding without a data file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn with_blob(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Mutex::new(Some(payload.into())),
        }
    }

    pub fn blob(&self) -> Option<Vec<u8>> {
        self.blob
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CalendarStore for MemoryStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blob())
    }

    async fn write(&self, payload: Vec<u8>) -> Result<(), StoreError> {
        *self
            .blob
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(payload);
        Ok(())
    }
}

/// Fresh calendar: a 12/12 pool of participants shuffled over days 1..=24.
pub fn generate_calendar<R: Rng + ?Sized>(rng: &mut R) -> CalendarState {
    let per_person = usize::from(TOTAL_DAYS) / Person::ALL.len();
    let pool: Vec<Person> = Person::ALL
        .into_iter()
        .flat_map(|person| std::iter::repeat(person).take(per_person))
        .collect();

    let days = shuffle_with(&pool, rng)
        .into_iter()
        .zip(1..=TOTAL_DAYS)
        .map(|(person, day)| DayEntry::new(day, person))
        .collect();

    CalendarState { days }
}

/// Loaded state plus whether it was generated rather than read back.
#[derive(Debug)]
pub struct Loaded {
    pub state: CalendarState,
    pub fresh: bool,
}

/// Reads the stored calendar, or generates one when nothing is stored.
///
/// A stored blob that fails to parse or validate is an error; it is never
/// replaced by a fresh random calendar. The fresh state is not written here.
pub async fn load_calendar(store: &dyn CalendarStore) -> Result<Loaded, StoreError> {
    let Some(bytes) = store.read().await? else {
        info!("no stored calendar, generating a fresh one");
        return Ok(Loaded {
            state: generate_calendar(&mut rand::thread_rng()),
            fresh: true,
        });
    };

    let days: Vec<DayEntry> = serde_json::from_slice(&bytes)?;
    let state = validate(days)?;
    Ok(Loaded { state, fresh: false })
}

pub async fn save_calendar(store: &dyn CalendarStore, state: &CalendarState) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(&state.days)?;
    store.write(payload).await
}

fn validate(mut days: Vec<DayEntry>) -> Result<CalendarState, StoreError> {
    if days.len() != usize::from(TOTAL_DAYS) {
        warn!(entries = days.len(), "stored calendar has the wrong number of days");
        return Err(StoreError::Malformed(format!(
            "expected {TOTAL_DAYS} days, found {}",
            days.len()
        )));
    }

    days.sort_by_key(|entry| entry.day);
    for (expected, entry) in (1..=TOTAL_DAYS).zip(&days) {
        if entry.day != expected {
            return Err(StoreError::Malformed(format!(
                "day {expected} is missing or duplicated"
            )));
        }
    }

    Ok(CalendarState { days })
}
