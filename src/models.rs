use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TOTAL_DAYS: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    Mathilde,
    Gaylord,
}

impl Person {
    pub const ALL: [Person; 2] = [Person::Mathilde, Person::Gaylord];

    /// The counterpart. Gifts entered by one participant always go to the other.
    pub fn other(self) -> Person {
        match self {
            Person::Mathilde => Person::Gaylord,
            Person::Gaylord => Person::Mathilde,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Person::Mathilde => "Mathilde",
            Person::Gaylord => "Gaylord",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPerson(pub String);

impl fmt::Display for UnknownPerson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown person '{}'", self.0)
    }
}

impl std::error::Error for UnknownPerson {}

impl FromStr for Person {
    type Err = UnknownPerson;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Person::ALL
            .into_iter()
            .find(|person| person.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownPerson(value.to_string()))
    }
}

/// One calendar slot, in its persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub day: u8,
    pub person: Person,
    #[serde(default)]
    pub gift_content: String,
    #[serde(default, alias = "aiMessage", skip_serializing_if = "Option::is_none")]
    pub generated_message: Option<String>,
    #[serde(default)]
    pub is_opened: bool,
}

impl DayEntry {
    pub fn new(day: u8, person: Person) -> Self {
        Self {
            day,
            person,
            gift_content: String::new(),
            generated_message: None,
            is_opened: false,
        }
    }

    /// True when revealing needs no generated message.
    pub fn has_content(&self) -> bool {
        !self.gift_content.is_empty() || self.generated_message.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub days: Vec<DayEntry>,
}

impl CalendarState {
    pub fn entry(&self, day: u8) -> Option<&DayEntry> {
        self.days.iter().find(|entry| entry.day == day)
    }

    pub fn entry_mut(&mut self, day: u8) -> Option<&mut DayEntry> {
        self.days.iter_mut().find(|entry| entry.day == day)
    }

    pub fn opened_count(&self) -> usize {
        self.days.iter().filter(|entry| entry.is_opened).count()
    }

    pub fn days_for(&self, person: Person) -> impl Iterator<Item = &DayEntry> {
        self.days.iter().filter(move |entry| entry.person == person)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    Hidden,
    Revealing,
    Revealed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayView {
    pub day: u8,
    pub phase: RevealPhase,
    pub can_open: bool,
    pub is_opened: bool,
    pub person: Option<Person>,
    pub gift_content: Option<String>,
    pub generated_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub today: String,
    pub opened_count: usize,
    pub total_days: usize,
    pub days: Vec<DayView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RevealResponse {
    pub day: u8,
    pub person: Person,
    pub gift_content: String,
    pub generated_message: Option<String>,
}

impl From<DayEntry> for RevealResponse {
    fn from(entry: DayEntry) -> Self {
        Self {
            day: entry.day,
            person: entry.person,
            gift_content: entry.gift_content,
            generated_message: entry.generated_message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GiftsRequest {
    pub acting: String,
    pub gifts: Vec<String>,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_shuffle() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GiftDraftsResponse {
    pub acting: Person,
    pub target: Person,
    pub gifts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GiftsSavedResponse {
    pub target: Person,
    pub slots: usize,
    pub filled: usize,
}
