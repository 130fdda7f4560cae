use crate::calendar::CalendarService;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub calendar: Arc<CalendarService>,
    pub today_override: Option<NaiveDate>,
}

impl AppState {
    pub fn new(calendar: CalendarService, today_override: Option<NaiveDate>) -> Self {
        Self {
            calendar: Arc::new(calendar),
            today_override,
        }
    }

    /// Local calendar date, unless pinned by configuration.
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
