pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod gifts;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod reveal;
pub mod shuffle;
pub mod state;
pub mod storage;
pub mod ui;
pub mod unlock;

pub use app::router;
pub use calendar::CalendarService;
pub use config::Config;
pub use state::AppState;
