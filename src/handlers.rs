use crate::errors::AppError;
use crate::gifts::clean_gift_texts;
use crate::models::{
    CalendarResponse, GiftDraftsResponse, GiftsRequest, GiftsSavedResponse, Person, RevealResponse,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.calendar.snapshot().await;
    Html(render_index(
        &state.today().to_string(),
        snapshot.opened_count(),
        snapshot.days.len(),
    ))
}

pub async fn get_calendar(State(state): State<AppState>) -> Result<Json<CalendarResponse>, AppError> {
    let today = state.today();
    let days = state.calendar.views(today).await;

    Ok(Json(CalendarResponse {
        today: today.to_string(),
        opened_count: days.iter().filter(|day| day.is_opened).count(),
        total_days: days.len(),
        days,
    }))
}

pub async fn reveal_day(
    State(state): State<AppState>,
    Path(day): Path<u8>,
) -> Result<Json<RevealResponse>, AppError> {
    let entry = state.calendar.reveal(day, state.today()).await?;
    Ok(Json(entry.into()))
}

pub async fn get_gift_drafts(
    State(state): State<AppState>,
    Path(acting): Path<String>,
) -> Result<Json<GiftDraftsResponse>, AppError> {
    let acting = parse_person(&acting)?;
    let gifts = state.calendar.gift_drafts(acting).await;

    Ok(Json(GiftDraftsResponse {
        acting,
        target: acting.other(),
        gifts,
    }))
}

pub async fn save_gifts(
    State(state): State<AppState>,
    Json(payload): Json<GiftsRequest>,
) -> Result<Json<GiftsSavedResponse>, AppError> {
    let acting = parse_person(&payload.acting)?;
    let gifts = clean_gift_texts(&payload.gifts);

    let saved = state
        .calendar
        .save_gifts(acting, &gifts, payload.shuffle)
        .await?;

    Ok(Json(GiftsSavedResponse {
        target: saved.target,
        slots: saved.slots,
        filled: saved.filled,
    }))
}

fn parse_person(raw: &str) -> Result<Person, AppError> {
    raw.parse::<Person>().map_err(|_| {
        AppError::bad_request(format!(
            "acting person must be '{}' or '{}'",
            Person::Mathilde,
            Person::Gaylord
        ))
    })
}
