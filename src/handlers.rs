use crate::chart::{daily_series, weekly_series};
use crate::errors::AppError;
use crate::models::{
    ChartResponse, CreateWeightRequest, DateQuery, RangeQuery, RecentQuery, SampleUpdate,
    WeekBucket, WeightForm, WeightSample, WindowQuery,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use crate::validation::{validate_entry, validate_form, validate_update, ValidEntry};
use crate::weekly::{aggregate_weekly, bucket_for_date, buckets_between, buckets_in_year};
use crate::window::{filter_by_window, TimeWindow};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

const RECENT_LIMIT: usize = 7;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Html<String>, AppError> {
    let window = parse_window(query.window)?;
    let today = today();
    let data = state.data.lock().await;
    let buckets = filter_by_window(
        &aggregate_weekly(&data.samples, state.week_start),
        window,
        today,
    );
    let points = weekly_series(&data.samples, window, today, state.week_start);
    Ok(Html(render_index(
        today,
        window,
        &buckets,
        &points,
        &data.recent(RECENT_LIMIT),
    )))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<WeightForm>,
) -> Result<Redirect, AppError> {
    let entry = validate_form(&form.date, &form.weight, &form.notes, today())?;
    store_entry(&state, entry).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_daily(State(state): State<AppState>) -> Json<Vec<WeightSample>> {
    let data = state.data.lock().await;
    Json(data.all())
}

pub async fn create_daily(
    State(state): State<AppState>,
    Json(payload): Json<CreateWeightRequest>,
) -> Result<(StatusCode, Json<WeightSample>), AppError> {
    let entry = validate_entry(payload.date, payload.weight, payload.notes, today())?;
    let sample = store_entry(&state, entry).await?;
    Ok((StatusCode::CREATED, Json(sample)))
}

pub async fn daily_range(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<WeightSample>>, AppError> {
    check_range(&range)?;
    let data = state.data.lock().await;
    Ok(Json(data.between(range.start_date, range.end_date)))
}

pub async fn daily_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<WeightSample>> {
    let data = state.data.lock().await;
    Json(data.recent(query.limit.unwrap_or(RECENT_LIMIT)))
}

pub async fn get_daily(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<WeightSample>, AppError> {
    let data = state.data.lock().await;
    data.get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no weight entry with id {id}")))
}

pub async fn update_daily(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(changes): Json<SampleUpdate>,
) -> Result<Json<WeightSample>, AppError> {
    let changes = validate_update(changes, today())?;
    let mut data = state.data.lock().await;
    let sample = data.update(id, changes)?;
    persist_data(&state.data_path, &data).await?;
    info!("updated weight entry {id}");
    Ok(Json(sample))
}

pub async fn delete_daily(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if data.delete(id).is_none() {
        warn!("delete requested for unknown weight entry {id}");
        return Err(AppError::not_found(format!("no weight entry with id {id}")));
    }
    persist_data(&state.data_path, &data).await?;
    info!("deleted weight entry {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_weekly(State(state): State<AppState>) -> Json<Vec<WeekBucket>> {
    let data = state.data.lock().await;
    Json(aggregate_weekly(&data.samples, state.week_start))
}

pub async fn weekly_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Json<Vec<WeekBucket>> {
    let data = state.data.lock().await;
    let buckets = aggregate_weekly(&data.samples, state.week_start);
    Json(buckets_in_year(&buckets, year))
}

pub async fn weekly_range(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<WeekBucket>>, AppError> {
    check_range(&range)?;
    let data = state.data.lock().await;
    let buckets = aggregate_weekly(&data.samples, state.week_start);
    Ok(Json(buckets_between(&buckets, range.start_date, range.end_date)))
}

pub async fn weekly_for_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<WeekBucket>, AppError> {
    let data = state.data.lock().await;
    bucket_for_date(&data.samples, query.date, state.week_start)
        .map(Json)
        .ok_or_else(|| {
            AppError::not_found(format!("no weight entries in the week of {}", query.date))
        })
}

pub async fn chart_daily(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ChartResponse>, AppError> {
    let window = parse_window(query.window)?;
    let data = state.data.lock().await;
    Ok(Json(ChartResponse {
        window: window.to_string(),
        points: daily_series(&data.samples, window, today()),
    }))
}

pub async fn chart_weekly(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ChartResponse>, AppError> {
    let window = parse_window(query.window)?;
    let data = state.data.lock().await;
    Ok(Json(ChartResponse {
        window: window.to_string(),
        points: weekly_series(&data.samples, window, today(), state.week_start),
    }))
}

async fn store_entry(state: &AppState, entry: ValidEntry) -> Result<WeightSample, AppError> {
    let mut data = state.data.lock().await;
    let sample = data.create(entry.date, entry.weight, entry.notes);
    persist_data(&state.data_path, &data).await?;
    info!("recorded {} kg for {}", sample.weight, sample.date);
    Ok(sample)
}

fn parse_window(raw: Option<String>) -> Result<TimeWindow, AppError> {
    match raw {
        Some(value) => value
            .parse::<TimeWindow>()
            .map_err(|err| AppError::bad_request(err.to_string())),
        None => Ok(TimeWindow::default()),
    }
}

fn check_range(range: &RangeQuery) -> Result<(), AppError> {
    if range.start_date > range.end_date {
        return Err(AppError::bad_request("start_date must not be after end_date"));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
