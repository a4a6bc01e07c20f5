//! HTTP handlers for the REST API.
//!
//! Read endpoints serve the latest published snapshot. Selection endpoints
//! turn the request into a [`FilterEvent`] and run it through the controller.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    ChartResponse, CitiesRequest, HealthResponse, MinDelayRequest, MonthsRequest,
    OptionsResponse, StatesRequest, TableResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{FilterSelection, SelectionError};
use crate::services::{month_options, FilterEvent, ViewSnapshot, DISPLAY_COLUMNS};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        records: state.dataset.len(),
    })
}

// =============================================================================
// Filter controls
// =============================================================================

/// GET /v1/options
///
/// Options for the state, city and month controls.
pub async fn get_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let snapshot = state.latest();
    Json(OptionsResponse {
        states: state.dataset.unique_states().iter().cloned().collect(),
        cities: snapshot.city_options.iter().cloned().collect(),
        months: month_options(),
    })
}

/// GET /v1/selection
pub async fn get_selection(State(state): State<AppState>) -> Json<FilterSelection> {
    Json(state.latest().selection.clone())
}

/// PUT /v1/selection/states
pub async fn put_states(
    State(state): State<AppState>,
    Json(request): Json<StatesRequest>,
) -> HandlerResult<ViewSnapshot> {
    apply_event(
        &state,
        FilterEvent::StatesChanged {
            states: request.states,
        },
    )
    .await
}

/// PUT /v1/selection/cities
pub async fn put_cities(
    State(state): State<AppState>,
    Json(request): Json<CitiesRequest>,
) -> HandlerResult<ViewSnapshot> {
    apply_event(
        &state,
        FilterEvent::CitiesChanged {
            cities: request.cities,
        },
    )
    .await
}

/// PUT /v1/selection/months
pub async fn put_months(
    State(state): State<AppState>,
    request: Result<Json<MonthsRequest>, JsonRejection>,
) -> HandlerResult<ViewSnapshot> {
    let Json(request) = request?;
    apply_event(
        &state,
        FilterEvent::MonthRangeChanged {
            min_month: month_bound(request.min_month)?,
            max_month: month_bound(request.max_month)?,
        },
    )
    .await
}

/// Narrow a requested month to the controller's type. Anything that does not
/// fit is out of bounds anyway.
fn month_bound(month: i64) -> Result<u32, SelectionError> {
    u32::try_from(month).map_err(|_| SelectionError::MonthOutOfBounds { month })
}

/// PUT /v1/selection/min-delay
pub async fn put_min_delay(
    State(state): State<AppState>,
    Json(request): Json<MinDelayRequest>,
) -> HandlerResult<ViewSnapshot> {
    apply_event(
        &state,
        FilterEvent::MinDelayChanged {
            min_delay: request.min_delay,
        },
    )
    .await
}

/// POST /v1/selection/reset
pub async fn reset_selection(State(state): State<AppState>) -> HandlerResult<ViewSnapshot> {
    apply_event(&state, FilterEvent::Reset).await
}

/// Run one event through the controller while holding its lock, so events are
/// handled strictly one after another.
async fn apply_event(state: &AppState, event: FilterEvent) -> HandlerResult<ViewSnapshot> {
    tracing::debug!(?event, "Applying filter event");
    let mut controller = Arc::clone(&state.controller).lock_owned().await;

    // Recomputation is CPU-bound; keep it off the async workers.
    let snapshot = tokio::task::spawn_blocking(move || controller.handle(event)).await??;

    Ok(Json(snapshot.as_ref().clone()))
}

// =============================================================================
// Derived view
// =============================================================================

/// GET /v1/view
pub async fn get_view(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(state.latest().as_ref().clone())
}

/// GET /v1/view/table
pub async fn get_table(State(state): State<AppState>) -> Json<TableResponse> {
    let snapshot = state.latest();
    Json(TableResponse {
        generation: snapshot.generation,
        columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: snapshot.table.clone(),
        total: snapshot.row_count,
    })
}

/// GET /v1/view/chart
pub async fn get_chart(State(state): State<AppState>) -> Json<ChartResponse> {
    let snapshot = state.latest();
    Json(ChartResponse {
        generation: snapshot.generation,
        chart: snapshot.chart.clone(),
    })
}

/// GET /v1/view/stream
///
/// Stream published snapshots via Server-Sent Events. The current snapshot is
/// sent first; intermediate snapshots may be skipped, the latest always wins.
pub async fn stream_view(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut receiver = state.snapshots.clone();
    let stream = async_stream::stream! {
        loop {
            let snapshot = receiver.borrow_and_update().clone();
            match serde_json::to_string(snapshot.as_ref()) {
                Ok(event_data) => {
                    yield Ok(Event::default().event("snapshot").data(event_data));
                }
                Err(e) => {
                    tracing::error!(
                        generation = snapshot.generation,
                        "Failed to serialize snapshot, skipping event: {}",
                        e
                    );
                }
            }

            if receiver.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    )
}
