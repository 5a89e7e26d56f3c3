// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use courtbook_api::{
    ApiError, AvailabilityResponse, CreateCourtRequest, CreateReservationRequest,
    FacilityResponse, ListReservationsRequest, StatsResponse, UpdateReservationRequest,
    UpdateStatusRequest, cancel_reservation, create_court, create_reservation, delete_court,
    get_availability, get_configuration, get_facility, get_reservation, get_stats, list_courts,
    list_reservations, update_configuration, update_court, update_reservation,
    update_reservation_status,
};
use courtbook_domain::{
    Configuration, ConfigurationPatch, Court, CourtPatch, Reservation, ValidationIssue,
};
use courtbook_events::{ChangeEvent, EventBus};
use courtbook_persistence::Persistence;

/// Courtbook Server - HTTP server for the Courtbook booking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex for safe concurrent access; the event
/// bus fans change notifications out to registered subscribers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for courts, reservations, and configuration.
    store: Arc<Mutex<Persistence>>,
    /// The change-event bus.
    events: Arc<Mutex<EventBus>>,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    /// The calendar date to compute the grid for.
    date: NaiveDate,
    /// Restrict the grid to one court.
    court_id: Option<i64>,
}

/// Query parameters for the court listing endpoint.
#[derive(Debug, Deserialize)]
struct CourtsQuery {
    /// When true, inactive courts are excluded.
    active_only: Option<bool>,
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Deserialize)]
struct StatsQuery {
    /// The calendar date to compute statistics for.
    date: NaiveDate,
}

/// API response for write operations without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// The individual validation failures, when the error is a validation
    /// failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<ValidationIssue>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Validation failures, carried through to the response body.
    issues: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            issues: self.issues,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::ValidationFailed { issues } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                issues: Some(issues),
            },
            ApiError::Conflict { .. } | ApiError::ConstraintViolation { .. } => Self {
                status: StatusCode::CONFLICT,
                message,
                issues: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                issues: None,
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                issues: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    issues: None,
                }
            }
        }
    }
}

/// The facility-local current instant, for the past-slot cutoff.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The facility-local current date, for past-date validation.
fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Publishes a change event to every subscriber.
async fn publish(app_state: &AppState, event: &ChangeEvent) {
    let events = app_state.events.lock().await;
    events.publish(event);
    drop(events);
}

/// Handler for GET `/api/availability` endpoint.
///
/// Returns the slot grid for a date, optionally restricted to one court.
async fn handle_get_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    info!(date = %params.date, court_id = ?params.court_id, "Handling availability request");

    let mut store = app_state.store.lock().await;
    let response: AvailabilityResponse =
        get_availability(&mut store, params.date, params.court_id, local_now())?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/api/reservations` endpoint.
///
/// Validates and creates a reservation; the price is computed server-side.
async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<Json<Reservation>, HttpError> {
    info!(
        court_id = ?req.court_id,
        date = ?req.date,
        "Handling create_reservation request"
    );

    let mut store = app_state.store.lock().await;
    let reservation: Reservation = create_reservation(&mut store, req, local_today())?;
    drop(store);

    publish(
        &app_state,
        &ChangeEvent::ReservationCreated {
            reservation_id: reservation.id.clone(),
            court_id: reservation.court_id,
            date: reservation.date.to_string(),
        },
    )
    .await;

    Ok(Json(reservation))
}

/// Handler for GET `/api/reservations` endpoint.
///
/// Lists reservations matching the query filters.
async fn handle_list_reservations(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ListReservationsRequest>,
) -> Result<Json<Vec<Reservation>>, HttpError> {
    info!(
        date = ?params.date,
        court_id = ?params.court_id,
        "Handling list_reservations request"
    );

    let mut store = app_state.store.lock().await;
    let reservations: Vec<Reservation> = list_reservations(&mut store, &params)?;
    drop(store);

    Ok(Json(reservations))
}

/// Handler for GET `/api/reservations/{id}` endpoint.
async fn handle_get_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<String>,
) -> Result<Json<Reservation>, HttpError> {
    info!(reservation_id = %reservation_id, "Handling get_reservation request");

    let mut store = app_state.store.lock().await;
    let reservation: Reservation = get_reservation(&mut store, &reservation_id)?;
    drop(store);

    Ok(Json(reservation))
}

/// Handler for PATCH `/api/reservations/{id}` endpoint.
///
/// Updates a reservation's fields, re-validating scheduling changes.
async fn handle_update_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<String>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, HttpError> {
    info!(reservation_id = %reservation_id, "Handling update_reservation request");

    let mut store = app_state.store.lock().await;
    let reservation: Reservation =
        update_reservation(&mut store, &reservation_id, req, local_today())?;
    drop(store);

    publish(
        &app_state,
        &ChangeEvent::ReservationUpdated {
            reservation_id: reservation.id.clone(),
        },
    )
    .await;

    Ok(Json(reservation))
}

/// Handler for PATCH `/api/reservations/{id}/status` endpoint.
///
/// Moves a reservation to a new lifecycle status.
async fn handle_update_reservation_status(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Reservation>, HttpError> {
    info!(
        reservation_id = %reservation_id,
        status = %req.status,
        "Handling update_reservation_status request"
    );

    let mut store = app_state.store.lock().await;
    let before = get_reservation(&mut store, &reservation_id)?;
    let reservation: Reservation =
        update_reservation_status(&mut store, &reservation_id, req.status)?;
    drop(store);

    publish(
        &app_state,
        &ChangeEvent::ReservationStatusChanged {
            reservation_id: reservation.id.clone(),
            from: before.status,
            to: reservation.status,
        },
    )
    .await;

    Ok(Json(reservation))
}

/// Handler for DELETE `/api/reservations/{id}` endpoint.
///
/// Soft-cancels a reservation. Repeating the delete is a no-op.
async fn handle_cancel_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<String>,
) -> Result<Json<Reservation>, HttpError> {
    info!(reservation_id = %reservation_id, "Handling cancel_reservation request");

    let mut store = app_state.store.lock().await;
    let before = get_reservation(&mut store, &reservation_id)?;
    let reservation: Reservation = cancel_reservation(&mut store, &reservation_id)?;
    drop(store);

    publish(
        &app_state,
        &ChangeEvent::ReservationStatusChanged {
            reservation_id: reservation.id.clone(),
            from: before.status,
            to: reservation.status,
        },
    )
    .await;

    Ok(Json(reservation))
}

/// Handler for GET `/api/config` endpoint.
async fn handle_get_config(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Configuration>, HttpError> {
    info!("Handling get_config request");

    let mut store = app_state.store.lock().await;
    let config: Configuration = get_configuration(&mut store)?;
    drop(store);

    Ok(Json(config))
}

/// Handler for PATCH `/api/config` endpoint.
///
/// Merges the patch into the stored configuration, field by field.
async fn handle_update_config(
    AxumState(app_state): AxumState<AppState>,
    Json(patch): Json<ConfigurationPatch>,
) -> Result<Json<Configuration>, HttpError> {
    info!("Handling update_config request");

    let mut store = app_state.store.lock().await;
    let config: Configuration = update_configuration(&mut store, patch)?;
    drop(store);

    publish(&app_state, &ChangeEvent::ConfigurationChanged).await;

    Ok(Json(config))
}

/// Handler for GET `/api/courts` endpoint.
async fn handle_list_courts(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<CourtsQuery>,
) -> Result<Json<Vec<Court>>, HttpError> {
    info!(active_only = ?params.active_only, "Handling list_courts request");

    let mut store = app_state.store.lock().await;
    let courts: Vec<Court> = list_courts(&mut store, params.active_only.unwrap_or(false))?;
    drop(store);

    Ok(Json(courts))
}

/// Handler for POST `/api/courts` endpoint.
async fn handle_create_court(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCourtRequest>,
) -> Result<Json<Court>, HttpError> {
    info!(name = %req.name, "Handling create_court request");

    let mut store = app_state.store.lock().await;
    let court: Court = create_court(&mut store, req)?;
    drop(store);

    publish(&app_state, &ChangeEvent::CourtsChanged).await;

    Ok(Json(court))
}

/// Handler for PATCH `/api/courts/{id}` endpoint.
async fn handle_update_court(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    Json(patch): Json<CourtPatch>,
) -> Result<Json<Court>, HttpError> {
    info!(court_id = court_id, "Handling update_court request");

    let mut store = app_state.store.lock().await;
    let court: Court = update_court(&mut store, court_id, patch)?;
    drop(store);

    publish(&app_state, &ChangeEvent::CourtsChanged).await;

    Ok(Json(court))
}

/// Handler for DELETE `/api/courts/{id}` endpoint.
///
/// Refuses while the court still has upcoming non-cancelled reservations.
async fn handle_delete_court(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(court_id = court_id, "Handling delete_court request");

    let mut store = app_state.store.lock().await;
    delete_court(&mut store, court_id, local_today())?;
    drop(store);

    publish(&app_state, &ChangeEvent::CourtsChanged).await;

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted court {court_id}")),
    }))
}

/// Handler for GET `/api/facility` endpoint.
///
/// Returns the public facility summary.
async fn handle_get_facility(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FacilityResponse>, HttpError> {
    info!("Handling get_facility request");

    let mut store = app_state.store.lock().await;
    let facility: FacilityResponse = get_facility(&mut store)?;
    drop(store);

    Ok(Json(facility))
}

/// Handler for GET `/api/stats` endpoint.
///
/// Returns booking statistics for a date.
async fn handle_get_stats(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, HttpError> {
    info!(date = %params.date, "Handling get_stats request");

    let mut store = app_state.store.lock().await;
    let stats: StatsResponse = get_stats(&mut store, params.date)?;
    drop(store);

    Ok(Json(stats))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/availability", get(handle_get_availability))
        .route("/api/reservations", post(handle_create_reservation))
        .route("/api/reservations", get(handle_list_reservations))
        .route("/api/reservations/{id}", get(handle_get_reservation))
        .route("/api/reservations/{id}", patch(handle_update_reservation))
        .route(
            "/api/reservations/{id}/status",
            patch(handle_update_reservation_status),
        )
        .route("/api/reservations/{id}", delete(handle_cancel_reservation))
        .route("/api/config", get(handle_get_config))
        .route("/api/config", patch(handle_update_config))
        .route("/api/courts", get(handle_list_courts))
        .route("/api/courts", post(handle_create_court))
        .route("/api/courts/{id}", patch(handle_update_court))
        .route("/api/courts/{id}", delete(handle_delete_court))
        .route("/api/facility", get(handle_get_facility))
        .route("/api/stats", get(handle_get_stats))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Courtbook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let store: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let mut bus: EventBus = EventBus::new();
    bus.subscribe(Box::new(|event| {
        debug!(event = ?event, "Change event published");
    }));

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        events: Arc::new(Mutex::new(bus)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
