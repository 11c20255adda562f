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
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, put},
};
use chrono_tz::Tz;
use clap::Parser;
use larder_api::{
    ApiError, DeleteLocationResponse, DeliveryStore, LinkSiteRequest, LocationSitesResponse,
    LocationsResponse, SelectLocationRequest, SelectPeriodRequest, SelectionResponse,
};
use larder_domain::{
    AddressFields, DeliveryLocation, LocationDraft, LocationId, LocationPatch, ProviderId, Site,
    SiteId, SiteTypeId,
};
use larder_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Larder Server - HTTP server for the Larder delivery scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone whose calendar defines delivery weeks
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Insert a demo provider, site type, and site on startup
    #[arg(long)]
    seed: bool,
}

/// Application state shared across handlers.
///
/// The store holds the loaded selection, so every request goes through the
/// same instance behind a Mutex.
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<DeliveryStore<Persistence>>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Converts the error a failed store operation left behind.
fn stored_error(store: &mut DeliveryStore<Persistence>) -> HttpError {
    store.take_error().map_or_else(
        || HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Operation failed without an error"),
        },
        HttpError::from,
    )
}

fn selection_response(store: &DeliveryStore<Persistence>) -> SelectionResponse {
    SelectionResponse {
        period_id: store.selection().period_id(),
        location_id: store.selection().location_id(),
        period: store.selected_period().cloned(),
        location: store.selected_location().cloned(),
    }
}

/// Handler for GET `/locations` endpoint.
///
/// Resolves the current periods and returns their locations.
async fn handle_list_locations(
    State(app_state): State<AppState>,
) -> Result<Json<LocationsResponse>, HttpError> {
    info!("Handling list_locations request");

    let mut store = app_state.store.lock().await;
    store.fetch_locations();
    if store.error().is_some() {
        return Err(stored_error(&mut store));
    }

    Ok(Json(LocationsResponse {
        periods: store.delivery_periods().to_vec(),
        locations: store.locations().to_vec(),
        selection: store.selection(),
    }))
}

/// Handler for POST `/locations` endpoint.
async fn handle_create_location(
    State(app_state): State<AppState>,
    Json(draft): Json<LocationDraft>,
) -> Result<(StatusCode, Json<DeliveryLocation>), HttpError> {
    info!(name = %draft.name, "Handling create_location request");

    let mut store = app_state.store.lock().await;
    let location: DeliveryLocation = store
        .add_location(&draft)
        .ok_or_else(|| stored_error(&mut store))?;

    Ok((StatusCode::CREATED, Json(location)))
}

/// Handler for PATCH `/locations/{id}` endpoint.
async fn handle_update_location(
    State(app_state): State<AppState>,
    Path(location_id): Path<i64>,
    Json(patch): Json<LocationPatch>,
) -> Result<Json<DeliveryLocation>, HttpError> {
    info!(location_id, "Handling update_location request");

    let mut store = app_state.store.lock().await;
    let location: DeliveryLocation = store
        .update_location(LocationId::new(location_id), &patch)
        .ok_or_else(|| stored_error(&mut store))?;

    Ok(Json(location))
}

/// Handler for DELETE `/locations/{id}` endpoint.
async fn handle_delete_location(
    State(app_state): State<AppState>,
    Path(location_id): Path<i64>,
) -> Result<Json<DeleteLocationResponse>, HttpError> {
    info!(location_id, "Handling delete_location request");

    let id: LocationId = LocationId::new(location_id);
    let mut store = app_state.store.lock().await;
    if !store.delete_location(id) {
        return Err(stored_error(&mut store));
    }

    Ok(Json(DeleteLocationResponse {
        location_id: id,
        message: format!("Deleted delivery location {id}"),
    }))
}

/// Handler for GET `/locations/{id}/sites` endpoint.
async fn handle_list_location_sites(
    State(app_state): State<AppState>,
    Path(location_id): Path<i64>,
) -> Json<LocationSitesResponse> {
    let id: LocationId = LocationId::new(location_id);
    let mut store = app_state.store.lock().await;
    let sites: Vec<Site> = store.get_location_sites(id);

    Json(LocationSitesResponse {
        location_id: id,
        sites,
    })
}

/// Handler for POST `/locations/{id}/sites` endpoint.
async fn handle_link_site(
    State(app_state): State<AppState>,
    Path(location_id): Path<i64>,
    Json(req): Json<LinkSiteRequest>,
) -> Result<Json<LocationSitesResponse>, HttpError> {
    info!(location_id, site_id = %req.site_id, "Handling link_site request");

    let id: LocationId = LocationId::new(location_id);
    let mut store = app_state.store.lock().await;
    if !store.add_site_to_location(req.site_id, id) {
        return Err(stored_error(&mut store));
    }

    Ok(Json(LocationSitesResponse {
        location_id: id,
        sites: store.get_location_sites(id),
    }))
}

/// Handler for DELETE `/locations/{id}/sites/{site_id}` endpoint.
async fn handle_unlink_site(
    State(app_state): State<AppState>,
    Path((location_id, site_id)): Path<(i64, i64)>,
) -> Result<Json<LocationSitesResponse>, HttpError> {
    info!(location_id, site_id, "Handling unlink_site request");

    let id: LocationId = LocationId::new(location_id);
    let mut store = app_state.store.lock().await;
    if !store.remove_site_from_location(SiteId::new(site_id), id) {
        return Err(stored_error(&mut store));
    }

    Ok(Json(LocationSitesResponse {
        location_id: id,
        sites: store.get_location_sites(id),
    }))
}

/// Handler for PUT `/selection/period` endpoint.
async fn handle_select_period(
    State(app_state): State<AppState>,
    Json(req): Json<SelectPeriodRequest>,
) -> Result<Json<SelectionResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    store.select_delivery_period(req.period_id);
    if store.error().is_some() {
        return Err(stored_error(&mut store));
    }

    Ok(Json(selection_response(&store)))
}

/// Handler for PUT `/selection/location` endpoint.
async fn handle_select_location(
    State(app_state): State<AppState>,
    Json(req): Json<SelectLocationRequest>,
) -> Json<SelectionResponse> {
    let mut store = app_state.store.lock().await;
    store.select_location(req.location_id);

    Json(selection_response(&store))
}

/// Handler for GET `/selection` endpoint.
async fn handle_get_selection(State(app_state): State<AppState>) -> Json<SelectionResponse> {
    let store = app_state.store.lock().await;
    Json(selection_response(&store))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/locations",
            get(handle_list_locations).post(handle_create_location),
        )
        .route(
            "/locations/{id}",
            patch(handle_update_location).delete(handle_delete_location),
        )
        .route(
            "/locations/{id}/sites",
            get(handle_list_location_sites).post(handle_link_site),
        )
        .route(
            "/locations/{id}/sites/{site_id}",
            delete(handle_unlink_site),
        )
        .route("/selection", get(handle_get_selection))
        .route("/selection/period", put(handle_select_period))
        .route("/selection/location", put(handle_select_location))
        .with_state(app_state)
}

/// Inserts the collaborators a location needs so the API is usable on a
/// fresh database.
fn seed_demo_data(persistence: &mut Persistence) -> Result<(), PersistenceError> {
    let provider_id: ProviderId = persistence.create_provider("Community Food Bank")?;
    let site_type_id: SiteTypeId = persistence.create_site_type("Pantry")?;
    let site: Site = persistence.create_site(
        "Main Street Pantry",
        Some(site_type_id),
        Some(&AddressFields::new("100 Main St", "Springfield", "IL", "62701")),
    )?;

    info!(
        provider_id = %provider_id,
        site_type_id = %site_type_id,
        site_id = %site.id,
        "Seeded demo data"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Larder Server");

    let timezone: Tz = args
        .timezone
        .parse()
        .map_err(|err| format!("Invalid timezone '{}': {err}", args.timezone))?;
    info!(timezone = %timezone, "Using timezone for delivery weeks");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed {
        seed_demo_data(&mut persistence)?;
    }

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(DeliveryStore::new(persistence, timezone))),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
