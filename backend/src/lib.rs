//! # Stripo backend
//!
//! Local backend of the infant care tracker: medication schedules, the
//! therapy agenda, the care team contact list and the caregiver profile.
//!
//! ## Architecture
//!
//! ```text
//! IO layer (REST API, axum handlers)
//!     ↓
//! Domain layer (services, schedule and agenda calculations)
//!     ↓
//! Storage layer (SQLite or JSON files, one record per key)
//! ```
//!
//! [`initialize_backend`] wires the layers together and [`create_router`]
//! exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::domain::{
    Clock, DashboardService, MedicationService, ProfessionalService, ProfileService,
    StateController, TherapyService,
};
use crate::storage::{DbConnection, JsonFileConnection, RecordStorage, RecordStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub medication_service: MedicationService,
    pub therapy_service: TherapyService,
    pub professional_service: ProfessionalService,
    pub profile_service: ProfileService,
    pub dashboard_service: DashboardService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Load all records from `storage` and build the services around them
    pub async fn build(storage: Arc<dyn RecordStorage>, config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = RecordStore::new(storage);
        let state = Arc::new(StateController::load(store).await.context("Failed to load stored records")?);
        let locale = config.display_locale;

        Ok(Self {
            medication_service: MedicationService::new(state.clone(), clock.clone()),
            therapy_service: TherapyService::new(state.clone(), clock.clone(), locale),
            professional_service: ProfessionalService::new(state.clone(), clock.clone()),
            profile_service: ProfileService::new(state.clone(), clock.clone()),
            dashboard_service: DashboardService::new(state, clock, locale),
            config: Arc::new(config),
        })
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(data_dir: &Path, config: AppConfig, clock: Arc<dyn Clock>) -> Result<AppState> {
    info!("Setting up {:?} storage in {:?}", config.storage_backend, data_dir);
    let storage: Arc<dyn RecordStorage> = match config.storage_backend {
        StorageBackend::Sqlite => Arc::new(DbConnection::init(data_dir).await?),
        StorageBackend::JsonFiles => Arc::new(JsonFileConnection::new(data_dir)?),
    };

    info!("Setting up domain model");
    AppState::build(storage, config, clock).await
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Result<Router> {
    let origin = app_state
        .config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed_origin '{}'", app_state.config.allowed_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/dashboard", io::rest::dashboard_apis::router())
        .nest("/profile", io::rest::profile_apis::router())
        .nest("/medications", io::rest::medication_apis::router())
        .nest("/schedule", io::rest::medication_apis::schedule_router())
        .nest("/therapies", io::rest::therapy_apis::router())
        .nest("/agenda", io::rest::therapy_apis::agenda_router())
        .nest("/professionals", io::rest::professional_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
