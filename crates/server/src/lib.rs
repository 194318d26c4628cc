#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! JSON-over-HTTP surface for liftlog. Routing and identity handling are
//! thin glue; all domain behavior lives in `liftlog-domain` and is invoked
//! through `Service<Database>`.

pub mod auth;
pub mod cache;
pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
};
use liftlog_domain::Service;
use liftlog_storage::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::SearchCache;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Service<Database>>,
    pub db: Database,
    pub search_cache: Arc<Mutex<SearchCache>>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            service: Arc::new(Service::new(db.clone())),
            db,
            search_cache: Arc::new(Mutex::new(SearchCache::default())),
        }
    }
}

#[must_use]
pub fn create_router(state: AppState, cors_origin: Option<String>) -> Router {
    // Default to localhost only; a deployment passes its frontend origin.
    let origin = cors_origin
        .and_then(|o| o.parse::<HeaderValue>().ok())
        .unwrap_or_else(|| HeaderValue::from_static("http://localhost:3000"));
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/exercises",
            get(handlers::exercises::list).post(handlers::exercises::create),
        )
        .route("/exercises/global", get(handlers::exercises::global))
        .route("/exercises/my", get(handlers::exercises::my))
        .route("/exercises/search", get(handlers::exercises::search))
        .route(
            "/admin/exercises/create",
            post(handlers::admin::create_exercise),
        )
        .route(
            "/admin/exercises/:id",
            get(handlers::admin::exercise_details)
                .put(handlers::admin::update_exercise)
                .delete(handlers::admin::delete_exercise),
        )
        .route(
            "/admin/exercises/:id/restore",
            post(handlers::admin::restore_exercise),
        )
        .route(
            "/admin/schedule",
            get(handlers::admin::list_schedule).post(handlers::admin::add_schedule_exercise),
        )
        .route(
            "/admin/schedule/initialize",
            post(handlers::admin::initialize_schedule),
        )
        .route(
            "/admin/schedule/reorder",
            post(handlers::admin::reorder_schedule),
        )
        .route(
            "/admin/schedule/update-day-type",
            post(handlers::admin::update_day_type),
        )
        .route(
            "/admin/schedule/:id",
            put(handlers::admin::rename_schedule).delete(handlers::admin::remove_schedule_exercise),
        )
        .route("/schedule/today", get(handlers::schedule::today))
        .route("/schedule/day/:day_of_week", get(handlers::schedule::by_day))
        .route("/schedule/weekly", get(handlers::schedule::weekly))
        .route("/schedule/status", get(handlers::schedule::status))
        .route("/schedule/swap-days", post(handlers::schedule::swap_days))
        .route("/workout/save", post(handlers::workout::save))
        .route("/workout/history", get(handlers::workout::history))
        .route("/workout/history/edit", put(handlers::workout::edit))
        .route("/workout/streak", get(handlers::workout::streak))
        .route("/analytics", get(handlers::analytics::report))
        .route(
            "/leaderboard/exercise-weights",
            get(handlers::leaderboard::exercise_weights),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::register_identity,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
