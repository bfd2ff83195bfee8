mod error;
mod handlers;
mod validation;

pub use error::{ApiError, ErrorDetails};

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    let api = Router::new()
        // Employees
        .route("/employees", get(handlers::list_employees))
        .route("/employees", post(handlers::create_employee))
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/employees/{id}", put(handlers::update_employee))
        .route(
            "/employees/{id}/reporting-structure",
            get(handlers::get_reporting_structure),
        )
        // Compensation
        .route("/employees/{id}/compensation", get(handlers::list_compensations))
        .route("/employees/{id}/compensation", post(handlers::create_compensation))
        .route(
            "/employees/{id}/compensation/{effective_date}",
            get(handlers::get_compensation),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}
