//! # لایه API
//!
//! این ماژول HTTP handlers و routing رو مدیریت میکنه.
//!
//! ## مفاهیم Rust + Axum:
//! - **Router**: تعریف مسیرها
//! - **Generic Handlers**: یک handler برای همه entity ها
//! - **Extractors**: استخراج داده از request
//! - **State**: اشتراک state بین handlers
//! - **Tower**: زیرساخت middleware
//!
//! ## ساختار URL‌ها:
//! - `POST /api/courses` - ساخت درس
//! - `GET|PATCH|DELETE /api/courses/:cid`
//! - `POST /api/lecturers`, `GET|PATCH|DELETE /api/lecturers/:lid`
//! - `POST /api/students`, `GET|PATCH|DELETE /api/students/:stid`
//! - `POST /api/course-registers`, `GET|PATCH|DELETE /api/course-registers/:cid`
//! - `POST /api/presented-courses`, `GET|PATCH|DELETE /api/presented-courses/:cid`
//! - `GET /health` - Health check

mod extractors;
mod handlers;
mod middleware;

pub use extractors::*;
pub use handlers::*;
pub use middleware::*;

use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    database::Database,
    models::{Course, CourseRegister, Entity, Lecturer, PresentedCourse, Student},
    services::AppState,
};

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// # Arguments
/// * `db` - اتصال دیتابیس
/// * `config` - تنظیمات برنامه
pub fn create_router(db: Database, config: Config) -> Router {
    router(AppState::new(db, config))
}

/// ساخت Router از یک `AppState` آماده (تست‌ها context قوانین رو ثابت میکنن)
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().request_timeout_secs);

    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_id))
                .layer(axum_middleware::from_fn(request_timing))
                .layer(TimeoutLayer::new(timeout))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Route‌های API
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/courses", record_routes::<Course>())
        .nest("/lecturers", record_routes::<Lecturer>())
        .nest("/students", record_routes::<Student>())
        .nest("/course-registers", record_routes::<CourseRegister>())
        .nest("/presented-courses", record_routes::<PresentedCourse>())
}

/// CRUD یک entity
fn record_routes<E: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::records::create::<E>))
        .route(
            "/:key",
            get(handlers::records::get::<E>)
                .patch(handlers::records::update::<E>)
                .delete(handlers::records::delete::<E>),
        )
}
