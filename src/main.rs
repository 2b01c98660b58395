//! # University Records - نقطه ورود برنامه
//!
//! ترتیب راه‌اندازی:
//! 1. لود `.env`
//! 2. راه‌اندازی tracing
//! 3. لود تنظیمات
//! 4. اتصال به دیتابیس و اجرای migration‌ها
//! 5. اجرای سرور HTTP

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use university_records::{
    api::create_router,
    config::{Config, Environment},
    database::Database,
    error::{AppError, Result},
};

/// نقطه ورود اصلی برنامه
///
/// # Errors
/// خطا برمیگردونه اگه:
/// - تنظیمات لود نشن
/// - دیتابیس متصل نشه
/// - سرور استارت نشه
#[tokio::main]
async fn main() -> Result<()> {
    // اگه فایل .env نباشه اوکیه
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_tracing(config.environment);

    info!(environment = ?config.environment, "Starting university records service");

    let database = Database::connect_with(&config.database_url, config.max_connections).await?;
    info!("Database connected");

    database.migrate().await?;
    info!("Database migrations applied");

    let addr = config.server_addr();
    let app = create_router(database, config);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

/// راه‌اندازی سیستم tracing
///
/// `RUST_LOG` فیلتر رو override میکنه. در production خروجی JSON هست.
fn init_tracing(environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("university_records=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if environment.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_level(true)
                    .pretty(),
            )
            .init();
    }
}

/// منتظر Ctrl+C
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
