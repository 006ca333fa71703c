use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState};
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_portal::auth::SessionAuthority;
use job_portal::config::AppConfig;
use job_portal::error::AppError;
use job_portal::store::InMemoryStore;
use job_portal::telemetry;
use job_portal::JobPortalService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryStore::new());
    let service = Arc::new(JobPortalService::new(store.clone(), store));
    let authority = Arc::new(SessionAuthority::new(&config.auth, config.environment));

    let app = with_portal_routes(service, authority)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = ?config.environment,
        %addr,
        origins = ?config.cors.allowed_origins,
        "job server ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
