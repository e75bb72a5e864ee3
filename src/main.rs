mod core;
mod features;
mod shared;

use crate::core::config::{Config, StoreConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::geocoding::{routes as geocoding_routes, Geocoder, GeocodingService};
use crate::features::locations::{routes as locations_routes, NearbyService};
use crate::features::resources::{
    routes as resources_routes, PgResourceBackend, ResourceBackend, ResourceService,
    RestResourceBackend, SampleCatalog,
};
use crate::features::submissions::{
    routes as submissions_routes, DraftStore, SubmissionService, SubmissionState,
};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Pick the backing store: Postgres wins, then PostgREST, then none.
async fn select_backend(store: &StoreConfig) -> Option<Arc<dyn ResourceBackend>> {
    if let Some(db) = &store.database {
        match database::create_pool(db) {
            Ok(pool) => {
                tracing::info!("Running database migrations...");
                match database::run_migrations(&pool).await {
                    Ok(()) => tracing::info!("Database migrations completed successfully"),
                    Err(e) => tracing::error!("Database migrations failed: {}", e),
                }
                return Some(Arc::new(PgResourceBackend::new(pool)));
            }
            Err(e) => tracing::error!("Invalid database configuration: {}", e),
        }
    }

    if let Some(supabase) = &store.supabase {
        if let Some(backend) = RestResourceBackend::new(supabase) {
            if supabase.service_role_key.is_none() {
                tracing::warn!(
                    "SUPABASE_SERVICE_ROLE_KEY not set, resource writes will not be persisted"
                );
            }
            return Some(Arc::new(backend));
        }
    }

    None
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Sample catalog is generated once per process
    let catalog = Arc::new(SampleCatalog::generate(&mut rand::rng()));
    tracing::info!(
        "Sample catalog generated with {} resources",
        catalog.resources().len()
    );

    // Initialize Resource Service
    let backend = select_backend(&config.store).await;
    let resource_service = Arc::new(ResourceService::new(backend, Arc::clone(&catalog)));
    match resource_service.backend_name() {
        Some(name) => tracing::info!("Resource service initialized (backing store: {})", name),
        None => tracing::warn!("Resource service initialized without a backing store, serving sample data"),
    }

    if config.store.seed_sample_data {
        match resource_service.seed_if_empty().await {
            Ok(outcome) => tracing::info!("Sample data seeding: {:?}", outcome),
            Err(e) => tracing::error!("Sample data seeding failed: {}", e),
        }
    }

    // Initialize Geocoding Service
    if config.geocoding.access_token.is_none() {
        tracing::warn!("LOCATIONIQ_ACCESS_TOKEN not set, geocoding requests will fail");
    }
    let geocoder: Arc<dyn Geocoder> = Arc::new(GeocodingService::new(&config.geocoding));
    tracing::info!("Geocoding service initialized ({})", config.geocoding.base_url);

    // Initialize Nearby Service
    let nearby_service = Arc::new(NearbyService::new(
        Arc::clone(&geocoder),
        Arc::clone(&resource_service),
    ));

    // Initialize Submission Service
    let submission_state = SubmissionState {
        service: Arc::new(SubmissionService::new(
            Arc::clone(&geocoder),
            Arc::clone(&resource_service),
        )),
        drafts: Arc::new(DraftStore::new(&config.drafts)),
    };
    tracing::info!(
        "Submission service initialized (drafts: {})",
        config.drafts.dir.display()
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(resources_routes::routes(Arc::clone(&resource_service)))
        .merge(geocoding_routes::routes(Arc::clone(&geocoder)))
        .merge(locations_routes::routes(nearby_service))
        .merge(submissions_routes::routes(submission_state));

    let app = Router::new()
        .merge(swagger)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
