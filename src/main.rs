mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::accommodations::{
    routes as accommodations_routes, AccommodationService, PgAccommodationRepository,
    PgAccommodationTypeRepository,
};
use crate::features::activities::{routes as activities_routes, ActivityService, PgActivityRepository};
use crate::features::auth::{
    routes as auth_routes, AuthService, ClientRegistry, JwtTokenIssuer, PgUserRepository,
};
use crate::features::images::{routes as images_routes, ImageService};
use crate::features::locations::{
    routes as locations_routes, AttractionService, LocationService, PgAttractionRepository,
    PgLocationRepository,
};
use crate::features::provinces::{routes as provinces_routes, PgProvinceRepository, ProvinceService};
use crate::features::public_users::{
    routes as public_users_routes, LoggingCodeSender, PgPublicUserRepository, PublicUserService,
};
use crate::features::vendors::{routes as vendors_routes, PgVendorRepository, VendorService};
use crate::shared::images::ImageUrls;
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
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

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let province_repo = Arc::new(PgProvinceRepository::new(pool.clone()));
    let activity_repo = Arc::new(PgActivityRepository::new(pool.clone()));
    let location_repo = Arc::new(PgLocationRepository::new(pool.clone()));
    let attraction_repo = Arc::new(PgAttractionRepository::new(pool.clone()));
    let public_user_repo = Arc::new(PgPublicUserRepository::new(pool.clone()));
    let vendor_repo = Arc::new(PgVendorRepository::new(pool.clone()));
    let accommodation_type_repo = Arc::new(PgAccommodationTypeRepository::new(pool.clone()));
    let accommodation_repo = Arc::new(PgAccommodationRepository::new(pool.clone()));

    // OAuth2 authorization server
    let token_issuer = Arc::new(JwtTokenIssuer::new(
        &config.auth.signing_key,
        config.auth.jwt_leeway,
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        token_issuer,
        ClientRegistry::from_config(&config.auth),
    ));
    if let Some(admin) = config.auth.bootstrap_admin.as_ref() {
        auth_service.ensure_bootstrap_admin(admin).await?;
    }
    tracing::info!("Auth service initialized");

    let image_urls = ImageUrls::new(config.app.public_base_url.clone());

    let province_service = Arc::new(ProvinceService::new(province_repo.clone()));
    let activity_service = Arc::new(ActivityService::new(
        activity_repo.clone(),
        image_urls.clone(),
    ));
    let attraction_service = Arc::new(AttractionService::new(
        attraction_repo.clone(),
        image_urls.clone(),
    ));
    let location_service = Arc::new(LocationService::new(
        location_repo.clone(),
        province_repo,
        activity_repo.clone(),
        Arc::clone(&attraction_service),
        image_urls.clone(),
    ));
    let public_user_service = Arc::new(PublicUserService::new(
        public_user_repo,
        user_repo,
        Arc::new(LoggingCodeSender),
        config.auth.verification_code_ttl,
    ));
    let vendor_service = Arc::new(VendorService::new(vendor_repo.clone()));
    let accommodation_service = Arc::new(AccommodationService::new(
        accommodation_repo.clone(),
        accommodation_type_repo,
        vendor_repo,
        image_urls,
    ));
    let image_service = Arc::new(ImageService::new(
        location_repo,
        attraction_repo,
        activity_repo,
        accommodation_repo,
    ));
    tracing::info!("Content services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

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

    // Protected routes (require a bearer access token; role checks live in the handlers)
    let protected_routes = Router::new()
        .merge(provinces_routes::routes(province_service))
        .merge(activities_routes::routes(activity_service))
        .merge(locations_routes::routes(location_service, attraction_service))
        .merge(vendors_routes::routes(vendor_service))
        .merge(accommodations_routes::routes(accommodation_service))
        .merge(public_users_routes::protected_routes(Arc::clone(
            &public_user_service,
        )))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new()
        .merge(auth_routes::routes(auth_service))
        .merge(public_users_routes::public_routes(public_user_service))
        .merge(images_routes::routes(image_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
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

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

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
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
