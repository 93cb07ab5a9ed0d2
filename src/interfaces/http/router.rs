//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, EmptyData};
use super::middleware::{auth_middleware, AuthState};
use super::modules::{
    admin, auth, availability, health, metrics, request_id, reservations, rooms, settings, users,
};
use crate::application::{BookingService, IdentityService, RoomCatalog};
use crate::config::{ApplicationSettings, CorsConfig};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;

/// Everything the handlers need. Each handler extracts its own slice via
/// `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub catalog: Arc<RoomCatalog>,
    pub booking: Arc<BookingService>,
    pub identity: Arc<IdentityService>,
    pub settings: ApplicationSettings,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        settings: ApplicationSettings,
    ) -> Self {
        let catalog = Arc::new(RoomCatalog::new(repos.clone()));
        let booking = Arc::new(BookingService::new(repos.clone(), catalog.clone()));
        let identity = Arc::new(IdentityService::new(repos.clone(), jwt_config));
        Self {
            db,
            repos,
            catalog,
            booking,
            identity,
            settings,
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            jwt_config: s.identity.jwt_config().clone(),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            identity: Arc::clone(&s.identity),
        }
    }
}

impl FromRef<AppState> for rooms::RoomHandlerState {
    fn from_ref(s: &AppState) -> Self {
        rooms::RoomHandlerState {
            catalog: Arc::clone(&s.catalog),
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<AppState> for reservations::ReservationHandlerState {
    fn from_ref(s: &AppState) -> Self {
        reservations::ReservationHandlerState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<AppState> for admin::AdminHandlerState {
    fn from_ref(s: &AppState) -> Self {
        admin::AdminHandlerState {
            booking: Arc::clone(&s.booking),
            identity: Arc::clone(&s.identity),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for ApplicationSettings {
    fn from_ref(s: &AppState) -> Self {
        s.settings.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        settings::app_settings,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        users::get_profile,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::refresh_rooms,
        rooms::available_rooms,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        availability::check_availability,
        // Admin
        admin::dashboard,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            users::ProfileResponse,
            rooms::RoomDto,
            rooms::CreateRoomRequest,
            rooms::RoomCatalogResponse,
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            reservations::UpdateReservationRequest,
            availability::AvailabilityResponse,
            admin::DashboardResponse,
            health::HealthResponse,
            health::ComponentHealth,
            settings::AppSettingsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness, readiness and public settings"),
        (name = "Authentication", description = "Registration and login (JWT)"),
        (name = "Users", description = "Signed-in user profile"),
        (name = "Rooms", description = "Room catalog and free-room lookup"),
        (name = "Reservations", description = "Booking lifecycle and availability checks"),
        (name = "Admin", description = "Admin-only endpoints"),
    ),
    info(
        title = "Room Booking API",
        version = "1.0.0",
        description = "REST API for booking meeting rooms without double-booking",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// `["*"]` allows any origin; invalid entries are skipped.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is given.
pub fn create_api_router(
    state: AppState,
    cors: &CorsConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let auth_state = AuthState::from_ref(&state);
    let require_auth = || middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route(
            "/me",
            get(auth::get_current_user).route_layer(require_auth()),
        );

    // Reads are public, writes need a token; admin checks happen in handlers.
    let room_routes = Router::new()
        .route(
            "/",
            get(rooms::list_rooms).merge(post(rooms::create_room).route_layer(require_auth())),
        )
        .route(
            "/refresh",
            post(rooms::refresh_rooms).route_layer(require_auth()),
        )
        .route("/available", get(rooms::available_rooms))
        .route("/{id}", get(rooms::get_room));

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations)
                .merge(post(reservations::create_reservation).route_layer(require_auth())),
        )
        .route(
            "/{id}",
            get(reservations::get_reservation).merge(
                axum::routing::put(reservations::update_reservation)
                    .delete(reservations::delete_reservation)
                    .route_layer(require_auth()),
            ),
        );

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/appsettings", get(settings::app_settings))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/rooms", room_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .route(
            "/api/v1/availability",
            get(availability::check_availability),
        )
        .route(
            "/api/v1/user/profile",
            get(users::get_profile).route_layer(require_auth()),
        )
        .route(
            "/api/v1/admin/dashboard",
            get(admin::dashboard).route_layer(require_auth()),
        )
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new().merge(swagger_routes).merge(api);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}
