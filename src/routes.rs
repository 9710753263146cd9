use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyCors, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Build the full HTTP surface around `state`
pub fn app(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(CatchPanicLayer::custom(handle_panic));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::welcome))
        .route("/health", get(public::health))
        .route("/login", post(public::login))
        .route("/users", post(public::create_user))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Movies
        .route("/movies", get(protected::movie_list))
        .route("/movies/:title", get(protected::movie_get))
        .route("/movies/genre/:genre_name", get(protected::genre_get))
        .route("/movies/directors/:director_name", get(protected::director_get))
        // Users
        .route("/users", get(protected::user_list))
        .route(
            "/users/:username",
            get(protected::user_get)
                .put(protected::user_update)
                .delete(protected::user_delete),
        )
        // Favorites
        .route(
            "/users/:username/movies/:movie_id",
            post(protected::favorite_add).delete(protected::favorite_remove),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AnyCors)
        .allow_headers(AnyCors)
}

async fn not_found() -> ApiError {
    ApiError::not_found("not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("method not allowed")
}

/// Last-resort handler for anything that escaped a route handler
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    ApiError::internal_server_error("Something broke!").into_response()
}
