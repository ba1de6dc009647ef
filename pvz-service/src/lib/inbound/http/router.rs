use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_product::add_product;
use super::handlers::close_last_reception::close_last_reception;
use super::handlers::create_pvz::create_pvz;
use super::handlers::create_reception::create_reception;
use super::handlers::delete_last_product::delete_last_product;
use super::handlers::dummy_login::dummy_login;
use super::handlers::list_pvz::list_pvz;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate;
use super::middleware::require_roles;
use crate::domain::pvz::ports::PvzServicePort;
use crate::domain::user::models::Role;
use crate::domain::user::ports::AuthServicePort;

const MODERATORS: &[Role] = &[Role::Moderator];
const EMPLOYEES: &[Role] = &[Role::Employee];
const STAFF: &[Role] = &[Role::Employee, Role::Moderator];

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub pvz_service: Arc<dyn PvzServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    pvz_service: Arc<dyn PvzServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        pvz_service,
    };

    let public_routes = Router::new()
        .route("/dummyLogin", post(dummy_login))
        .route("/register", post(register))
        .route("/login", post(login));

    let moderator_routes = Router::new()
        .route("/pvz", post(create_pvz))
        .route_layer(middleware::from_fn_with_state(MODERATORS, require_roles));

    let staff_routes = Router::new()
        .route("/pvz", get(list_pvz))
        .route_layer(middleware::from_fn_with_state(STAFF, require_roles));

    let employee_routes = Router::new()
        .route("/receptions", post(create_reception))
        .route("/products", post(add_product))
        .route("/pvz/:pvz_id/delete_last_product", post(delete_last_product))
        .route("/pvz/:pvz_id/close_last_reception", post(close_last_reception))
        .route_layer(middleware::from_fn_with_state(EMPLOYEES, require_roles));

    let protected_routes = Router::new()
        .merge(moderator_routes)
        .merge(staff_routes)
        .merge(employee_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
