use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_cart_item::add_cart_item;
use super::handlers::clear_cart::clear_cart;
use super::handlers::create_product::create_product;
use super::handlers::current_user::current_user;
use super::handlers::delete_product::delete_all_products;
use super::handlers::delete_product::delete_product;
use super::handlers::get_cart::get_cart;
use super::handlers::get_product::get_product;
use super::handlers::get_user::get_user;
use super::handlers::index::index;
use super::handlers::list_products::list_products;
use super::handlers::list_users::list_users;
use super::handlers::register::register;
use super::handlers::remove_cart_item::remove_cart_item;
use super::handlers::sign_in::sign_in;
use super::handlers::update_cart_item::update_cart_item;
use super::handlers::update_product::update_product;
use super::middleware::authenticate;
use crate::domain::cart::ports::CartServicePort;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub cart_service: Arc<dyn CartServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/auth/register", post(register))
        .route("/auth/signin", post(sign_in))
        .route("/users", get(list_users))
        .route("/users/:username", get(get_user))
        .route("/products", get(list_products))
        .route("/products/:slug", get(get_product));

    // The product id is captured under `:slug`; one parameter name per segment.
    let protected_routes = Router::new()
        .route("/auth/me", get(current_user))
        .route("/products", post(create_product).delete(delete_all_products))
        .route(
            "/products/:slug",
            put(update_product).delete(delete_product),
        )
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_cart_item))
        .route(
            "/cart/items/:product_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

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
