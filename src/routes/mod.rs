//! Router assembly: common and resource routes behind the shared middleware stack.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::{entity_routes, route_table, RouteEntry, Verb};

use crate::boundary::{error_boundary, panic_response};
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, HeaderValue},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

fn security_headers() -> [(HeaderName, &'static str); 4] {
    [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::X_DNS_PREFETCH_CONTROL, "off"),
        (header::REFERRER_POLICY, "no-referrer"),
    ]
}

/// The whole application. Store failures and panics end at the error boundary.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.mode, error_boundary))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)),
        );
    for (name, value) in security_headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router
}
