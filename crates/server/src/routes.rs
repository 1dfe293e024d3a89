use axum::{
    http::StatusCode,
    routing::get,
    Router,
};
use service::{books::ConnectionManager, people::PeopleStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::JsonApiError;

pub mod books;
pub mod people;

/// Book service: `/books` and `/books/:isbn`.
pub fn build_books_router(manager: ConnectionManager) -> Router {
    let router = Router::new()
        .route(
            "/books",
            get(books::list_books)
                .put(books::create_book)
                .fallback(method_not_allowed),
        )
        .route(
            "/books/:isbn",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(manager);
    with_layers(router)
}

/// People service: `/people` and `/people/:id`.
pub fn build_people_router(store: PeopleStore) -> Router {
    let router = Router::new()
        .route("/people", get(people::list_people).fallback(method_not_allowed))
        .route(
            "/people/:id",
            get(people::get_person)
                .post(people::create_person)
                .delete(people::delete_person)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(store);
    with_layers(router)
}

/// Unknown path, answered in the same JSON shape as handler errors.
async fn not_found() -> JsonApiError {
    JsonApiError::not_found("not found")
}

/// Known path, unsupported verb.
async fn method_not_allowed() -> JsonApiError {
    JsonApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

fn with_layers(router: Router) -> Router {
    router.layer(CorsLayer::very_permissive()).layer(
        TraceLayer::new_for_http()
            // one INFO span per request with method and path
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            // status code and latency
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx at ERROR
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
