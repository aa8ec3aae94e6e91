use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthError, TokenIssuer, TokenVerifier};
use crate::config::SecurityConfig;
use crate::database::CatalogStore;
use crate::handlers::{authors, books, genres, health, languages, login};
use crate::middleware::authenticate;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, security: &SecurityConfig) -> Result<Self, AuthError> {
        let ttl = Duration::minutes(security.token_ttl_minutes);
        Ok(Self {
            store,
            issuer: Arc::new(TokenIssuer::new(&security.secret, ttl)?),
            verifier: Arc::new(TokenVerifier::new(&security.secret)?),
        })
    }
}

pub fn app(state: AppState) -> Router {
    // Every catalog route needs a valid token; writes additionally check admin
    let catalog = Router::new()
        .merge(book_routes())
        .merge(author_routes())
        .merge(genre_routes())
        .merge(language_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        // Public
        .route(health::PATH, get(health::health))
        .route(login::PATH, post(login::login))
        .merge(catalog)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn item_path(collection: &str) -> String {
    format!("{collection}/:id")
}

fn book_routes() -> Router<AppState> {
    Router::new()
        .route(
            books::PATH,
            get(books::list_books)
                .post(books::create_book)
                .options(books::collection_options),
        )
        .route(
            &item_path(books::PATH),
            get(books::get_book)
                .put(books::replace_book)
                .patch(books::patch_book)
                .delete(books::delete_book)
                .options(books::item_options),
        )
}

fn author_routes() -> Router<AppState> {
    Router::new()
        .route(
            authors::PATH,
            get(authors::list_authors)
                .post(authors::create_author)
                .options(authors::collection_options),
        )
        .route(
            &item_path(authors::PATH),
            get(authors::get_author)
                .put(authors::replace_author)
                .patch(authors::patch_author)
                .delete(authors::delete_author)
                .options(authors::item_options),
        )
}

fn genre_routes() -> Router<AppState> {
    Router::new()
        .route(
            genres::PATH,
            get(genres::list_genres)
                .post(genres::create_genre)
                .options(genres::collection_options),
        )
        .route(
            &item_path(genres::PATH),
            get(genres::get_genre)
                .put(genres::replace_genre)
                .delete(genres::delete_genre)
                .options(genres::item_options),
        )
}

fn language_routes() -> Router<AppState> {
    Router::new()
        .route(
            languages::PATH,
            get(languages::list_languages)
                .post(languages::create_language)
                .options(languages::collection_options),
        )
        .route(
            &item_path(languages::PATH),
            get(languages::get_language)
                .put(languages::replace_language)
                .delete(languages::delete_language)
                .options(languages::item_options),
        )
}
