//! Web server for RUBI.

pub mod converter;
pub mod error;
pub mod handlers;
pub mod tokenizer;

use axum::{routing::post, Router};
use rubi::Annotator;
use rubi_core::tokenizer::{ReadingConverter, Tokenizer};
use std::{fmt::Debug, ops::Deref, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, services::ServeDir};

#[derive(Clone)]
pub struct RubiState(Arc<RubiStateCore>);

impl Deref for RubiState {
    type Target = RubiStateCore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for RubiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rubi")
    }
}

pub struct RubiStateCore {
    pub annotator: Annotator,
}

/// Builds the router: the API routes take precedence, everything else is
/// served from the static directory.
pub fn router(state: RubiState, static_dir: PathBuf) -> Router<()> {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/furigana", post(handlers::generate))
                .layer(CorsLayer::very_permissive()),
        )
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Builds the router with the shared tokenizer and converter initialized
/// once. A tokenizer that fails to initialize degrades the service to
/// fallback readings instead of preventing startup.
pub fn router_from_vars(static_dir: PathBuf) -> Router<()> {
    let tokenizer = match tokenizer::LinderaTokenizer::new() {
        Ok(tokenizer) => Some(Arc::new(tokenizer) as Arc<dyn Tokenizer>),
        Err(error) => {
            tracing::warn!("Failed to initialize the tokenizer: {error}");
            None
        }
    };
    let converter = Some(Arc::new(converter::KakasiConverter) as Arc<dyn ReadingConverter>);
    let annotator = Annotator::new(tokenizer, converter);
    let state = RubiState(Arc::new(RubiStateCore { annotator }));
    router(state, static_dir)
}
