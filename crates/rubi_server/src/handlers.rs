//! /api/furigana

use crate::{error::RubiResult, RubiState};
use axum::{extract::State, Json};
use rubi_api::{request as req, response as res};

pub async fn generate(
    State(state): State<RubiState>,
    request: Json<req::Furigana<'static>>,
) -> RubiResult<Json<res::Furigana>> {
    let req::Furigana { text, skip_kana } = request.0;
    tracing::info!("Annotating {} bytes of text", text.len());

    let html = tokio::task::spawn_blocking(move || state.annotator.annotate(&text, skip_kana))
        .await?;
    Ok(Json(res::Furigana { html }))
}
