//! RUBI server error type.

use axum::{
    http::{Response, StatusCode},
    response::IntoResponse,
};
use rubi_api::response as res;

pub type RubiResult<T> = Result<T, RubiError>;

pub struct RubiError(eyre::Error);

impl<E> From<E> for RubiError
where
    E: Into<eyre::Error>,
{
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for RubiError {
    fn into_response(self) -> axum::response::Response {
        let err = res::Error {
            message: format!("{:#?}", self.0),
        };
        let body = serde_json::to_string(&err).expect("failed to serialize response");
        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(body)
            .expect("failed to construct response")
            .into_response()
    }
}
