use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::JsonApiError;

pub const INCORRECT_BODY: &str = "incorrect body";

/// JSON request body that ignores `Content-Type` and rejects with
/// `400 {"message": "incorrect body"}` on any read or decode failure.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "failed to read request body");
            JsonApiError::bad_request(INCORRECT_BODY)
        })?;
        decode(&bytes).map(JsonBody)
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonApiError> {
    serde_json::from_slice(bytes).map_err(|e| {
        debug!(error = %e, "rejected request body");
        JsonApiError::bad_request(INCORRECT_BODY)
    })
}
