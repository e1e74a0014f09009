//! Request extractors whose rejections follow the API's JSON error shape.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::api::public::ApiError;

/// Drop-in for `axum::Json` on the request side. A body that is not
/// JSON, has the wrong shape, or is over the size limit is rejected
/// with an `ApiError` instead of axum's plain text response.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
