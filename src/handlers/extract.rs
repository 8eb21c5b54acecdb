use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::database::Page;
use crate::error::ApiError;

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON is a 400, a body failing validation a 422 with the
/// offending fields.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// `?limit=&offset=` query. Unparseable, non-positive limits and negative
/// offsets fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl Pagination {
    pub fn page(&self) -> Page {
        let mut page = Page::default();
        if let Some(limit) = self.limit.as_deref().and_then(|l| l.parse::<i64>().ok()) {
            if limit > 0 {
                page.limit = limit;
            }
        }
        if let Some(offset) = self.offset.as_deref().and_then(|o| o.parse::<i64>().ok()) {
            if offset >= 0 {
                page.offset = offset;
            }
        }
        page
    }
}
