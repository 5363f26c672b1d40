//! Request extractors that keep binding failures apart from validation
//! failures.

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::QueryPayloadError, web};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use warden_shared::validation::{self, Rules};

use crate::middleware::error::AppError;

/// JSON body that has been deserialized and then checked against its rule
/// table.
///
/// ```ignore
/// async fn create(ValidatedJson(req): ValidatedJson<RoleRequest>) -> AppResult<HttpResponse> {
///     // `req.title` is present and within bounds here
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Rules + DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let web::Json(value) = body.await.map_err(|e| AppError::Bind(e.to_string()))?;
            Ok(ValidatedJson(validation::check(value)?))
        })
    }
}

/// Query-string bind failures become `AppError::Bind`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        AppError::Bind(err.to_string()).into()
    })
}

/// Parse a path id. A non-numeric id is a bind error, not a lookup miss.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::Bind(format!("invalid id: {raw}")))
}
