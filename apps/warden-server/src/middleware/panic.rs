//! Panic containment - a panicking handler yields a 500 envelope instead of
//! tearing down the worker.

use std::any::Any;
use std::future::{Ready, ready};
use std::panic::{self, AssertUnwindSafe};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::middleware::error::AppError;

/// Middleware that converts handler panics into `AppError::Internal`.
///
/// No `HttpRequest` handle is kept across the inner call: routing needs the
/// request to be uniquely owned.
pub struct CatchPanic;

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = CatchPanicService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchPanicService { service }))
    }
}

pub struct CatchPanicService<S> {
    service: S,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}

fn panicked(method: &str, path: &str, payload: &(dyn Any + Send)) -> Error {
    tracing::error!(
        %method,
        %path,
        "Handler panicked: {}",
        panic_message(payload)
    );
    AppError::Internal("handler panicked".to_string()).into()
}

impl<S, B> Service<ServiceRequest> for CatchPanicService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_owned();

        // Routing and extraction can panic before the inner future exists
        let fut = match panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                return Box::pin(ready(Err(panicked(&method, &path, payload.as_ref()))));
            }
        };

        Box::pin(async move {
            AssertUnwindSafe(fut)
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(panicked(&method, &path, payload.as_ref())))
        })
    }
}
