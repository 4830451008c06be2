//! Request correlation middleware.
//!
//! Every request is served with a UUID held in task-local storage, which
//! lets logs and error bodies from one request be tied together. A well-formed inbound `trace-id` header
//! is reused; anything else is replaced by a fresh identifier. The identifier
//! is echoed back in the response header of the same name.
//!
//! Spawned tasks do not inherit the identifier; wrap their futures in
//! [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Header carrying the trace identifier in both directions.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Correlation identifier of the request being served.
///
/// ```
/// use backend::TraceId;
///
/// let parsed: Result<TraceId, _> = "6f1c2c7e-8f44-4d4b-9a39-2b7b1f0c9a11".parse();
/// assert!(parsed.is_ok());
/// assert!("not-a-uuid".parse::<TraceId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }

    /// The identifier of the request in scope, if any.
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    fn from_request(req: &ServiceRequest) -> Self {
        req.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(Self::generate)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}

/// Middleware scoping a [`TraceId`] to each request and logging how it ended.
///
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::from_request(&req);
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, %trace_id, "failed to encode trace identifier header");
                }
            }
            log_completion(
                trace_id,
                &method,
                &path,
                res.status(),
                started.elapsed().as_millis(),
            );
            Ok(res)
        })
    }
}

fn log_completion(trace_id: TraceId, method: &str, path: &str, status: StatusCode, elapsed_ms: u128) {
    let status_code = status.as_u16();
    if status.is_server_error() {
        error!(%trace_id, method, path, status = status_code, elapsed_ms, "request failed");
    } else if status.is_client_error() {
        warn!(%trace_id, method, path, status = status_code, elapsed_ms, "request rejected");
    } else {
        info!(%trace_id, method, path, status = status_code, elapsed_ms, "request completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::BoxBody;
    use actix_web::{App, HttpResponse, test, web};

    #[tokio::test]
    async fn scoped_futures_observe_the_identifier() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    }

    #[tokio::test]
    async fn nothing_is_in_scope_outside_a_request() {
        assert_eq!(TraceId::current(), None);
    }

    async fn call_echo(req: test::TestRequest) -> ServiceResponse<BoxBody> {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async move {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;
        test::call_service(&app, req.to_request()).await
    }

    fn header_of(res: &ServiceResponse<BoxBody>) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned()
    }

    #[actix_web::test]
    async fn exposes_trace_id_in_handler_and_header() {
        let res = call_echo(test::TestRequest::get().uri("/")).await;
        let trace_id = header_of(&res);

        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
        assert!(Uuid::parse_str(&trace_id).is_ok());
    }

    #[actix_web::test]
    async fn reuses_well_formed_inbound_trace_id() {
        let inbound = "6f1c2c7e-8f44-4d4b-9a39-2b7b1f0c9a11";
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, inbound));

        let res = call_echo(req).await;

        assert_eq!(header_of(&res), inbound);
    }

    #[actix_web::test]
    async fn replaces_malformed_inbound_trace_id() {
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, "not-a-uuid"));

        let res = call_echo(req).await;

        let issued = header_of(&res);
        assert_ne!(issued, "not-a-uuid");
        assert!(Uuid::parse_str(&issued).is_ok());
    }
}
