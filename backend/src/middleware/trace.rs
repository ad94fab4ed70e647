//! Request correlation middleware.
//!
//! Each request runs with a [`TraceId`] in task-local scope and inside a
//! `request` span carrying it. A valid UUID in the inbound `trace-id` header
//! is reused so callers can correlate across services; otherwise a fresh one
//! is minted. The identifier is echoed in the response header.
//!
//! Task-locals are not inherited by spawned tasks. Wrap work moved onto other
//! tasks in [`TraceId::scope`] to keep the identifier.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware scoping a [`TraceId`] around every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use hotel_backend::Trace;
///
/// let app = App::new().wrap(Trace);
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

/// Service wrapper produced by [`Trace`].
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
        let inbound = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let trace_id = TraceId::from_header_or_generate(inbound);
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let started = Instant::now();

        let fut = TraceId::scope(trace_id, {
            let inner = span.in_scope(|| self.service.call(req));
            async move {
                let mut res = inner.await?;
                debug!(
                    status = res.status().as_u16(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "request finished"
                );
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
        });
        Box::pin(fut.instrument(span))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::ApiResult;

    async fn echo_trace_id() -> HttpResponse {
        match TraceId::current() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn failing() -> ApiResult<HttpResponse> {
        Err(crate::domain::Error::conflict("room is already booked"))
    }

    fn header(res: &ServiceResponse) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned()
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_sees_the_echoed_trace_id() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let trace_id = header(&res);
        let body = test::read_body(res).await;

        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[rstest]
    #[case(Some("00000000-0000-0000-0000-000000000001"), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    #[actix_web::test]
    async fn inbound_uuid_is_reused(#[case] inbound: Option<&str>, #[case] reused: bool) {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = inbound {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }

        let res = test::call_service(&app, req.to_request()).await;
        let echoed = header(&res);

        assert_eq!(Some(echoed.as_str()) == inbound, reused);
        assert!(echoed.parse::<TraceId>().is_ok());
    }

    #[rstest]
    #[actix_web::test]
    async fn domain_errors_carry_the_request_trace_id() {
        let app = test::init_service(App::new().wrap(Trace).route("/", web::get().to(failing))).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let trace_id = header(&res);
        let body: serde_json::Value = test::read_body_json(res).await;

        assert_eq!(body["traceId"], trace_id.as_str());
        assert_eq!(body["code"], "conflict");
    }
}
