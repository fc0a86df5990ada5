//! Rate limiting middleware.
//!
//! Every route passes through here first. Quota metadata is attached to
//! admitted responses as X-RateLimit-* headers; rejected requests are
//! answered 429 with a Retry-After hint and never reach a handler.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use wastesmart_core::ports::{RateLimitDecision, RateLimiter};
use wastesmart_shared::ErrorResponse;

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: Arc<dyn RateLimiter>,
}

fn quota_headers(decision: &RateLimitDecision) -> [(HeaderName, HeaderValue); 3] {
    [
        (
            HeaderName::from_static("x-ratelimit-limit"),
            HeaderValue::from(decision.limit),
        ),
        (
            HeaderName::from_static("x-ratelimit-remaining"),
            HeaderValue::from(decision.remaining),
        ),
        (
            HeaderName::from_static("x-ratelimit-reset"),
            HeaderValue::from_str(&decision.reset_at.to_rfc3339())
                .unwrap_or(HeaderValue::from_static("")),
        ),
    ]
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let limiter = self.limiter.clone();

        // Client identity: source address, as seen through proxies.
        let key = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        // The admit decision must land before the inner service runs;
        // the limiter itself never blocks or suspends.
        let check_result = futures::executor::block_on(limiter.check(&key));

        match check_result {
            Ok(decision) if !decision.allowed => {
                tracing::warn!(client = %key, retry_after = decision.retry_after_secs,
                    "Rate limit exceeded");

                let error = ErrorResponse::too_many_requests(
                    "Too many requests. Please try again later.",
                    decision.retry_after_secs,
                );

                let mut builder = HttpResponse::TooManyRequests();
                for (name, value) in quota_headers(&decision) {
                    builder.insert_header((name, value));
                }
                let response = builder
                    .insert_header(("Retry-After", decision.retry_after_secs.to_string()))
                    .json(error);

                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
            Ok(decision) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let mut res = fut.await?;
                    for (name, value) in quota_headers(&decision) {
                        res.headers_mut().insert(name, value);
                    }
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                // Fail open: a broken limiter must not take the API down.
                tracing::error!("Rate limiter error, failing open: {}", err);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}
