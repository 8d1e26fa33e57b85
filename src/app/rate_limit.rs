use std::collections::HashMap;
use std::sync::{
    Mutex,
    PoisonError,
};
use std::time::{
    Duration,
    Instant,
};

use actix_web::body::{
    EitherBody,
    MessageBody,
};
use actix_web::dev::{
    ServiceRequest,
    ServiceResponse,
};
use actix_web::middleware::Next;
use actix_web::{
    web,
    ResponseError,
};

use crate::routes::RouteError;

/// Expired windows are swept once this many clients are tracked.
const SWEEP_THRESHOLD: usize = 10_000;

struct FixedWindow {
    started_at: Instant,
    hits: u32,
}

/// Fixed window request counter keyed by client address.
///
/// State is process local: every worker shares one limiter but separate
/// processes count independently.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, FixedWindow>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        RateLimiter {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request from `client`, returning whether it is allowed.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        if windows.len() >= SWEEP_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started_at) < self.window);
        }
        let window = windows
            .entry(client.to_string())
            .or_insert(FixedWindow {
                started_at: now,
                hits: 0,
            });
        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.hits = 0;
        }
        window.hits = window.hits.saturating_add(1);
        window.hits <= self.max_requests
    }
}

/// Middleware rejecting requests over the limit with a 429 envelope.
///
/// Requests pass through untouched when no `RateLimiter` is registered.
pub async fn enforce_rate_limit<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let allowed = match req.app_data::<web::Data<RateLimiter>>() {
        Some(limiter) => {
            let client = req
                .peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            limiter.check(&client)
        }
        None => true,
    };
    if !allowed {
        tracing::warn!(path = %req.path(), "rate limit exceeded");
        let response = RouteError::TooManyRequests.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }
    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
