//! Per client IP request limiting for the API routes.
//!
//! Each address gets `max_requests` requests per fixed window. The
//! window starts with the first request seen from that address.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::public::ApiError;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    by_ip: HashMap<IpAddr, Window>,
    last_sweep: Instant,
}

#[derive(Clone, Debug)]
pub struct RateLimiter {
    windows: Arc<Mutex<Windows>>,
    max_requests: u32,
    window: Duration,
    trust_proxy: bool,
}

impl RateLimiter {
    /// A `max_requests` of zero turns limiting off.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(Windows {
                by_ip: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            max_requests,
            window,
            trust_proxy: false,
        }
    }

    /// Key clients on the first `x-forwarded-for` address. Only safe
    /// behind a reverse proxy that sets the header itself.
    pub fn trust_proxy(mut self, trust: bool) -> Self {
        self.trust_proxy = trust;
        self
    }

    /// Record a request from `ip`, returning false once the address is
    /// over its budget for the current window.
    pub fn check(&self, ip: IpAddr) -> bool {
        if self.max_requests == 0 {
            return true;
        }

        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        // Drop expired windows once per window so the map doesn't grow
        // without bound
        if now.duration_since(windows.last_sweep) >= self.window {
            let window = self.window;
            windows
                .by_ip
                .retain(|_, w| now.duration_since(w.started) < window);
            windows.last_sweep = now;
        }

        let entry = windows.by_ip.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_ip
            .len()
    }

    fn client_ip(&self, request: &Request) -> IpAddr {
        if self.trust_proxy {
            // Behind a reverse proxy the first forwarded address is the client
            if let Some(ip) = request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|v| v.trim().parse::<IpAddr>().ok())
            {
                return ip;
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let ip = limiter.client_ip(&request);
    if limiter.check(ip) {
        next.run(request).await
    } else {
        tracing::warn!("Rate limit exceeded for {}", ip);
        ApiError::RateLimited.into_response()
    }
}
