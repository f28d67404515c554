use std::{
    collections::{HashMap, VecDeque},
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, Response},
    middleware::Next,
    response::IntoResponse,
};
use tokio::sync::Mutex;

use crate::{config::RateLimitConfig, error::ApiError};

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Tracked keys above which idle logs are swept.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scope {
    InscriptionPerMinute,
    DefaultPerHour,
    DefaultPerDay,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    scope: Scope,
    limit: u32,
    window: Duration,
}

type Logs = HashMap<(String, Scope), VecDeque<Instant>>;

/// Sliding-window request counter keyed by client IP.
///
/// `/inscription` has its own limit; every other route shares the default
/// hourly and daily limits. Health probes are not counted.
#[derive(Clone)]
pub struct RateLimiter {
    inscription: [Rule; 1],
    default: [Rule; 2],
    logs: Arc<Mutex<Logs>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            inscription: [Rule {
                scope: Scope::InscriptionPerMinute,
                limit: config.inscription_per_minute,
                window: MINUTE,
            }],
            default: [
                Rule {
                    scope: Scope::DefaultPerHour,
                    limit: config.default_per_hour,
                    window: HOUR,
                },
                Rule {
                    scope: Scope::DefaultPerDay,
                    limit: config.default_per_day,
                    window: DAY,
                },
            ],
            logs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn rules(&self, path: &str) -> &[Rule] {
        match path {
            "/health" | "/ready" => &[],
            "/inscription" => &self.inscription,
            _ => &self.default,
        }
    }

    /// Record a request, `false` when one of its limits is already reached.
    pub async fn check(&self, client: &str, path: &str) -> bool {
        self.check_at(client, path, Instant::now()).await
    }

    async fn check_at(&self, client: &str, path: &str, now: Instant) -> bool {
        let rules = self.rules(path);
        if rules.is_empty() {
            return true;
        }

        let mut logs = self.logs.lock().await;

        if logs.len() > SWEEP_THRESHOLD {
            logs.retain(|(_, scope), log| {
                prune(log, now, window_of(*scope));
                !log.is_empty()
            });
        }

        for rule in rules {
            let log = logs.entry((client.to_owned(), rule.scope)).or_default();
            prune(log, now, rule.window);

            if log.len() >= rule.limit as usize {
                tracing::warn!(client, path, scope = ?rule.scope, "rate limit reached");
                return false;
            }
        }

        for rule in rules {
            logs.entry((client.to_owned(), rule.scope))
                .or_default()
                .push_back(now);
        }

        true
    }
}

fn window_of(scope: Scope) -> Duration {
    match scope {
        Scope::InscriptionPerMinute => MINUTE,
        Scope::DefaultPerHour => HOUR,
        Scope::DefaultPerDay => DAY,
    }
}

fn prune(log: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(first) = log.front() {
        if now.duration_since(*first) < window {
            break;
        }
        log.pop_front();
    }
}

/// Socket address when served with connect info, else the first
/// `X-Forwarded-For` entry.
fn client_ip(req: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let client = client_ip(&req);

    if !limiter.check(&client, req.uri().path()).await {
        return ApiError::TooManyRequests.into_response();
    }

    next.run(req).await
}
