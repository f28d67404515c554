use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, Response, header},
    middleware::Next,
};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; img-src 'self' https: data:; font-src 'self' https:; frame-ancestors 'none';";

static SECURITY_HEADERS: [(HeaderName, &str); 6] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
    (
        HeaderName::from_static("permissions-policy"),
        "geolocation=(), microphone=(), camera=()",
    ),
];

/// Middleware to set security headers on every response
/// - Inscription routes: never cached
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_inscription = req.uri().path().starts_with("/inscription");
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS.iter() {
        headers.insert(name.clone(), HeaderValue::from_static(*value));
    }

    if is_inscription {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, private"),
        );
    }

    response
}
