use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Browser origins allowed to reach the HTTP/WebSocket surface.
///
/// Configured via `CORS_ALLOWED_ORIGINS` (comma-separated); entries that
/// are empty, literal "null", or not http(s) URLs are ignored. With no
/// valid configuration the policy falls back to localhost only.
pub fn cors_middleware() -> Cors {
    let configured: Vec<String> = env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    let origins = if configured.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        configured
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);
    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
