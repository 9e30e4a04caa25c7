pub mod geocode;
pub mod isoline;

use once_cell::sync::Lazy;
use reqwest::blocking::Client;

/// Shared blocking HTTP client with a custom User-Agent so that public API
/// endpoints don't reject the request. Building the client once avoids the
/// cost of TLS and connection pool setup for every query.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("reachmap/0.1 (+https://github.com/example/reachmap)")
        .build()
        .expect("failed to build reqwest blocking client")
});

/// Default Geoapify API host
pub const GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com";
