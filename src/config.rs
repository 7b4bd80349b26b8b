use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Environment variable consulted when the builder is not given a base URL.
pub const API_BASE_ENV: &str = "TEENTOPS_API_BASE_URL";

pub const DEFAULT_COUNTRY: &str = "Tunisia";
pub const TUNISIA_DIAL_CODE: &str = "+216";

/// Local numbers without a dial code have exactly this many digits.
pub const LOCAL_PHONE_DIGITS: usize = 8;

pub const CART_SNAPSHOT_FILE: &str = "cart.json";

pub fn endpoints() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Catalog
        ("products", "/products/"),
        ("featured_products", "/products/featured/"),
        ("search_products", "/products/search/"),
        ("categories", "/products/categories/"),
        // Orders and contact
        ("create_order", "/orders/create/"),
        ("contact", "/orders/contact/"),
        ("contact_info", "/orders/contact-info/"),
        // Reviews
        ("reviews", "/reviews/"),
        ("featured_reviews", "/reviews/featured/"),
        ("create_review", "/reviews/create/"),
    ])
}

/// Resolve a named endpoint path. Unknown names are a programming error on
/// our side, so they come back as `None` and callers turn that into
/// `StorefrontError::NotFound`.
pub fn endpoint(name: &str) -> Option<&'static str> {
    endpoints().get(name).copied()
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("teentops-sdk")
    } else {
        PathBuf::from(".teentops-sdk-cache")
    }
}

/// Base URL from the environment, if set and non-blank.
pub fn api_base_from_env() -> Option<String> {
    std::env::var(API_BASE_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
