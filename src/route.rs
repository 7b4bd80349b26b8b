/// The two screens reachable through the URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Checkout,
}

impl Route {
    /// Parse a location hash such as `#/checkout`. Anything unrecognized is
    /// the home screen.
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim().trim_start_matches('#');
        match path.trim_end_matches('/') {
            "/checkout" | "checkout" => Route::Checkout,
            _ => Route::Home,
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Route::Home => "",
            Route::Checkout => "#/checkout",
        }
    }
}
