use crate::domain::errors::SearchError;

// One price listing for an item on a given platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub platform: String,
    pub product_name: String,
    // Non-negative and finite; the protocol layer drops entries that are not.
    pub price: f64,
    pub url: String,
}

// A validated search query. Only constructible from a non-blank input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    product_name: String,
}

impl SearchRequest {
    pub fn new(raw: &str) -> Result<Self, SearchError> {
        let product_name = raw.trim();
        if product_name.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self {
            product_name: product_name.to_string(),
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }
}

// Outcome of one backend search, already stripped of wire details.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<Product>,
}
