use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::{Product, SearchError, SearchResponse};

// Payload POSTed to the backend search endpoint.
#[derive(Debug, Serialize)]
pub struct SearchRequestBody<'a> {
    pub product_name: &'a str,
}

// Raw backend reply. `success` and `results` stay untyped until `success`
// is known, so a "no match" reply never fails on its `results`.
#[derive(Debug, Deserialize)]
pub struct SearchResponseBody {
    #[serde(default)]
    pub success: Value,
    #[serde(default)]
    pub results: Value,
    // Backend explanation sent with `success: false`.
    #[serde(default)]
    pub message: Option<String>,
    // Backend price analysis; informational only.
    #[serde(default)]
    pub analysis: Option<Value>,
}

// Error payload returned by the backend on non-2xx replies.
#[derive(Debug, Deserialize)]
pub struct SearchErrorBody {
    pub error: String,
}

// One listing as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct ProductEntry {
    pub platform: String,
    pub product_name: String,
    pub price: f64,
    pub url: String,
}

impl ProductEntry {
    fn validate(self) -> Result<Product, &'static str> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number");
        }
        if self.platform.trim().is_empty() {
            return Err("platform is blank");
        }
        if self.url.trim().is_empty() {
            return Err("url is blank");
        }
        // Relative and scheme-less links are kept as the backend sent them.
        if Url::parse(self.url.trim()).is_ok_and(|url| url.scheme() == "javascript") {
            return Err("url uses a script scheme");
        }

        Ok(Product {
            platform: self.platform,
            product_name: self.product_name,
            price: self.price,
            url: self.url,
        })
    }
}

impl SearchResponseBody {
    /// Convert into the domain response. Structural problems in `results`
    /// fail the whole response; entries with invalid values are dropped.
    pub fn into_domain(self) -> Result<SearchResponse, SearchError> {
        if let Some(analysis) = &self.analysis {
            tracing::debug!(%analysis, "backend analysis received.");
        }

        if !is_truthy(&self.success) {
            if let Some(message) = &self.message {
                tracing::debug!(backend_message = %message, "backend reported no match.");
            }
            return Ok(SearchResponse::default());
        }

        let entries: Vec<ProductEntry> = if self.results.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(self.results).map_err(|e| SearchError::Decode(e.to_string()))?
        };

        let results = entries
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match entry.validate() {
                Ok(product) => Some(product),
                Err(reason) => {
                    tracing::warn!(position, reason, "dropping malformed product entry.");
                    None
                }
            })
            .collect();

        Ok(SearchResponse {
            success: true,
            results,
        })
    }
}

// Truthiness of a loosely typed flag, as the page script would see it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
