use async_trait::async_trait;

use crate::domain::entities::{SearchRequest, SearchResponse};
use crate::domain::errors::SearchError;

// The controller depends on these traits, not on a concrete client or page.
// Dependencies point inwards to the domain layer.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, SearchError>;
}

// Blocking user notification (the page's alert dialog).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub trait SearchInput: Send + Sync {
    fn value(&self) -> String;
}

pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

// Results container owned by the controller while a render is in progress.
pub trait ResultsContainer: Send + Sync {
    // Remove every node.
    fn clear(&self);
    // Replace the whole content with a single informational paragraph.
    fn show_message(&self, message: &str);
    fn append_card(&self, card: ProductCard);
    // Mark the card at `position` (render order) as tied for the lowest price.
    fn mark_best_price(&self, position: usize);
}

// Display-ready content of one result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub platform: String,
    pub product_name: String,
    pub price_label: String,
    pub url: String,
}
