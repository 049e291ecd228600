mod entities;
mod errors;
mod ports;
mod pricing;

// Re-export the domain boundary types and ports.
pub use entities::{Product, SearchRequest, SearchResponse};
pub use errors::SearchError;
pub use ports::{
    LoadingIndicator, Notifier, ProductCard, ResultsContainer, SearchInput, SearchProvider,
};
pub use pricing::{PriceFormat, ResultSummary, lowest_price};
