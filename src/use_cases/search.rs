use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::domain::{
    LoadingIndicator, Notifier, PriceFormat, Product, ProductCard, ResultSummary,
    ResultsContainer, SearchInput, SearchProvider, SearchRequest,
};

pub const EMPTY_QUERY_ALERT: &str = "Please enter a product name";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Try a different search term.";
pub const NO_PRODUCTS_MESSAGE: &str = "No products found. Try a different search.";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching prices. Please try again.";

// User interactions the host page forwards to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    ButtonClicked,
    // Key pressed while the search input has focus.
    KeyPressed(String),
}

impl PageEvent {
    pub fn is_search_trigger(&self) -> bool {
        match self {
            PageEvent::ButtonClicked => true,
            PageEvent::KeyPressed(key) => key == "Enter",
        }
    }
}

// Page elements the controller reads and mutates. Supplied once by the host.
#[derive(Clone)]
pub struct PageHandles {
    pub input: Arc<dyn SearchInput>,
    pub loading: Arc<dyn LoadingIndicator>,
    pub results: Arc<dyn ResultsContainer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    // Blank input; nothing was sent.
    Rejected,
    Rendered(ResultSummary),
    // Backend succeeded with an empty result set.
    Empty,
    // Backend reported no match (`success` false or absent).
    NoResults,
    Failed,
}

// Hides the loading indicator when dropped, so every exit path of a search
// (including a dropped future) ends with it hidden.
struct LoadingGuard<'a> {
    loading: &'a dyn LoadingIndicator,
}

impl<'a> LoadingGuard<'a> {
    fn show(loading: &'a dyn LoadingIndicator) -> Self {
        loading.show();
        Self { loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.hide();
    }
}

pub struct SearchController {
    page: PageHandles,
    provider: Arc<dyn SearchProvider>,
    notifier: Arc<dyn Notifier>,
    format: PriceFormat,
    // Serializes render phases so overlapping responses never interleave
    // their clear/append/mark sequences.
    render_lock: Mutex<()>,
}

impl SearchController {
    pub fn init(
        page: PageHandles,
        provider: Arc<dyn SearchProvider>,
        notifier: Arc<dyn Notifier>,
        format: PriceFormat,
    ) -> Arc<Self> {
        Arc::new(Self {
            page,
            provider,
            notifier,
            format,
            render_lock: Mutex::new(()),
        })
    }

    /// Handle one page event. Search triggers read the input immediately and
    /// start a search task; the task is not cancelled by later triggers.
    pub fn dispatch(self: &Arc<Self>, event: &PageEvent) -> Option<JoinHandle<SearchOutcome>> {
        if !event.is_search_trigger() {
            return None;
        }
        let raw = self.page.input.value();
        let controller = Arc::clone(self);
        Some(tokio::spawn(async move { controller.submit_query(raw).await }))
    }

    // Search with the current value of the input.
    pub async fn submit(&self) -> SearchOutcome {
        self.submit_query(self.page.input.value()).await
    }

    #[tracing::instrument(name = "search", skip_all, fields(product_name = %raw.trim()))]
    pub async fn submit_query(&self, raw: String) -> SearchOutcome {
        let req = match SearchRequest::new(&raw) {
            Ok(req) => req,
            Err(_) => {
                self.notifier.alert(EMPTY_QUERY_ALERT);
                return SearchOutcome::Rejected;
            }
        };

        let _loading = LoadingGuard::show(self.page.loading.as_ref());
        self.clear_results();

        match self.provider.search(&req).await {
            Ok(res) if res.success => self.render_results(&res.results),
            Ok(_) => {
                tracing::info!("backend reported no results.");
                self.show_message(NO_RESULTS_MESSAGE);
                SearchOutcome::NoResults
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch prices.");
                self.show_message(FETCH_ERROR_MESSAGE);
                SearchOutcome::Failed
            }
        }
    }

    /// Render one card per product, then mark every card tied for the lowest
    /// price.
    pub fn render_results(&self, products: &[Product]) -> SearchOutcome {
        let _render = self
            .render_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let results = self.page.results.as_ref();

        let Some(summary) = ResultSummary::from_products(products) else {
            results.show_message(NO_PRODUCTS_MESSAGE);
            return SearchOutcome::Empty;
        };

        results.clear();
        for product in products {
            results.append_card(ProductCard {
                platform: product.platform.clone(),
                product_name: product.product_name.clone(),
                price_label: self.format.format(product.price),
                url: product.url.clone(),
            });
        }

        // Compare by value so every tie is marked, not just the first.
        for (position, product) in products.iter().enumerate() {
            if product.price == summary.best_price {
                results.mark_best_price(position);
            }
        }

        tracing::info!(
            total_platforms = summary.total_platforms,
            best_platform = %summary.best_platform,
            best_price = summary.best_price,
            potential_savings = summary.potential_savings,
            "results rendered."
        );
        SearchOutcome::Rendered(summary)
    }

    fn clear_results(&self) {
        let _render = self
            .render_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.page.results.clear();
    }

    fn show_message(&self, message: &str) {
        let _render = self
            .render_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.page.results.show_message(message);
    }
}
