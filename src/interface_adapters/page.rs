use maud::{Markup, Render, html};
use tokio::sync::watch;

use crate::domain::{LoadingIndicator, ProductCard, ResultsContainer, SearchInput};

pub const BEST_PRICE_BADGE: &str = "🏆 Best Price";

// One node of the results container.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultNode {
    Message(String),
    Card { card: ProductCard, best_price: bool },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageSnapshot {
    pub input: String,
    pub loading_visible: bool,
    pub results: Vec<ResultNode>,
    // Bumped every time the loading indicator is hidden.
    pub settled: u64,
}

impl PageSnapshot {
    pub fn cards(&self) -> impl Iterator<Item = (&ProductCard, bool)> {
        self.results.iter().filter_map(|node| match node {
            ResultNode::Card { card, best_price } => Some((card, *best_price)),
            ResultNode::Message(_) => None,
        })
    }

    pub fn message(&self) -> Option<&str> {
        self.results.iter().find_map(|node| match node {
            ResultNode::Message(message) => Some(message.as_str()),
            ResultNode::Card { .. } => None,
        })
    }

    // Plain-text rendering of the results container, one line per node.
    pub fn results_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.results.len());
        for node in &self.results {
            match node {
                ResultNode::Message(message) => lines.push(message.clone()),
                ResultNode::Card { card, best_price } => {
                    let mut line = format!(
                        "[{}] {}  {}  {}",
                        card.platform, card.product_name, card.price_label, card.url
                    );
                    if *best_price {
                        line.push_str("  ");
                        line.push_str(BEST_PRICE_BADGE);
                    }
                    lines.push(line);
                }
            }
        }
        lines.join("\n")
    }
}

impl Render for ResultNode {
    fn render(&self) -> Markup {
        match self {
            ResultNode::Message(message) => html! { p { (message) } },
            ResultNode::Card { card, best_price } => html! {
                div class=(if *best_price { "product-card best-price" } else { "product-card" }) {
                    div class="platform-badge" { (card.platform) }
                    div class="product-name" { (card.product_name) }
                    div class="price" { (card.price_label) }
                    a href=(card.url) target="_blank" rel="noopener noreferrer" class="product-link" {
                        "View Product"
                    }
                    @if *best_price {
                        div class="best-price-badge" { (BEST_PRICE_BADGE) }
                    }
                }
            },
        }
    }
}

impl Render for PageSnapshot {
    fn render(&self) -> Markup {
        html! {
            div id="loading" hidden[!self.loading_visible] { "Searching..." }
            div id="results" {
                @for node in &self.results {
                    (node)
                }
            }
        }
    }
}

// In-memory page document. Every mutation is published as a snapshot so the
// host can redraw without polling.
pub struct HtmlPage {
    state: watch::Sender<PageSnapshot>,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPage {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(PageSnapshot::default()),
        }
    }

    // Replace the search input's text, as a user typing would.
    pub fn type_text(&self, text: &str) {
        self.state.send_modify(|page| page.input = text.to_string());
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageSnapshot> {
        self.state.subscribe()
    }
}

impl SearchInput for HtmlPage {
    fn value(&self) -> String {
        self.state.borrow().input.clone()
    }
}

impl LoadingIndicator for HtmlPage {
    fn show(&self) {
        self.state.send_modify(|page| page.loading_visible = true);
    }

    fn hide(&self) {
        self.state.send_modify(|page| {
            page.loading_visible = false;
            page.settled += 1;
        });
    }
}

impl ResultsContainer for HtmlPage {
    fn clear(&self) {
        self.state.send_modify(|page| page.results.clear());
    }

    fn show_message(&self, message: &str) {
        self.state.send_modify(|page| {
            page.results.clear();
            page.results.push(ResultNode::Message(message.to_string()));
        });
    }

    fn append_card(&self, card: ProductCard) {
        self.state.send_modify(|page| {
            page.results.push(ResultNode::Card {
                card,
                best_price: false,
            })
        });
    }

    fn mark_best_price(&self, position: usize) {
        self.state.send_modify(|page| {
            let card = page
                .results
                .iter_mut()
                .filter_map(|node| match node {
                    ResultNode::Card { best_price, .. } => Some(best_price),
                    ResultNode::Message(_) => None,
                })
                .nth(position);
            match card {
                Some(best_price) => *best_price = true,
                None => tracing::warn!(position, "no rendered card at position to mark."),
            }
        });
    }
}
