use crate::domain::entities::Product;

// Lowest price over the whole result set; `None` for an empty set.
pub fn lowest_price(products: &[Product]) -> Option<f64> {
    products.iter().map(|p| p.price).reduce(f64::min)
}

// Currency-prefixed price labels with grouped thousands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    currency: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl PriceFormat {
    // Fraction digits kept after rounding; trailing zeros are dropped.
    const MAX_FRACTION_DIGITS: usize = 3;

    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn format(&self, price: f64) -> String {
        let fixed = format!("{:.*}", Self::MAX_FRACTION_DIGITS, price.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let fraction = fraction.trim_end_matches('0');

        let mut label = String::with_capacity(fixed.len() + whole.len() / 3 + 4);
        if price < 0.0 && fixed.chars().any(|c| matches!(c, '1'..='9')) {
            label.push('-');
        }
        label.push_str(&self.currency);
        label.push_str(&group_thousands(whole));
        if !fraction.is_empty() {
            label.push('.');
            label.push_str(fraction);
        }
        label
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// Price analysis of one result set, the same figures the backend reports
// under `analysis`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    // Platform of the first product at the lowest price.
    pub best_platform: String,
    pub best_price: f64,
    // Highest minus lowest price, rounded to two decimals.
    pub potential_savings: f64,
    pub total_platforms: usize,
    // Number of products tied at the lowest price.
    pub best_count: usize,
}

impl ResultSummary {
    pub fn from_products(products: &[Product]) -> Option<Self> {
        let best_price = lowest_price(products)?;
        let highest = products.iter().map(|p| p.price).fold(best_price, f64::max);
        let best = products.iter().find(|p| p.price == best_price)?;

        Some(Self {
            best_platform: best.platform.clone(),
            best_price,
            potential_savings: ((highest - best_price) * 100.0).round() / 100.0,
            total_platforms: products.len(),
            best_count: products.iter().filter(|p| p.price == best_price).count(),
        })
    }
}
