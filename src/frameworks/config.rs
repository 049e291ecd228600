use std::{env, time::Duration};

// Runtime settings read from the environment (optionally via `.env`).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsFormat {
    Text,
    Html,
}

pub fn search_service_url() -> String {
    env::var("SEARCH_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

// Transport timeout for one search; unset or unparsable means none.
pub fn search_timeout() -> Option<Duration> {
    env::var("SEARCH_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
}

pub fn currency_symbol() -> String {
    env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "₹".to_string())
}

pub fn results_format() -> ResultsFormat {
    parse_results_format(env::var("RESULTS_FORMAT").ok().as_deref())
}

fn parse_results_format(value: Option<&str>) -> ResultsFormat {
    match value.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("html") => ResultsFormat::Html,
        _ => ResultsFormat::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_results_format_is_html_in_any_case_then_html_is_selected() {
        assert_eq!(parse_results_format(Some("html")), ResultsFormat::Html);
        assert_eq!(parse_results_format(Some(" HTML ")), ResultsFormat::Html);
    }

    #[test]
    fn when_results_format_is_missing_or_unknown_then_text_is_selected() {
        assert_eq!(parse_results_format(None), ResultsFormat::Text);
        assert_eq!(parse_results_format(Some("json")), ResultsFormat::Text);
    }
}
