use crate::domain::PriceFormat;
use crate::frameworks::config::{self, ResultsFormat};
use crate::interface_adapters::clients::SearchClient;
use crate::interface_adapters::console::ConsoleNotifier;
use crate::interface_adapters::page::{HtmlPage, PageSnapshot};
use crate::use_cases::{PageEvent, PageHandles, SearchController, SearchOutcome};
use maud::Render;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Stdout carries the rendered results, so logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Print the results container each time a search settles.
async fn print_results(mut updates: watch::Receiver<PageSnapshot>, format: ResultsFormat) {
    let mut printed = 0;
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.loading_visible || snapshot.settled == printed {
            continue;
        }
        printed = snapshot.settled;

        let rendered = match format {
            ResultsFormat::Text => snapshot.results_text(),
            ResultsFormat::Html => snapshot.render().into_string(),
        };
        println!("{rendered}");
    }
}

pub async fn run() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let base_url = config::search_service_url();
    let client = match SearchClient::new(&base_url, config::search_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(%base_url, error = %e, "failed to configure search client");
            return;
        }
    };
    let price_format = PriceFormat::new(config::currency_symbol());
    tracing::debug!(
        endpoint = %client.endpoint(),
        currency = price_format.currency(),
        "search client configured."
    );

    // The page owns the input, loading indicator and results container.
    let page = Arc::new(HtmlPage::new());
    let controller = SearchController::init(
        PageHandles {
            input: page.clone(),
            loading: page.clone(),
            results: page.clone(),
        },
        Arc::new(client),
        Arc::new(ConsoleNotifier),
        price_format,
    );

    let printer = tokio::spawn(print_results(page.subscribe(), config::results_format()));
    tracing::info!("ready; type a product name and press Enter.");

    // Each stdin line is typed into the input and followed by an Enter key.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches: Vec<JoinHandle<SearchOutcome>> = Vec::new();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        };

        page.type_text(&line);
        if let Some(search) = controller.dispatch(&PageEvent::KeyPressed("Enter".to_string())) {
            searches.push(search);
        }
        searches.retain(|search| !search.is_finished());
    }

    for search in searches {
        if let Err(e) = search.await {
            tracing::error!(error = %e, "search task failed");
        }
    }

    // Dropping the last page handle closes the snapshot channel so the
    // printer drains and exits.
    drop(controller);
    drop(page);
    if let Err(e) = printer.await {
        tracing::error!(error = %e, "printer task failed");
    }
}
