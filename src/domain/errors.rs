use std::fmt;

// Domain-level errors for the search workflow.
#[derive(Debug)]
pub enum SearchError {
    EmptyQuery,
    // Request never produced a response (connect, timeout, body read).
    Transport(String),
    Upstream {
        status: u16,
        message: Option<String>,
    },
    // Body was not a well-formed search response.
    Decode(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyQuery => write!(f, "product name is empty"),
            SearchError::Transport(err) => write!(f, "search transport error: {err}"),
            SearchError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "search upstream error {status}: {message}")
                } else {
                    write!(f, "search upstream error {status}")
                }
            }
            SearchError::Decode(err) => write!(f, "search response decode error: {err}"),
        }
    }
}

impl std::error::Error for SearchError {}
