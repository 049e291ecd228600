// Use cases: the search workflow driven by page events.

pub mod search;

pub use search::{PageEvent, PageHandles, SearchController, SearchOutcome};
