//! MyBookHoard command line search
//!
//! - **commands**: One-shot searches, suggestions, stats and `add`
//! - **output**: Plain and JSON rendering
//! - **session**: Debounced interactive search over stdin

pub mod commands;
pub mod output;
pub mod session;

pub use commands::{add_book, Searcher, SuggestKind};
pub use output::Format;
pub use session::{parse_line, spawn_line_reader, Session, SessionEvent};
