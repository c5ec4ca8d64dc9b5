use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};
use hoard::persist::load_library;
use hoard::SearchSettings;
use hoard_core::library::{Book, BookFilter, ReadingStatus};
use hoard_search::{add_book, spawn_line_reader, Format, Searcher, Session, SuggestKind};
use tokio::signal;
use tracing::{error, info};

/// Library file used when neither `--library` nor the variable is set
const DEFAULT_LIBRARY: &str = "library.json";
const ENV_LIBRARY: &str = "HOARD_LIBRARY";

#[derive(Parser, Debug)]
#[command(name = "hoard-search")]
#[command(about = "Fuzzy search over a MyBookHoard library")]
#[command(version)]
struct Args {
    /// Library file (falls back to $HOARD_LIBRARY, then library.json)
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search books by title, author and saga
    Books {
        query: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search authors by name
    Authors {
        query: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search sagas by name
    Sagas {
        query: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Complete a partial title, or an author name with --authors
    Suggest {
        query: Vec<String>,

        /// Number of suggestions
        #[arg(long)]
        max: Option<usize>,

        #[arg(long)]
        authors: bool,
    },
    /// Library statistics
    Stats,
    /// Add a book to the library file
    Add(AddArgs),
    /// Search as you type; `:reload` re-reads the library, `:quit` exits
    Interactive {
        /// Quiet period before a query runs (overrides HOARD_DEBOUNCE_MS)
        #[arg(long)]
        debounce_ms: Option<u64>,

        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Only books with this reading status
    #[arg(long)]
    status: Option<ReadingStatus>,

    /// Only wishlisted books
    #[arg(long)]
    wishlist: bool,

    /// Only books of this saga
    #[arg(long)]
    saga: Option<String>,

    /// Only books rated at least this
    #[arg(long)]
    min_rating: Option<u8>,
}

#[derive(ClapArgs, Debug)]
struct AddArgs {
    title: Vec<String>,

    /// Book id (generated when omitted)
    #[arg(long)]
    id: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    saga: Option<String>,

    /// Position within the saga
    #[arg(long, requires = "saga")]
    saga_number: Option<u32>,

    #[arg(long)]
    description: Option<String>,

    /// to_read, reading, read or abandoned
    #[arg(long, default_value = "to_read")]
    status: ReadingStatus,

    #[arg(long)]
    wishlist: bool,

    /// 0 to 5
    #[arg(long)]
    rating: Option<u8>,
}

impl AddArgs {
    fn into_book(self) -> Book {
        let mut book = Book::new(self.id.unwrap_or_default(), self.title.join(" "))
            .status(self.status)
            .wishlist(self.wishlist);
        if let Some(author) = self.author {
            book = book.author(author);
        }
        if let Some(saga) = self.saga {
            book = book.saga(saga, self.saga_number);
        }
        if let Some(description) = self.description {
            book = book.description(description);
        }
        if let Some(rating) = self.rating {
            book = book.rating(rating);
        }
        book
    }
}

impl FilterArgs {
    fn to_filter(&self) -> BookFilter {
        let mut filter = BookFilter::new();
        if let Some(status) = self.status {
            filter = filter.status(status);
        }
        if self.wishlist {
            filter = filter.wishlist(true);
        }
        if let Some(saga) = &self.saga {
            filter = filter.saga(saga.clone());
        }
        if let Some(rating) = self.min_rating {
            filter = filter.min_rating(rating);
        }
        filter
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: hoard-search panicked");
        eprintln!(
            "  Location: {}",
            panic_info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        eprintln!(
            "  Message: {}",
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .unwrap_or(&"<no message>")
        );
    }));

    let args = Args::parse();
    hoard::tracing::init_with_filter(&args.log_level);

    if let Err(e) = run(args).await {
        error!("{e}");
        return Err(e.into());
    }
    Ok(())
}

async fn run(args: Args) -> hoard::Result<()> {
    let mut settings = SearchSettings::from_env()?;
    let path = args
        .library
        .or_else(|| std::env::var_os(ENV_LIBRARY).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY));
    let format = Format::from_json_flag(args.json);

    let rendered = match args.command {
        Command::Books {
            query,
            filter,
            limit,
        } => {
            let library = load_library(&path)?;
            Searcher::new(&settings, format).books(
                &library,
                &query.join(" "),
                &filter.to_filter(),
                limit,
            )?
        }
        Command::Authors { query, limit } => {
            let library = load_library(&path)?;
            Searcher::new(&settings, format).authors(&library, &query.join(" "), limit)?
        }
        Command::Sagas { query, limit } => {
            let library = load_library(&path)?;
            Searcher::new(&settings, format).sagas(&library, &query.join(" "), limit)?
        }
        Command::Suggest {
            query,
            max,
            authors,
        } => {
            if let Some(max) = max {
                settings.matcher.max_suggestions = max;
            }
            let kind = if authors {
                SuggestKind::Authors
            } else {
                SuggestKind::Titles
            };
            let library = load_library(&path)?;
            Searcher::new(&settings, format).suggest(&library, &query.join(" "), kind)?
        }
        Command::Stats => {
            let library = load_library(&path)?;
            Searcher::new(&settings, format).stats(&library)?
        }
        Command::Add(add) => {
            let stored = add_book(&path, add.into_book())?;
            match format {
                Format::Json => serde_json::to_string_pretty(&stored)?,
                Format::Plain => format!("added {}: {}", stored.id, stored.title),
            }
        }
        Command::Interactive { debounce_ms, limit } => {
            if let Some(ms) = debounce_ms {
                settings.debounce = Duration::from_millis(ms);
            }
            let library = load_library(&path)?;
            info!(path = %path.display(), debounce = ?settings.debounce, "interactive session");

            let searcher = Searcher::new(&settings, format);
            let session =
                Session::new(library, path, searcher, settings.debounce).with_limit(limit);
            let events = spawn_line_reader(BufReader::new(std::io::stdin()))?;

            tokio::select! {
                result = session.run_events(events, tokio::io::stdout()) => result?,
                _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
            }
            return Ok(());
        }
    };

    println!("{rendered}");
    Ok(())
}
