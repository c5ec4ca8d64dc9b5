//! Interactive search-as-you-type over stdin.
//!
//! Lines are read off the async path (a thread for stdin, a task for async
//! readers) and sent over a channel. A query only runs once no newer line has
//! arrived for the debounce period; a newer query replaces the pending one.
//! Searches and reloads run on the blocking pool.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hoard::persist::load_library;
use hoard::{Error, Result};
use hoard_core::library::{BookFilter, Library};
use parking_lot::RwLock;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::commands::Searcher;

const EVENT_BUFFER: usize = 32;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Book search; blank lists every book
    Query(String),
    /// Re-read the library file
    Reload,
    Quit,
}

/// Turn an input line into an event. Unknown `:` commands yield `None`.
pub fn parse_line(line: &str) -> Option<SessionEvent> {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" | ":exit" => Some(SessionEvent::Quit),
        ":reload" => Some(SessionEvent::Reload),
        cmd if cmd.starts_with(':') => None,
        query => Some(SessionEvent::Query(query.to_string())),
    }
}

pub struct Session {
    library: Arc<RwLock<Library>>,
    path: PathBuf,
    searcher: Arc<Searcher>,
    debounce: Duration,
    limit: Option<usize>,
}

impl Session {
    pub fn new(
        library: Library,
        path: impl Into<PathBuf>,
        searcher: Searcher,
        debounce: Duration,
    ) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            path: path.into(),
            searcher: Arc::new(searcher),
            debounce,
            limit: None,
        }
    }

    /// Cap the number of results printed per search.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Drive the session over an async reader until `:quit` or end of input.
    pub async fn run<R, W>(&self, input: R, out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let reader = tokio::spawn(read_events(input, tx));
        let result = self.run_events(rx, out).await;
        reader.abort();
        result
    }

    /// Drive the session from already parsed events.
    ///
    /// A query still waiting out its debounce when the channel closes is run;
    /// one pending at `:quit` is dropped.
    pub async fn run_events<W>(
        &self,
        mut rx: mpsc::Receiver<SessionEvent>,
        mut out: W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut pending: Option<String> = None;
        let timer = sleep(self.debounce);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                biased;

                event = rx.recv() => match event {
                    Some(SessionEvent::Query(query)) => {
                        debug!(%query, "query pending");
                        pending = Some(query);
                        timer.as_mut().reset(Instant::now() + self.debounce);
                    }
                    Some(SessionEvent::Reload) => {
                        if let Err(e) = self.reload(&mut out).await {
                            break Err(e);
                        }
                    }
                    Some(SessionEvent::Quit) => {
                        info!("session closed");
                        break Ok(());
                    }
                    None => {
                        if let Some(query) = pending.take() {
                            if let Err(e) = self.search(query, &mut out).await {
                                break Err(e);
                            }
                        }
                        break Ok(());
                    }
                },

                () = &mut timer, if pending.is_some() => {
                    if let Some(query) = pending.take() {
                        if let Err(e) = self.search(query, &mut out).await {
                            break Err(e);
                        }
                    }
                }
            }
        }
    }

    async fn search<W: AsyncWrite + Unpin>(&self, query: String, out: &mut W) -> Result<()> {
        let library = Arc::clone(&self.library);
        let searcher = Arc::clone(&self.searcher);
        let limit = self.limit;

        let rendered = tokio::task::spawn_blocking(move || {
            let library = library.read();
            searcher.books(&library, &query, &BookFilter::new(), limit)
        })
        .await
        .map_err(|e| Error::Internal(format!("search task failed: {e}")))??;

        write_block(out, &rendered).await
    }

    async fn reload<W: AsyncWrite + Unpin>(&self, out: &mut W) -> Result<()> {
        let path = self.path.clone();
        let loaded = tokio::task::spawn_blocking(move || load_library(path))
            .await
            .map_err(|e| Error::Internal(format!("reload task failed: {e}")))?;

        let message = match loaded {
            Ok(library) => {
                let count = library.books().len();
                *self.library.write() = library;
                format!("reloaded {count} books")
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "reload failed, keeping current library"
                );
                format!("reload failed: {e}")
            }
        };
        write_block(out, &message).await
    }
}

/// Read lines on a dedicated thread and hand back the event channel.
///
/// Blocking reads on that thread never hold up runtime shutdown, so the
/// process can exit on `:quit` while the terminal still has stdin open.
pub fn spawn_line_reader<R>(input: R) -> std::io::Result<mpsc::Receiver<SessionEvent>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    thread::Builder::new()
        .name("hoard-input".to_string())
        .spawn(move || {
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "failed to read input");
                        break;
                    }
                };
                match parse_line(&line) {
                    Some(event) => {
                        if tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    None => warn!(command = %line.trim(), "unknown command"),
                }
            }
        })?;
    Ok(rx)
}

async fn read_events<R>(input: R, tx: mpsc::Sender<SessionEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_line(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => warn!(command = %line.trim(), "unknown command"),
            },
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "failed to read input");
                break;
            }
        }
    }
}

async fn write_block<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Format;
    use hoard::persist::save_library;
    use hoard::SearchSettings;
    use hoard_core::library::Book;
    use pretty_assertions::assert_eq;

    // Long enough that only end of input or :quit ends the wait
    const NEVER: Duration = Duration::from_secs(3600);

    fn session(library: Library, path: PathBuf) -> Session {
        let searcher = Searcher::new(&SearchSettings::default(), Format::Plain);
        Session::new(library, path, searcher, NEVER)
    }

    fn library() -> Library {
        Library::with_books(vec![
            Book::new("b1", "Dune").author("Frank Herbert"),
            Book::new("b2", "Neuromancer").author("William Gibson"),
        ])
        .unwrap()
    }

    async fn transcript(session: &Session, input: &'static [u8]) -> String {
        let mut out = Vec::new();
        session.run(input, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(":quit"), Some(SessionEvent::Quit));
        assert_eq!(parse_line("  :reload "), Some(SessionEvent::Reload));
        assert_eq!(parse_line(":frobnicate"), None);
        assert_eq!(
            parse_line("  the hobbit "),
            Some(SessionEvent::Query("the hobbit".to_string()))
        );
        assert_eq!(parse_line(""), Some(SessionEvent::Query(String::new())));
    }

    #[tokio::test]
    async fn test_newer_query_replaces_pending() {
        let session = session(library(), PathBuf::from("unused.json"));
        let out = transcript(&session, b"dune\nneuromancer\n").await;

        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Neuromancer by William Gibson"));
        assert!(!out.contains("Dune"));
    }

    #[tokio::test]
    async fn test_quit_drops_pending() {
        let session = session(library(), PathBuf::from("unused.json"));
        let out = transcript(&session, b"dune\n:quit\nneuromancer\n").await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_debounce_elapses() {
        let searcher = Searcher::new(&SearchSettings::default(), Format::Plain);
        let session = Session::new(library(), "unused.json", searcher, Duration::ZERO);
        let (input, mut feed) = tokio::io::duplex(64);

        let run = async {
            let mut out = Vec::new();
            session
                .run(tokio::io::BufReader::new(input), &mut out)
                .await
                .unwrap();
            out
        };
        let drive = async {
            feed.write_all(b"dune\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            feed.write_all(b"gibson\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(feed);
        };
        let (out, ()) = tokio::join!(run, drive);

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Dune by Frank Herbert"));
        assert!(lines[1].contains("Neuromancer by William Gibson"));
    }

    #[tokio::test]
    async fn test_line_reader_thread() {
        let session = session(library(), PathBuf::from("unused.json"));
        let input = std::io::Cursor::new(b"dune\n:nope\nneuromancer\n".to_vec());
        let rx = spawn_line_reader(input).unwrap();

        let mut out = Vec::new();
        session.run_events(rx, &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Neuromancer by William Gibson"));
    }

    #[tokio::test]
    async fn test_quit_with_sender_still_open() {
        let session = session(library(), PathBuf::from("unused.json"));
        let (tx, rx) = mpsc::channel(4);
        tx.send(SessionEvent::Query("dune".to_string())).await.unwrap();
        tx.send(SessionEvent::Quit).await.unwrap();

        let mut out = Vec::new();
        session.run_events(rx, &mut out).await.unwrap();
        assert!(out.is_empty());
        drop(tx);
    }

    #[tokio::test]
    async fn test_reload_swaps_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        save_library(&path, &Library::with_books(vec![Book::new("k1", "Kindred")]).unwrap())
            .unwrap();

        let session = session(Library::new(), path);
        let out = transcript(&session, b":reload\nkindred\n").await;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "reloaded 1 books");
        assert!(lines[1].ends_with("Kindred [to_read]"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_library() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(library(), dir.path().join("missing.json"));
        let out = transcript(&session, b":reload\ndune\n").await;

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("reload failed:"));
        assert!(lines[1].contains("Dune by Frank Herbert"));
    }
}
