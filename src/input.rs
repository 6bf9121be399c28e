//! Line input shared by every interactive prompt of a run.
//!
//! One buffered reader lives for the whole process. Search picks, artist
//! selections and retry confirmations all read from it, so lines that
//! arrive together (piped input) are consumed one per question instead of
//! being dropped with a short-lived buffer.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Buffered line source, stdin by default.
pub struct ConsoleInput<R = Stdin> {
    lines: Mutex<Lines<BufReader<R>>>,
}

impl ConsoleInput<Stdin> {
    /// Reads from the process's stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> ConsoleInput<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(BufReader::new(reader).lines()),
        }
    }

    /// Returns the next line without its terminator, or `None` at end of
    /// input.
    ///
    /// # Errors
    ///
    /// Returns the underlying read error.
    pub async fn next_line(&self) -> io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}
