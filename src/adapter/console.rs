//! Console Progress Reporter
//!
//! 進捗を標準エラー出力に表示する

use std::io::{self, Write};
use std::sync::Mutex;

use crate::application::progress::ProgressReporter;
use crate::domain::entities::progress_event::ProgressEvent;

/// `Added <name>` を1行ずつ書き出すレポーター
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleReporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> ProgressReporter for ConsoleReporter<W> {
    fn report(&self, event: &ProgressEvent) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(out, "Added {}", event.name());
    }
}
