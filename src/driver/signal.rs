//! Interrupt Handling
//!
//! Ctrl-C をキャンセルトークンに結びつける

use std::future::Future;
use std::io;

use log::warn;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 割り込み監視タスクのガード
///
/// 破棄されると監視タスクを停止する
pub struct InterruptGuard {
    watcher: JoinHandle<()>,
}

impl InterruptGuard {
    pub fn is_finished(&self) -> bool {
        self.watcher.is_finished()
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

/// 最初の Ctrl-C でトークンをキャンセルする
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn cancel_on_interrupt(cancel: &CancellationToken) -> InterruptGuard {
    cancel_on(cancel, tokio::signal::ctrl_c())
}

/// `signal` が完了したらトークンをキャンセルする
///
/// トークンが先にキャンセルされた場合、監視タスクはそのまま終了する
pub fn cancel_on<F>(cancel: &CancellationToken, signal: F) -> InterruptGuard
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let cancel = cancel.clone();
    let watcher = tokio::spawn(async move {
        tokio::select! {
            result = signal => match result {
                Ok(()) => {
                    warn!("Interrupt received, cancelling upload...");
                    cancel.cancel();
                }
                Err(e) => warn!("Unable to listen for interrupt signal: {}", e),
            },
            _ = cancel.cancelled() => {}
        }
    });

    InterruptGuard { watcher }
}
