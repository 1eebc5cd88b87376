//! # Progress Reporter
//!
//! 表示対象の進捗イベントの出力先

use crate::domain::entities::progress_event::ProgressEvent;

/// 進捗レポーター
///
/// オーケストレーターは表示対象のイベントだけをここに渡す
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// 何も出力しないレポーター
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: &ProgressEvent) {}
}
