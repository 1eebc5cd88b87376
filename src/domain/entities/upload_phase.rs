//! # UploadPhase State Machine
//!
//! `Idle -> Running -> {Succeeded, Cancelled, Failed}`

use std::fmt;

use thiserror::Error;

use crate::domain::errors::UploadError;

/// アップロードの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Cancelled,
    Failed,
}

/// 不正な状態遷移
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid upload phase transition: {from} -> {to}")]
pub struct PhaseTransitionError {
    pub from: UploadPhase,
    pub to: UploadPhase,
}

impl UploadPhase {
    /// 終端状態かどうか
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadPhase::Succeeded | UploadPhase::Cancelled | UploadPhase::Failed
        )
    }

    /// `Idle` から `Running` へ遷移する
    pub fn start(&mut self) -> Result<(), PhaseTransitionError> {
        self.transition(UploadPhase::Running)
    }

    /// アップロードの結果に応じて終端状態へ遷移する
    ///
    /// ```
    /// use ipfs_upload::domain::entities::upload_phase::UploadPhase;
    /// use ipfs_upload::domain::errors::UploadError;
    ///
    /// let mut phase = UploadPhase::default();
    /// phase.start().unwrap();
    /// phase.finish::<()>(&Err(UploadError::Cancelled)).unwrap();
    /// assert_eq!(phase, UploadPhase::Cancelled);
    ///
    /// // 終端状態からは遷移できない
    /// assert!(phase.finish(&Ok(())).is_err());
    /// ```
    pub fn finish<T>(&mut self, outcome: &Result<T, UploadError>) -> Result<(), PhaseTransitionError> {
        let next = match outcome {
            Ok(_) => UploadPhase::Succeeded,
            Err(e) if e.is_cancelled() => UploadPhase::Cancelled,
            Err(_) => UploadPhase::Failed,
        };
        self.transition(next)
    }

    fn transition(&mut self, to: UploadPhase) -> Result<(), PhaseTransitionError> {
        let allowed = match (*self, to) {
            (UploadPhase::Idle, UploadPhase::Running) => true,
            (UploadPhase::Running, next) => next.is_terminal(),
            _ => false,
        };

        if !allowed {
            return Err(PhaseTransitionError { from: *self, to });
        }

        *self = to;
        Ok(())
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadPhase::Idle => "idle",
            UploadPhase::Running => "running",
            UploadPhase::Succeeded => "succeeded",
            UploadPhase::Cancelled => "cancelled",
            UploadPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
