//! # 任务令牌
//!
//! 提交的任务轮询令牌以响应取消，并周期性写入进度
//! （0–1 的小数）与人类可读的状态文本。取消是协作式的：
//! 只在任务的安全点被检查，从不抢占。
//!
//! ## 依赖关系
//! - 被 `runner/local.rs`, `backend/worker.rs`, `project.rs` 使用
//! - 无外部模块依赖

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// 取消/进度令牌
#[derive(Debug, Default)]
pub struct TaskToken {
    cancelled: AtomicBool,
    state: Mutex<(f64, String)>,
}

impl TaskToken {
    pub fn new() -> Self {
        TaskToken::default()
    }

    /// 请求取消；任务在下一个安全点观察到后停止
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// 更新进度（截断到 [0, 1]）与状态文本
    pub fn update(&self, progress: f64, status: impl Into<String>) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.0 = progress.clamp(0.0, 1.0);
        state.1 = status.into();
    }

    /// 当前 (进度, 状态)
    pub fn snapshot(&self) -> (f64, String) {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel() {
        let token = TaskToken::new();
        assert!(!token.cancelled());

        token.cancel();
        assert!(token.cancelled());
    }

    #[test]
    fn test_update_and_snapshot() {
        let token = TaskToken::new();
        token.update(0.5, "halfway");

        let (progress, status) = token.snapshot();
        assert!((progress - 0.5).abs() < 1e-12);
        assert_eq!("halfway", status);
    }

    #[test]
    fn test_progress_clamped() {
        let token = TaskToken::new();
        token.update(1.5, "overshoot");
        assert!((token.snapshot().0 - 1.0).abs() < 1e-12);

        token.update(-0.5, "undershoot");
        assert!((token.snapshot().0 - 0.0).abs() < 1e-12);
    }
}
