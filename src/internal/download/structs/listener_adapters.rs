//! 闭包适配器：把 `Fn(what, outcome)` 包装成 [`DownloadListener`]，省去为一次性回调写结构体。

use crate::internal::download::structs::DownloadOutcome;
use crate::internal::download::traits::listener::DownloadListener;

/// 仅实现 `on_result` 的监听器。
pub struct FnListener<F>(pub F);

impl<T, F> DownloadListener<T> for FnListener<F>
where
    F: Fn(i32, DownloadOutcome<T>) + Send + Sync,
{
    fn on_result(&self, what: i32, outcome: DownloadOutcome<T>) {
        (self.0)(what, outcome)
    }
}

/// `FnListener` 的简写。
pub fn listener_fn<T, F>(f: F) -> FnListener<F>
where
    F: Fn(i32, DownloadOutcome<T>) + Send + Sync,
{
    FnListener(f)
}
