//! 结果监听能力。

use std::sync::Arc;

use crate::internal::download::structs::DownloadOutcome;

/// 接收任务结果。
///
/// - `on_result` 对每个任务恰好调用一次，调用发生在处理该任务的 worker 上；
/// - 不同任务之间的回调顺序没有保证，可能并发发生，实现需自行保证线程安全；
/// - `what` 是 `add` 时传入的分派标签，用来区分是哪一个下载。
pub trait DownloadListener<T>: Send + Sync {
    /// 下载器即将开始执行该任务。已取消的任务不会触发。
    fn on_start(&self, _what: i32) {}

    fn on_result(&self, what: i32, outcome: DownloadOutcome<T>);
}

/// 同一个监听器可以包在 `Arc` 里挂到多个任务上。
impl<T, L> DownloadListener<T> for Arc<L>
where
    L: DownloadListener<T> + ?Sized,
{
    fn on_start(&self, what: i32) {
        (**self).on_start(what)
    }

    fn on_result(&self, what: i32, outcome: DownloadOutcome<T>) {
        (**self).on_result(what, outcome)
    }
}
