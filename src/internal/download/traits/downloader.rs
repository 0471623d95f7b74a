//! 下载执行能力：真正的网络传输由调用方实现，调度层只负责在 worker 上调用它。

use async_trait::async_trait;

use crate::internal::download::structs::{DownloadOutcome, DownloadRequest};

/// 执行单个下载请求。
///
/// 同一个下载器会被池里的所有 worker 并发调用，所以要求 `Send + Sync`。
/// 长时间传输时应定期检查 [`DownloadRequest::is_cancelled`]（或 `select!` 在
/// [`DownloadRequest::cancelled`] 上），一旦发现取消就尽快返回
/// [`DownloadOutcome::Cancelled`]。
///
/// 实现中 panic 不会拖垮 worker：调度层会把它转成
/// [`DownloadError::Panicked`](crate::download::DownloadError::Panicked)。
#[async_trait]
pub trait Downloader: Send + Sync + 'static {
    /// 传输参数，调度层不解析
    type Params: Send + Sync + 'static;
    /// 成功时交给监听器的结果
    type Payload: Send + 'static;

    async fn execute(
        &self,
        request: &DownloadRequest<Self::Params>,
    ) -> DownloadOutcome<Self::Payload>;
}
