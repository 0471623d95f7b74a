use std::fmt;
use std::sync::Arc;

use crate::internal::download::traits::Downloader;
use crate::internal::download::traits::listener::DownloadListener;

use super::download_request::DownloadRequest;

/// 队列中的一个任务：分派标签 + 请求 + 监听器，创建后不可变。
///
/// 由 `add` 创建；被 worker 取出并处理完后即丢弃，队列不再保留引用。
pub struct DownloadTask<D: Downloader> {
    pub what: i32,
    pub request: Arc<DownloadRequest<D::Params>>,
    pub listener: Arc<dyn DownloadListener<D::Payload>>,
}

impl<D: Downloader> DownloadTask<D> {
    pub(crate) fn new(
        what: i32,
        request: Arc<DownloadRequest<D::Params>>,
        listener: Arc<dyn DownloadListener<D::Payload>>,
    ) -> Self {
        Self {
            what,
            request,
            listener,
        }
    }
}

impl<D: Downloader> fmt::Debug for DownloadTask<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadTask")
            .field("what", &self.what)
            .field("sign", &self.request.sign())
            .field("cancelled", &self.request.is_cancelled())
            .finish()
    }
}
