//! 下载请求：传输参数 + 分组标记 + 单向取消标志。

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use super::sign::Sign;

/// 一次下载的请求体。
///
/// `P` 是传输参数（URL、保存路径等），调度层不关心其内容，只原样交给
/// [`Downloader`](crate::download::Downloader)。
///
/// 取消标志只会从 `false` 变为 `true`，不会复位；调度层和下载器只读取它，不消费它。
/// 请求在调用方、执行它的 worker 以及任意数量的 `cancel_all` 调用者之间共享（`Arc`），
/// 本身不需要加锁。
#[derive(Debug)]
pub struct DownloadRequest<P> {
    params: P,
    sign: Option<Sign>,
    cancelled: AtomicBool,
    /// 仅用于唤醒正在 `cancelled().await` 的下载器
    cancel_token: CancellationToken,
}

impl<P> DownloadRequest<P> {
    pub fn new(params: P) -> Self {
        Self {
            params,
            sign: None,
            cancelled: AtomicBool::new(false),
            cancel_token: CancellationToken::new(),
        }
    }

    /// 设置分组标记
    pub fn with_sign(mut self, sign: impl Into<Sign>) -> Self {
        self.sign = Some(sign.into());
        self
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn sign(&self) -> Option<&Sign> {
        self.sign.as_ref()
    }

    /// 是否已被取消。下载器在长时间传输中应定期检查。
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// 直接取消这一个请求。返回本次调用是否完成了 false → true 的转变。
    pub fn cancel(&self) -> bool {
        let first = !self.cancelled.swap(true, Ordering::AcqRel);
        if first {
            self.cancel_token.cancel();
        }
        first
    }

    /// sign 相同时取消。返回本次调用是否新标记了该请求（已取消或 sign 不同都返回 `false`）。
    pub fn cancel_by_sign(&self, sign: &Sign) -> bool {
        match &self.sign {
            Some(own) if own == sign => self.cancel(),
            _ => false,
        }
    }

    /// 等待取消发生；已取消时立即返回。
    ///
    /// 下载器可以把它和传输 future 放进同一个 `tokio::select!`。
    pub async fn cancelled(&self) {
        self.cancel_token.cancelled().await
    }
}
