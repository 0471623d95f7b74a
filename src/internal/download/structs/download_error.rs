//! 下载失败原因。

use thiserror::Error;

/// 交给监听器的失败原因。调度层不会重试，原样转交。
#[derive(Debug, Error)]
pub enum DownloadError {
    /// 下载器上报的传输错误
    #[error("传输失败: {0}")]
    Transfer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 下载器给出的文字描述
    #[error("下载失败: {0}")]
    Message(String),

    /// 下载器执行过程中 panic，已在 worker 边界捕获
    #[error("下载执行崩溃: {0}")]
    Panicked(String),

    /// 执行下载的任务被运行时中止（通常是运行时正在关闭）
    #[error("下载任务被中止")]
    Aborted,
}

impl DownloadError {
    pub fn transfer<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transfer(Box::new(error))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
