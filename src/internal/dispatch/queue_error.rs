//! 调度队列错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("池大小必须大于 0，当前为 {0}")]
    InvalidPoolSize(usize),

    #[error("start() 必须在 tokio 运行时内调用")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
