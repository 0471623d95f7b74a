use serde::{Deserialize, Serialize};

use super::queue_error::QueueError;

/// 默认并发 worker 数
pub const DEFAULT_POOL_SIZE: usize = 3;

/// 默认队列名（日志中的 `queue` 字段）
pub const DEFAULT_QUEUE_NAME: &str = "download-queue";

/// 调度队列配置。缺省字段取默认值，可以直接从调用方的配置文件反序列化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchQueueConfig {
    /// 池大小：同时执行的下载数上限，必须大于 0
    pub pool_size: usize,
    /// 队列名，仅用于日志区分多个队列
    pub name: String,
}

impl DispatchQueueConfig {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn validate(&self) -> Result<(), QueueError> {
        if self.pool_size == 0 {
            return Err(QueueError::InvalidPoolSize(self.pool_size));
        }
        Ok(())
    }
}

impl Default for DispatchQueueConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            name: DEFAULT_QUEUE_NAME.to_string(),
        }
    }
}
