/// 内部实现模块
mod internal;


/// 调度队列：固定大小的 worker 池消费共享 FIFO 队列，支持按 sign 批量取消
pub mod dispatch {
    use crate::internal;
    pub use internal::dispatch::dispatch_config::*;
    pub use internal::dispatch::dispatch_queue::DispatchQueue;
    pub use internal::dispatch::queue_error::QueueError;
    pub use internal::dispatch::queue_stats::QueueStats;
    pub use internal::dispatch::worker_status::WorkerStatus;
}

/// 下载领域类型，以及调用方需要实现的下载器 / 监听器接口
pub mod download {
    use crate::internal;
    // 结构体模型
    pub use internal::download::structs::*;
    // 外部能力
    pub use internal::download::traits::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
