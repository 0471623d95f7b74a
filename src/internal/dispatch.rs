//! 调度模块：共享任务队列、worker 池与按 sign 批量取消。
//!
//! 对外导出以 [`crate::dispatch`] 为准。

pub mod dispatch_config;
pub mod dispatch_queue;
pub mod queue_error;
pub mod queue_stats;
pub(crate) mod task_queue;
pub(crate) mod worker;
pub mod worker_status;
