//! # UnlockReactiveProperty
//!
//! 无锁读写的响应式属性，基于 [`tokio::sync::watch`]。
//! 调度队列用它发布 [`WorkerStatus`](crate::dispatch::WorkerStatus) 与
//! [`QueueStats`](crate::dispatch::QueueStats)，调用方可随时读取快照或等待变化。
//!
//! ## 使用示例
//! ```rust,no_run
//! use download_queue::states::unlock_reactive::UnlockReactiveProperty;
//!
//! # async fn example() {
//! let prop = UnlockReactiveProperty::new(0usize);
//! let mut watcher = prop.watch();
//! prop.update(3);
//! watcher.wait_until(|v| *v == 3).await.unwrap();
//! # }
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器，写入不阻塞，适合高频更新（如队列长度）。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
