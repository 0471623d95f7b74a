//! # ReactiveProperty — 响应式属性内核
//!
//! 基于 [`tokio::sync::watch`] 的可观察状态容器，调度层用它对外发布
//! worker 状态（Running / Stopped）与队列统计（排队数 / 执行中数）。
//!
//! 写入方同步调用 `update`，读取方可以拿快照，也可以 `watch()` 异步等待变化。
//! 本模块**不直接对外导出**，对外名称见 [`super::unlock_reactive`]。

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

// ──────────────────────────── Error ────────────────────────────

/// 响应式属性统一错误类型
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 属性已被销毁，不会再有新值
    #[error("属性已被销毁")]
    Destroyed,

    /// watch 通道接收失败
    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

// ──────────────────────────── Inner ────────────────────────────

/// 内部共享状态。
///
/// 最后一个持有者释放时发送 `None`，监听方据此得知属性已销毁。
#[derive(Debug)]
pub(crate) struct Inner<T> {
    pub(crate) sender: watch::Sender<Option<T>>,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        let _ = self.sender.send(None);
    }
}

// ──────────────────────────── ReactiveProperty ────────────────────────────

/// 响应式属性内核：new / update / update_field / get_current / watch。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    pub(crate) inner: Arc<Inner<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    /// 创建一个新的响应式属性。
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(Some(value));
        Self {
            inner: Arc::new(Inner { sender }),
        }
    }

    /// 写入新值并通知所有监听者。没有监听者时同样会保存该值。
    ///
    /// 持有 `&self` 就说明属性还活着，所以写入不会失败；
    /// 销毁只会被监听方通过 [`ReactivePropertyError::Destroyed`] 观察到。
    pub fn update(&self, new_value: T) -> &Self {
        self.inner.sender.send_replace(Some(new_value));
        self
    }

    /// 在当前值上原地修改。
    ///
    /// 修改发生在 watch 通道内部锁中，多个写入方并发调用也不会丢失更新。
    pub fn update_field<F>(&self, updater: F) -> &Self
    where
        F: FnOnce(&mut T),
    {
        self.inner.sender.send_modify(|slot| {
            if let Some(value) = slot.as_mut() {
                updater(value);
            }
        });
        self
    }

    /// 获取当前值的快照（会 clone）。
    pub fn get_current(&self) -> Option<T> {
        self.inner.sender.borrow().as_ref().cloned()
    }

    /// 获取当前值，属性已销毁时返回默认值。
    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get_current().unwrap_or_default()
    }

    /// 创建一个监听器，用于异步监听属性值的变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.inner.sender.subscribe(),
        }
    }
}

// ──────────────────────────── PropertyWatcher ────────────────────────────

/// 属性监听器，用于异步接收属性值的变化。
///
/// 监听器不延长属性的生命周期：最后一个 `ReactiveProperty` 释放后，
/// `changed` / `wait_until` 返回 [`ReactivePropertyError::Destroyed`]。
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 异步等待属性值的变化，返回新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        match self.receiver.borrow_and_update().as_ref() {
            None => Err(ReactivePropertyError::Destroyed),
            Some(value) => Ok(value.clone()),
        }
    }

    /// 挂起直到当前值满足条件；当前值已满足时立即返回。
    ///
    /// 常用于等待某个 worker 进入 `Stopped`，或等待队列清空。
    pub async fn wait_until<F>(&mut self, mut predicate: F) -> Result<T, ReactivePropertyError>
    where
        F: FnMut(&T) -> bool,
    {
        let guard = self
            .receiver
            .wait_for(|slot| slot.as_ref().is_none_or(&mut predicate))
            .await?;
        match &*guard {
            None => Err(ReactivePropertyError::Destroyed),
            Some(value) => Ok(value.clone()),
        }
    }

    /// 同步获取当前值的克隆。
    pub fn borrow(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }
}
