use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::internal::download::structs::{DownloadRequest, DownloadTask, Sign};
use crate::internal::download::traits::{DownloadListener, Downloader};
use crate::states::unlock_reactive::{PropertyWatcher, UnlockReactiveProperty};

use super::dispatch_config::DispatchQueueConfig;
use super::queue_error::QueueError;
use super::queue_stats::QueueStats;
use super::task_queue::TaskQueue;
use super::worker::{DownloadWorker, WorkerHandle};
use super::worker_status::WorkerStatus;

/// 下载调度队列：一个共享的无界 FIFO 任务队列 + 固定大小的 worker 池。
///
/// 同时执行的下载数不超过 `pool_size`；可以按 [`Sign`] 批量取消。
///
/// ```rust,no_run
/// # use download_queue::dispatch::DispatchQueue;
/// # use download_queue::download::{DownloadRequest, Downloader, listener_fn};
/// # async fn example<D: Downloader<Params = String, Payload = ()>>(downloader: D) {
/// let queue = DispatchQueue::new(downloader, 3).unwrap();
/// queue.start().unwrap();
///
/// let request = DownloadRequest::new("https://example.com/a.zip".to_string()).with_sign("page-1");
/// queue.add(1, request, listener_fn(|what, outcome| println!("{what}: {outcome:?}")));
///
/// // 离开页面时整组取消
/// queue.cancel_all("page-1");
/// queue.shutdown().await;
/// # }
/// ```
pub struct DispatchQueue<D: Downloader> {
    config: DispatchQueueConfig,
    name: Arc<str>,
    downloader: Arc<D>,
    queue: Arc<TaskQueue<D>>,
    /// 协调锁：start / stop / cancel_all 互斥
    pool: Mutex<WorkerPool>,
}

#[derive(Default)]
struct WorkerPool {
    generation: u64,
    /// 当前代的 worker，未启动或已 stop 时为空
    workers: Vec<WorkerHandle>,
    /// 已通知退出、可能还在执行最后一个任务的旧 worker
    retired: Vec<WorkerHandle>,
}

/// 构建
impl<D: Downloader> DispatchQueue<D> {
    /// 创建调度队列，`pool_size` 为 0 时返回错误。
    pub fn new(downloader: D, pool_size: usize) -> Result<Self, QueueError> {
        Self::with_config(downloader, DispatchQueueConfig::new(pool_size))
    }

    pub fn with_config(downloader: D, config: DispatchQueueConfig) -> Result<Self, QueueError> {
        config.validate()?;
        Ok(Self {
            name: Arc::from(config.name.as_str()),
            config,
            downloader: Arc::new(downloader),
            queue: Arc::new(TaskQueue::new()),
            pool: Mutex::new(WorkerPool::default()),
        })
    }

    fn lock_pool(&self) -> MutexGuard<'_, WorkerPool> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 生命周期
impl<D: Downloader> DispatchQueue<D> {
    /// 启动（或重启）worker 池。
    ///
    /// 先 `stop()` 当前的 worker，再创建 `pool_size` 个新 worker 共享同一个队列。
    /// 旧 worker 手上的任务会继续执行完，结果照常交付给监听器。
    /// 必须在 tokio 运行时内调用。
    pub fn start(&self) -> Result<(), QueueError> {
        let runtime = tokio::runtime::Handle::try_current()?;
        let mut pool = self.lock_pool();
        self.stop_locked(&mut pool);

        pool.generation += 1;
        let generation = pool.generation;
        pool.workers = (0..self.config.pool_size)
            .map(|slot| {
                DownloadWorker::new(
                    Arc::clone(&self.name),
                    slot,
                    generation,
                    Arc::clone(&self.queue),
                    Arc::clone(&self.downloader),
                    CancellationToken::new(),
                )
                .spawn(&runtime)
            })
            .collect();

        info!(
            queue = %self.name,
            pool_size = self.config.pool_size,
            generation,
            "调度队列已启动"
        );
        Ok(())
    }

    /// 通知当前所有 worker 在本轮结束后退出。
    ///
    /// 不清空队列：尚未取出的任务会留给下一次 `start()`。没有 worker 时调用是安全的。
    pub fn stop(&self) {
        let mut pool = self.lock_pool();
        self.stop_locked(&mut pool);
    }

    fn stop_locked(&self, pool: &mut WorkerPool) {
        pool.retired.retain(|worker| !worker.is_finished());
        if pool.workers.is_empty() {
            return;
        }

        for worker in &pool.workers {
            worker.quit();
        }
        info!(
            queue = %self.name,
            generation = pool.generation,
            workers = pool.workers.len(),
            "调度队列已停止"
        );
        pool.retired.append(&mut pool.workers);
    }

    /// 停止并等待所有代的 worker 真正退出（包括它们手上正在执行的任务）。
    pub async fn shutdown(&self) {
        let workers = {
            let mut pool = self.lock_pool();
            self.stop_locked(&mut pool);
            std::mem::take(&mut pool.retired)
        };

        let slots: Vec<usize> = workers.iter().map(|worker| worker.slot).collect();
        let results = join_all(workers.into_iter().map(|worker| worker.join)).await;
        for (slot, result) in slots.into_iter().zip(results) {
            if let Err(e) = result {
                warn!(queue = %self.name, worker = slot, error = %e, "worker 异常退出");
            }
        }
        info!(queue = %self.name, "调度队列已关闭");
    }

    /// 当前是否有一代 worker 在运行
    pub fn is_running(&self) -> bool {
        !self.lock_pool().workers.is_empty()
    }
}

/// 任务
impl<D: Downloader> DispatchQueue<D> {
    /// 把任务追加到队尾。不阻塞，不会因容量失败。
    ///
    /// 没有 worker 运行时任务会一直等待，直到下一次 `start()`。
    pub fn add<L>(
        &self,
        what: i32,
        request: impl Into<Arc<DownloadRequest<D::Params>>>,
        listener: L,
    ) where
        L: DownloadListener<D::Payload> + 'static,
    {
        let request = request.into();
        debug!(queue = %self.name, what, sign = ?request.sign(), "任务入队");
        self.queue
            .push(DownloadTask::new(what, request, Arc::new(listener)));
    }

    /// 取消所有 sign 相同的请求，包括仍在排队的和正在执行的。
    ///
    /// 不移除任务：排队中的会按顺序出队后直接交付 `Cancelled`，执行中的由下载器自行发现并中止。
    /// 返回本次新标记的请求数，对同一个 sign 重复调用返回 0。
    pub fn cancel_all(&self, sign: impl Into<Sign>) -> usize {
        let sign = sign.into();
        let _pool = self.lock_pool();
        let marked = self.queue.cancel_matching(&sign);
        debug!(queue = %self.name, sign = %sign, marked, "按 sign 取消");
        marked
    }
}

/// 状态查询
impl<D: Downloader> DispatchQueue<D> {
    pub fn pool_size(&self) -> usize {
        self.config.pool_size
    }

    pub fn config(&self) -> &DispatchQueueConfig {
        &self.config
    }

    /// 当前排队 / 执行中的任务数快照
    pub fn stats(&self) -> QueueStats {
        self.queue.stats().get_or_default()
    }

    /// 监听队列统计变化
    pub fn watch_stats(&self) -> PropertyWatcher<QueueStats> {
        self.queue.stats().watch()
    }

    /// 当前这一代 worker 的状态，按槽位顺序
    pub fn worker_statuses(&self) -> Vec<UnlockReactiveProperty<WorkerStatus>> {
        self.lock_pool()
            .workers
            .iter()
            .map(|worker| worker.status.clone())
            .collect()
    }
}

impl<D: Downloader> Drop for DispatchQueue<D> {
    fn drop(&mut self) {
        // 释放后 worker 不再有人能唤醒，通知它们退出
        let pool = self.pool.get_mut().unwrap_or_else(PoisonError::into_inner);
        for worker in pool.workers.iter().chain(pool.retired.iter()) {
            worker.quit();
        }
    }
}
