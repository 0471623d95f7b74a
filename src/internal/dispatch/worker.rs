//! # DownloadWorker — 任务消费循环
//!
//! 每个池槽位、每一代 `start()` 各有一个 worker。循环：
//! 1. 等待任务或退出信号（两者在 biased `select!` 中竞争，退出信号优先）；
//! 2. 请求已取消则直接交付 `Cancelled`，不调用下载器；
//! 3. 否则在独立的 tokio 任务里执行下载器，panic 转为 `Failure`；
//! 4. 把结果交给监听器，回到 1。
//!
//! 退出信号不会打断正在执行的下载，只影响下一次取任务。

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::internal::download::structs::{DownloadError, DownloadOutcome, DownloadTask};
use crate::internal::download::traits::Downloader;
use crate::states::unlock_reactive::UnlockReactiveProperty;

use super::task_queue::TaskQueue;
use super::worker_status::WorkerStatus;

pub(crate) struct DownloadWorker<D: Downloader> {
    queue_name: Arc<str>,
    slot: usize,
    generation: u64,
    queue: Arc<TaskQueue<D>>,
    downloader: Arc<D>,
    quit: CancellationToken,
    status: UnlockReactiveProperty<WorkerStatus>,
}

/// 调度队列持有的 worker 句柄
pub(crate) struct WorkerHandle {
    pub(crate) slot: usize,
    pub(crate) quit: CancellationToken,
    pub(crate) status: UnlockReactiveProperty<WorkerStatus>,
    pub(crate) join: JoinHandle<()>,
}

impl WorkerHandle {
    /// 请求退出：不阻塞，不打断当前任务
    pub(crate) fn quit(&self) {
        self.quit.cancel();
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

impl<D: Downloader> DownloadWorker<D> {
    pub(crate) fn new(
        queue_name: Arc<str>,
        slot: usize,
        generation: u64,
        queue: Arc<TaskQueue<D>>,
        downloader: Arc<D>,
        quit: CancellationToken,
    ) -> Self {
        Self {
            queue_name,
            slot,
            generation,
            queue,
            downloader,
            quit,
            status: UnlockReactiveProperty::new(WorkerStatus::Running),
        }
    }

    /// 在当前运行时上启动循环，返回句柄
    pub(crate) fn spawn(self, runtime: &tokio::runtime::Handle) -> WorkerHandle {
        let slot = self.slot;
        let quit = self.quit.clone();
        let status = self.status.clone();
        let join = runtime.spawn(self.run());
        WorkerHandle {
            slot,
            quit,
            status,
            join,
        }
    }

    async fn run(self) {
        debug!(
            queue = %self.queue_name,
            worker = self.slot,
            generation = self.generation,
            "worker 已启动"
        );

        loop {
            let (ticket, task) = tokio::select! {
                biased;

                _ = self.quit.cancelled() => break,
                taken = self.queue.take() => taken,
            };

            let what = task.what;
            debug!(
                queue = %self.queue_name,
                worker = self.slot,
                generation = self.generation,
                what,
                "取到任务"
            );

            let outcome = self.execute(&task).await;
            self.queue.complete(ticket);
            self.deliver(task, outcome);
        }

        self.status.update(WorkerStatus::Stopped);
        debug!(
            queue = %self.queue_name,
            worker = self.slot,
            generation = self.generation,
            "worker 已停止"
        );
    }

    async fn execute(&self, task: &DownloadTask<D>) -> DownloadOutcome<D::Payload> {
        if task.request.is_cancelled() {
            debug!(queue = %self.queue_name, what = task.what, "请求已取消，跳过下载");
            return DownloadOutcome::Cancelled;
        }

        let what = task.what;
        if catch_unwind(AssertUnwindSafe(|| task.listener.on_start(what))).is_err() {
            warn!(queue = %self.queue_name, what, "监听器 on_start panic，已忽略");
        }

        // 下载器放到独立任务里执行，panic 只会体现在 JoinError 上
        let downloader = Arc::clone(&self.downloader);
        let request = Arc::clone(&task.request);
        let handle = tokio::spawn(async move { downloader.execute(&request).await });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => {
                let message = panic_message(e.into_panic());
                warn!(
                    queue = %self.queue_name,
                    worker = self.slot,
                    what,
                    panic = %message,
                    "下载器 panic，按失败处理"
                );
                DownloadOutcome::Failure(DownloadError::Panicked(message))
            }
            Err(_) => {
                warn!(queue = %self.queue_name, worker = self.slot, what, "下载任务被中止");
                DownloadOutcome::Failure(DownloadError::Aborted)
            }
        }
    }

    fn deliver(&self, task: DownloadTask<D>, outcome: DownloadOutcome<D::Payload>) {
        let DownloadTask { what, listener, .. } = task;
        if catch_unwind(AssertUnwindSafe(|| listener.on_result(what, outcome))).is_err() {
            warn!(queue = %self.queue_name, what, "监听器 on_result panic，已忽略");
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "未知 panic".to_string()
    }
}
