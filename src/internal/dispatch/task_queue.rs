//! # TaskQueue — 共享任务队列
//!
//! 所有 worker 共用的无界 FIFO 队列（多生产者、多消费者）。
//!
//! - `push` 不阻塞、不会因容量失败；
//! - `take` 是 worker 唯一的挂起点：队列为空时等待 `Notify`；
//! - 被取走的任务登记到执行中表，`cancel_matching` 在同一把锁下同时扫描排队与执行中的请求，
//!   所以任务从排队转为执行中的瞬间也不会漏扫。
//!
//! 锁只在内存操作期间持有，不跨 await，也不跨监听器回调。

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::internal::download::structs::{DownloadRequest, DownloadTask, Sign};
use crate::internal::download::traits::Downloader;
use crate::states::unlock_reactive::UnlockReactiveProperty;

use super::queue_stats::QueueStats;

/// 执行中任务的登记号
pub(crate) type Ticket = u64;

struct Slots<D: Downloader> {
    pending: VecDeque<DownloadTask<D>>,
    in_flight: HashMap<Ticket, Arc<DownloadRequest<D::Params>>>,
    next_ticket: Ticket,
}

impl<D: Downloader> Slots<D> {
    fn stats(&self) -> QueueStats {
        QueueStats {
            pending: self.pending.len(),
            in_flight: self.in_flight.len(),
        }
    }
}

pub(crate) struct TaskQueue<D: Downloader> {
    slots: Mutex<Slots<D>>,
    available: Notify,
    stats: UnlockReactiveProperty<QueueStats>,
}

impl<D: Downloader> TaskQueue<D> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(Slots {
                pending: VecDeque::new(),
                in_flight: HashMap::new(),
                next_ticket: 0,
            }),
            available: Notify::new(),
            stats: UnlockReactiveProperty::new(QueueStats::default()),
        }
    }

    /// 临界区内不会 panic，数据始终一致，中毒时直接取回内部数据
    fn lock(&self) -> MutexGuard<'_, Slots<D>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, slots: &Slots<D>) {
        self.stats.update(slots.stats());
    }

    /// 追加到队尾，并唤醒一个等待中的 worker。
    pub(crate) fn push(&self, task: DownloadTask<D>) {
        {
            let mut slots = self.lock();
            slots.pending.push_back(task);
            self.publish(&slots);
        }
        self.available.notify_one();
    }

    /// 非阻塞地取出队首任务，并登记为执行中。
    pub(crate) fn try_take(&self) -> Option<(Ticket, DownloadTask<D>)> {
        let mut slots = self.lock();
        let task = slots.pending.pop_front()?;
        let ticket = slots.next_ticket;
        slots.next_ticket = slots.next_ticket.wrapping_add(1);
        slots.in_flight.insert(ticket, Arc::clone(&task.request));
        self.publish(&slots);
        Some((ticket, task))
    }

    /// 取出队首任务，队列为空时挂起。
    ///
    /// 在被 `select!` 丢弃时是安全的：任务只会在一次 poll 内同步取出，
    /// 挂起点上不持有任务；已收到但未消费的 `notify_one` 会由 tokio 转交给下一个等待者。
    pub(crate) async fn take(&self) -> (Ticket, DownloadTask<D>) {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            // 先登记等待再检查队列，避免 push 发生在两者之间时丢失唤醒
            notified.as_mut().enable();

            if let Some(taken) = self.try_take() {
                return taken;
            }
            notified.await;
        }
    }

    /// 任务结果已确定，从执行中表移除。
    pub(crate) fn complete(&self, ticket: Ticket) {
        let mut slots = self.lock();
        if slots.in_flight.remove(&ticket).is_some() {
            self.publish(&slots);
        }
    }

    /// 标记排队中与执行中所有 sign 匹配的请求，返回本次新标记的数量。
    ///
    /// 不移除任何任务：被取消的任务仍按 FIFO 顺序出队，由 worker 短路处理。
    pub(crate) fn cancel_matching(&self, sign: &Sign) -> usize {
        let slots = self.lock();
        let queued = slots
            .pending
            .iter()
            .filter(|task| task.request.cancel_by_sign(sign))
            .count();
        let running = slots
            .in_flight
            .values()
            .filter(|request| request.cancel_by_sign(sign))
            .count();
        queued + running
    }

    pub(crate) fn stats(&self) -> &UnlockReactiveProperty<QueueStats> {
        &self.stats
    }
}
