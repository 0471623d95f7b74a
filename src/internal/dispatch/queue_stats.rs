/// 队列统计快照，每次队列变化时通过响应式属性发布。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// 排队中、尚未被 worker 取走的任务数
    pub pending: usize,
    /// 已被 worker 取走、尚未交付结果的任务数
    pub in_flight: usize,
}

impl QueueStats {
    /// 没有任何排队或执行中的任务
    pub fn is_idle(&self) -> bool {
        self.pending == 0 && self.in_flight == 0
    }
}
