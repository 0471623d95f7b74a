/// worker 状态（由 worker 内部维护，外部只读监听）
///
/// 只有两种状态，且只会单向从 `Running` 变为 `Stopped`：停止后的 worker 不会恢复，
/// 再次 `start()` 会创建新的 worker。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Running,
    Stopped,
}
