//! 可观察状态：调度层对外发布的运行状态都基于这里的响应式属性。

pub(crate) mod reactive_core;
pub mod unlock_reactive;
