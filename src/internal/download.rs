//! 下载领域模块：请求、结果、任务，以及调度层依赖的两个外部能力（下载器、监听器）。
//!
//! 对外导出以 [`crate::download`] 为准，此处仅做模块划分。

pub mod structs;
pub mod traits;
