use super::download_error::DownloadError;

/// 单个任务的执行结果：成功 / 失败 / 取消。
///
/// 取消不是错误，与 `Failure` 分开交给监听器。
#[derive(Debug)]
pub enum DownloadOutcome<T> {
    Success(T),
    Failure(DownloadError),
    Cancelled,
}

impl<T> DownloadOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// 转换成功载荷，失败与取消原样保留
    pub fn map<U, F>(self, f: F) -> DownloadOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(payload) => DownloadOutcome::Success(f(payload)),
            Self::Failure(error) => DownloadOutcome::Failure(error),
            Self::Cancelled => DownloadOutcome::Cancelled,
        }
    }
}

impl<T> From<Result<T, DownloadError>> for DownloadOutcome<T> {
    fn from(result: Result<T, DownloadError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(error) => Self::Failure(error),
        }
    }
}
