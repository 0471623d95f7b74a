//! 数据模型测试：sign 比较、请求取消标志的单向性、结果转换、配置反序列化。

use std::time::Duration;

use tokio::time::timeout;

use crate::dispatch::{DEFAULT_POOL_SIZE, DEFAULT_QUEUE_NAME, DispatchQueueConfig, QueueError};
use crate::download::{DownloadError, DownloadOutcome, DownloadRequest, Sign};

// ═══════════════════════════ Sign ═══════════════════════════

#[test]
fn signs_compare_by_value() {
    assert_eq!(Sign::from("page"), Sign::from(String::from("page")));
    assert_ne!(Sign::from("a"), Sign::from("b"));
    assert_eq!(Sign::new("x").to_string(), "x");
    assert_eq!(Sign::from("x").as_str(), Some("x"));
}

#[test]
fn integer_and_string_signs_never_collide() {
    assert_ne!(Sign::from(7u64), Sign::from("7"));
    assert_ne!(Sign::from(7i64), Sign::from(String::from("7")));
    assert_eq!(Sign::from(-3i64).as_int(), Some(-3));
    assert_eq!(Sign::from(-3i64).as_str(), None);

    // 整数按数值比较，不区分宽度
    assert_eq!(Sign::from(7), Sign::from(7u64));
    assert_eq!(Sign::from(7u32), Sign::from(7i64));
    assert_ne!(Sign::from(7), Sign::from(8));
}

// ═══════════════════════════ DownloadRequest ═══════════════════════════

#[test]
fn cancel_is_one_way() {
    let request = DownloadRequest::new(()).with_sign("g");
    assert!(!request.is_cancelled());

    assert!(request.cancel());
    assert!(request.is_cancelled());
    assert!(!request.cancel(), "第二次取消不算新标记");
    assert!(request.is_cancelled());
}

#[test]
fn cancel_by_sign_only_matches_own_sign() {
    let request = DownloadRequest::new("params").with_sign("g");
    assert_eq!(request.params(), &"params");
    assert_eq!(request.sign(), Some(&Sign::from("g")));

    assert!(!request.cancel_by_sign(&Sign::from("other")));
    assert!(!request.is_cancelled());

    assert!(request.cancel_by_sign(&Sign::from("g")));
    assert!(!request.cancel_by_sign(&Sign::from("g")));
    assert!(request.is_cancelled());
}

#[test]
fn request_without_sign_ignores_cancel_by_sign() {
    let request = DownloadRequest::new(1u8);
    assert!(request.sign().is_none());
    assert!(!request.cancel_by_sign(&Sign::from("g")));
    assert!(!request.is_cancelled());
}

#[tokio::test]
async fn cancelled_future_resolves_after_cancel() {
    let request = std::sync::Arc::new(DownloadRequest::new(()));
    let r = std::sync::Arc::clone(&request);

    let waiter = tokio::spawn(async move { r.cancelled().await });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!waiter.is_finished());

    request.cancel();
    timeout(Duration::from_secs(1), waiter)
        .await
        .expect("取消后应被唤醒")
        .unwrap();

    // 已取消时立即返回
    timeout(Duration::from_millis(10), request.cancelled())
        .await
        .unwrap();
}

// ═══════════════════════════ DownloadOutcome ═══════════════════════════

#[test]
fn outcome_helpers() {
    let ok: DownloadOutcome<u32> = Ok(3).into();
    assert!(ok.is_success());
    assert!(matches!(ok.map(|v| v * 2), DownloadOutcome::Success(6)));

    let failed: DownloadOutcome<u32> = Err(DownloadError::message("断开")).into();
    assert!(failed.is_failure());
    assert!(matches!(
        failed.map(|v| v.to_string()),
        DownloadOutcome::Failure(DownloadError::Message(ref m)) if m == "断开"
    ));

    let cancelled: DownloadOutcome<u32> = DownloadOutcome::Cancelled;
    assert!(cancelled.is_cancelled());
    assert!(!cancelled.is_failure());
}

#[test]
fn transfer_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
    let error = DownloadError::transfer(io);
    assert_eq!(error.to_string(), "传输失败: reset by peer");
    assert!(std::error::Error::source(&error).is_some());
}

// ═══════════════════════════ 配置 ═══════════════════════════

#[test]
fn config_defaults() {
    let config = DispatchQueueConfig::default();
    assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    assert_eq!(config.name, DEFAULT_QUEUE_NAME);
    assert!(config.validate().is_ok());
}

#[test]
fn config_deserializes_with_missing_fields() {
    let config: DispatchQueueConfig = serde_json::from_str(r#"{ "pool_size": 8 }"#).unwrap();
    assert_eq!(config, DispatchQueueConfig::new(8));

    let config: DispatchQueueConfig = serde_json::from_str(r#"{ "name": "images" }"#).unwrap();
    assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    assert_eq!(config.name, "images");
}

#[test]
fn config_rejects_empty_pool() {
    let config: DispatchQueueConfig = serde_json::from_str(r#"{ "pool_size": 0 }"#).unwrap();
    assert!(matches!(config.validate(), Err(QueueError::InvalidPoolSize(0))));
}
