//! 响应式属性测试：读写快照、watch 监听、条件等待、并发原地修改不丢更新。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::states::unlock_reactive::{UnlockReactiveProperty, UnlockReactivePropertyError};

#[tokio::test]
async fn basic_update_and_read() {
    let prop = UnlockReactiveProperty::new(0u64);
    prop.update(42);
    assert_eq!(prop.get_current(), Some(42));

    prop.update_field(|v| *v += 8);
    assert_eq!(prop.get_or_default(), 50);
}

#[tokio::test]
async fn watch_receives_updates() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut watcher = prop.watch();

    prop.update(1);
    assert_eq!(watcher.changed().await.unwrap(), 1);

    prop.update(2);
    assert_eq!(watcher.changed().await.unwrap(), 2);
    assert_eq!(watcher.borrow(), Some(2));
}

#[tokio::test]
async fn wait_until_already_satisfied() {
    let prop = UnlockReactiveProperty::new(100i32);
    // 当前值已满足，应立即返回
    let v = timeout(Duration::from_millis(50), prop.watch().wait_until(|v| *v == 100))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(v, 100);
}

#[tokio::test]
async fn wait_until_async_satisfied() {
    let prop = UnlockReactiveProperty::new(0i32);
    let p = prop.clone();

    tokio::spawn(async move {
        for i in 1..=10 {
            tokio::time::sleep(Duration::from_millis(2)).await;
            p.update(i);
        }
    });

    let v = timeout(Duration::from_secs(2), prop.watch().wait_until(|v| *v >= 10))
        .await
        .expect("应等到 10")
        .unwrap();
    assert_eq!(v, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_update_field_loses_nothing() {
    let prop = Arc::new(UnlockReactiveProperty::new(0usize));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let p = Arc::clone(&prop);
        handles.push(tokio::spawn(async move {
            for _ in 0..1000 {
                p.update_field(|v| *v += 1);
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    assert_eq!(prop.get_current(), Some(8000));
}

#[test]
fn writes_chain_on_a_live_property() {
    let prop = UnlockReactiveProperty::new(1u32);
    prop.update(2).update_field(|v| *v *= 10).update_field(|v| *v += 1);
    assert_eq!(prop.get_current(), Some(21));
}

#[tokio::test]
async fn watcher_sees_destroyed_after_last_owner_drops() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut changed = prop.watch();
    let mut waiting = prop.watch();
    drop(prop);

    assert!(matches!(
        changed.changed().await,
        Err(UnlockReactivePropertyError::Destroyed)
    ));
    let result = timeout(Duration::from_millis(50), waiting.wait_until(|v| *v > 0))
        .await
        .expect("属性销毁后不应继续挂起");
    assert!(matches!(result, Err(UnlockReactivePropertyError::Destroyed)));
}
