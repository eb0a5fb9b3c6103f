use super::*;
use std::sync::Arc;

#[test]
fn put_overwrites_pending_value() {
    let slot = LatestSlot::new();
    assert_eq!(slot.put(1), None);
    assert_eq!(slot.put(2), Some(1));
    assert_eq!(slot.put(3), Some(2));
    assert!(slot.is_pending());
    assert_eq!(slot.try_take(), Some(3));
    assert_eq!(slot.try_take(), None);
    assert!(!slot.is_pending());
}

#[tokio::test]
async fn take_returns_immediately_when_pending() {
    let slot = LatestSlot::new();
    slot.put("a");
    slot.put("b");
    assert_eq!(slot.take().await, "b");
}

#[tokio::test]
async fn take_waits_for_a_later_put() {
    let slot = Arc::new(LatestSlot::new());
    let consumer = tokio::spawn({
        let slot = slot.clone();
        async move { slot.take().await }
    });
    tokio::task::yield_now().await;
    slot.put(42_u32);
    assert_eq!(consumer.await.unwrap(), 42);
}

#[tokio::test]
async fn stale_wakeup_does_not_yield_an_empty_take() {
    let slot = Arc::new(LatestSlot::new());
    slot.put(1_u8);
    assert_eq!(slot.try_take(), Some(1));

    // The permit from the first put is still stored; take must wait for real data.
    let consumer = tokio::spawn({
        let slot = slot.clone();
        async move { slot.take().await }
    });
    tokio::task::yield_now().await;
    assert!(!consumer.is_finished());
    slot.put(2);
    assert_eq!(consumer.await.unwrap(), 2);
}
