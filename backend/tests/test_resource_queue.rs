//! Tests for the capacity-one FIFO resource

use queue_simulator_core_rs::{Grant, ProcessId, ResourceError, ResourceQueue};

#[test]
fn test_idle_counter_grants_synchronously() {
    let mut counter = ResourceQueue::new();
    assert_eq!(counter.capacity(), 1);
    assert!(!counter.is_busy());

    assert_eq!(counter.request(ProcessId(1), 0.0).unwrap(), Grant::Granted);
    assert!(counter.is_busy());
    assert_eq!(counter.holder(), Some(ProcessId(1)));
    assert_eq!(counter.queue_len(), 0);
}

#[test]
fn test_grants_follow_request_order() {
    let mut counter = ResourceQueue::new();
    counter.request(ProcessId(0), 0.0).unwrap();
    for (i, id) in [4u64, 2, 7, 1].into_iter().enumerate() {
        assert_eq!(
            counter.request(ProcessId(id), 1.0 + i as f64).unwrap(),
            Grant::Queued { position: i }
        );
    }
    assert_eq!(
        counter.waiting().collect::<Vec<_>>(),
        vec![ProcessId(4), ProcessId(2), ProcessId(7), ProcessId(1)]
    );

    let mut holder = ProcessId(0);
    let mut granted = Vec::new();
    let mut now = 10.0;
    while let Some(next) = counter.release(holder, now).unwrap() {
        granted.push(next);
        holder = next;
        now += 1.0;
    }

    assert_eq!(
        granted,
        vec![ProcessId(4), ProcessId(2), ProcessId(7), ProcessId(1)]
    );
    assert!(!counter.is_busy());
    assert_eq!(counter.grants(), 5);
}

#[test]
fn test_release_by_waiter_rejected() {
    let mut counter = ResourceQueue::new();
    counter.request(ProcessId(1), 0.0).unwrap();
    counter.request(ProcessId(2), 0.0).unwrap();

    assert!(matches!(
        counter.release(ProcessId(2), 1.0),
        Err(ResourceError::NotHolder { .. })
    ));
    // Nothing changed.
    assert_eq!(counter.holder(), Some(ProcessId(1)));
    assert_eq!(counter.queue_len(), 1);
}

#[test]
fn test_release_of_idle_counter_rejected() {
    let mut counter = ResourceQueue::new();
    assert_eq!(
        counter.release(ProcessId(3), 0.0),
        Err(ResourceError::NotHolder {
            process: ProcessId(3),
            holder: None
        })
    );
}

#[test]
fn test_statistics_over_empty_window() {
    let counter = ResourceQueue::new();
    assert_eq!(counter.mean_queue_length(0.0), 0.0);
    assert_eq!(counter.utilisation(0.0), 0.0);
}
