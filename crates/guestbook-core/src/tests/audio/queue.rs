use crate::{
    SampleQueue,
    tests::support::{block_of, feed},
};

/// WHAT: Intake is off until a session begins
/// WHY: Audio captured while idle must not end up in the next recording
#[test]
fn given_inactive_queue_when_pushing_then_block_ignored() {
    // Given: A fresh queue
    let queue = SampleQueue::new(4);

    // When: The producer pushes before begin()
    let accepted = queue.push(block_of(1));

    // Then: Nothing was queued and nothing counts as an overrun
    assert!(!accepted);
    assert_eq!(queue.available(), 0);
    assert_eq!(queue.overruns(), 0);
}

/// WHAT: A full queue drops the newest block and counts it
/// WHY: Overruns are the one data-loss path and must be visible
#[test]
#[allow(clippy::unwrap_used)]
fn given_full_queue_when_pushing_then_newest_dropped_and_counted() {
    // Given: An active queue of capacity 3 filled with blocks 1..=3
    let queue = SampleQueue::new(3);
    queue.begin();
    feed(&queue, 1, 3);

    // When: Two more blocks arrive
    feed(&queue, 4, 2);

    // Then: The oldest blocks survive and both new ones were counted
    assert_eq!(queue.available(), 3);
    assert_eq!(queue.overruns(), 2);
    assert_eq!(queue.pop().unwrap()[0], 1);
}

/// WHAT: begin() discards stale blocks, end() keeps queued ones readable
/// WHY: Stop must still flush everything captured before intake closed
#[test]
#[allow(clippy::unwrap_used)]
fn given_session_boundaries_when_toggling_then_stale_cleared_and_tail_kept() {
    // Given: A queue with leftovers from an earlier session
    let queue = SampleQueue::new(8);
    queue.begin();
    feed(&queue, 1, 2);

    // When: A new session begins, captures one block and ends
    queue.begin();
    feed(&queue, 10, 1);
    queue.end();
    let late = queue.push(block_of(99));

    // Then: Only the new block is readable and the late one was refused
    assert!(!late);
    assert_eq!(queue.available(), 1);
    assert_eq!(queue.pop().unwrap()[0], 10);
    assert!(queue.pop().is_none());
}

/// WHAT: Clones share one queue across threads
/// WHY: The capture callback produces on another thread than the recorder
#[test]
#[allow(clippy::unwrap_used)]
fn given_cloned_handle_when_producing_on_thread_then_consumer_sees_blocks() {
    // Given: An active queue and a producer handle moved to a thread
    let queue = SampleQueue::new(64);
    queue.begin();
    let producer = queue.clone();

    // When: The thread pushes 32 blocks
    std::thread::spawn(move || {
        feed(&producer, 0, 32);
    })
    .join()
    .unwrap();

    // Then: All 32 arrive in order
    let values: Vec<i16> = std::iter::from_fn(|| queue.pop()).map(|b| b[0]).collect();
    assert_eq!(values, (0..32).collect::<Vec<i16>>());
}
