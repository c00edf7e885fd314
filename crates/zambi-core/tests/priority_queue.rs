use zambi_core::PriorityQueue;

#[test]
fn priority_queue_dequeues_lowest_priority_first() {
    let mut q = PriorityQueue::new();
    q.enqueue(5, "five");
    q.enqueue(1, "one");
    q.enqueue(3, "three");

    assert_eq!(q.len(), 3);
    assert_eq!(q.peek(), Some(&"one"));
    assert_eq!(q.dequeue(), Some("one"));
    assert_eq!(q.dequeue(), Some("three"));
    assert_eq!(q.dequeue(), Some("five"));
    assert_eq!(q.dequeue(), None);
    assert!(q.is_empty());
}

#[test]
fn priority_queue_buckets_preserve_insertion_order() {
    let mut q = PriorityQueue::new();
    q.enqueue(2, 'a');
    q.enqueue(2, 'b');
    q.enqueue(1, 'c');
    q.enqueue(2, 'd');

    let order: Vec<char> = std::iter::from_fn(|| q.dequeue()).collect();
    assert_eq!(order, vec!['c', 'a', 'b', 'd']);
}

#[test]
fn priority_queue_targeted_removal_and_membership() {
    let mut q = PriorityQueue::new();
    q.enqueue(1, 10u32);
    q.enqueue(1, 11u32);
    q.enqueue(4, 12u32);

    assert!(q.contains(&11));
    assert_eq!(q.remove(&11), Some(11));
    assert!(!q.contains(&11));
    assert_eq!(q.remove(&99), None);
    assert_eq!(q.len(), 2);

    // Removing the only item of the lowest bucket exposes the next bucket.
    assert_eq!(q.remove(&10), Some(10));
    assert_eq!(q.peek_with_priority(), Some((&4, &12)));
}

#[test]
fn priority_queue_dequeue_specific_priority() {
    let mut q = PriorityQueue::new();
    q.enqueue(1, "low");
    q.enqueue(7, "high-a");
    q.enqueue(7, "high-b");

    assert_eq!(q.dequeue_priority(&7), Some("high-a"));
    assert_eq!(q.dequeue_priority(&3), None);
    assert_eq!(q.len(), 2);
    assert_eq!(q.dequeue(), Some("low"));
    assert_eq!(q.dequeue(), Some("high-b"));
}
