use super::*;

fn xs(q: &TrailQueue) -> Vec<f64> {
    q.iter().map(|p| p.x).collect()
}

#[test]
fn full_queue_evicts_single_oldest() {
    let mut q = TrailQueue::new(4);
    for i in 0..4 {
        q.push(Point::new(f64::from(i), 0.0), 0.0, None);
    }
    assert_eq!(q.len(), 4);

    q.push(Point::new(4.0, 0.0), 0.0, None);
    assert_eq!(q.len(), 4);
    assert_eq!(xs(&q), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn zero_capacity_keeps_nothing() {
    let mut q = TrailQueue::new(0);
    let ins = q.push(Point::new(3.0, 3.0), 0.0, None);
    assert!(matches!(ins, Insertion::Inserted { prev: None, .. }));
    assert!(q.is_empty());
}

#[test]
fn zero_smoothing_records_raw_input() {
    let mut q = TrailQueue::new(8);
    q.push(Point::new(0.0, 0.0), 0.0, None);
    q.push(Point::new(37.5, -12.25), 0.0, None);
    assert_eq!(q.last().unwrap().pos(), Point::new(37.5, -12.25));
}

#[test]
fn heavy_smoothing_lags_behind_large_jumps() {
    let mut q = TrailQueue::new(8);
    q.push(Point::new(0.0, 0.0), 0.999_999, None);
    let ins = q.push(Point::new(10_000.0, 10_000.0), 0.999_999, None);
    let Insertion::Inserted { point, prev } = ins else {
        panic!("expected insertion");
    };
    assert_eq!(prev, Some(Point::new(0.0, 0.0)));
    assert!(point.distance(Point::ZERO) < 0.02);
}

#[test]
fn smoothing_is_exponential_interpolation() {
    let mut q = TrailQueue::new(8);
    q.push(Point::new(0.0, 0.0), 0.5, None);
    q.push(Point::new(100.0, 0.0), 0.5, None);
    q.push(Point::new(100.0, 0.0), 0.5, None);
    assert_eq!(xs(&q), vec![0.0, 50.0, 75.0]);
}

#[test]
fn spacing_gate_discards_close_inputs() {
    let mut q = TrailQueue::new(8);
    q.push(Point::new(10.0, 10.0), 0.0, Some(5.0));
    let ins = q.push(Point::new(12.0, 11.0), 0.0, Some(5.0));
    assert_eq!(ins, Insertion::Skipped);
    assert_eq!(q.len(), 1);

    q.push(Point::new(15.0, 10.0), 0.0, Some(5.0));
    assert_eq!(q.len(), 2);
}

#[test]
fn decay_removes_expired_points_and_keeps_order() {
    let mut q = TrailQueue::new(8);
    for i in 0..3 {
        q.push(Point::new(f64::from(i), 0.0), 0.0, None);
    }
    assert_eq!(q.decay(0.4), 0);
    assert!(q.iter().all(|p| (p.life - 0.6).abs() < 1e-12));
    assert_eq!(xs(&q), vec![0.0, 1.0, 2.0]);

    q.push(Point::new(3.0, 0.0), 0.0, None);
    assert_eq!(q.decay(0.6), 3);
    assert_eq!(xs(&q), vec![3.0]);
    assert!((q.last().unwrap().life - 0.4).abs() < 1e-12);
}

#[test]
fn shrinking_capacity_keeps_newest() {
    let mut q = TrailQueue::new(5);
    for i in 0..5 {
        q.push(Point::new(f64::from(i), 0.0), 0.0, None);
    }
    q.set_capacity(2);
    assert_eq!(q.capacity(), 2);
    assert_eq!(xs(&q), vec![3.0, 4.0]);
}
