use core_logic::random::{random_delay, random_f64, random_u64, random_wait};
use core_logic::Bounds;
use std::time::Duration;

#[test]
fn test_random_u64_stays_in_bounds() {
    let bounds = Bounds::new(10u64, 15);
    for _ in 0..500 {
        let n = random_u64(&bounds);
        assert!(bounds.contains(n), "{} out of range", n);
    }
}

#[test]
fn test_random_u64_hits_both_ends() {
    let bounds = Bounds::new(0u64, 1);
    let mut seen = [false; 2];
    for _ in 0..500 {
        seen[random_u64(&bounds) as usize] = true;
    }
    assert!(seen[0] && seen[1]);
}

#[test]
fn test_random_f64_stays_in_bounds() {
    let bounds = Bounds::new(5.0f64, 10.0);
    for _ in 0..500 {
        let p = random_f64(&bounds);
        assert!((5.0..=10.0).contains(&p));
    }
}

#[test]
fn test_degenerate_bounds_return_min() {
    assert_eq!(random_u64(&Bounds::fixed(7)), 7);
    assert_eq!(random_f64(&Bounds::fixed(2.5)), 2.5);
    assert_eq!(random_delay(&Bounds::fixed(3)), Duration::from_secs(3));
}

#[tokio::test]
async fn test_random_wait_zero_returns_immediately() {
    let slept = random_wait(&Bounds::fixed(0)).await;
    assert!(slept.is_zero());
}
