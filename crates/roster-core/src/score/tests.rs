use super::HardSoftScore;

#[test]
fn test_creation() {
    let score = HardSoftScore::of(-2, -100);
    assert_eq!(score.hard(), -2);
    assert_eq!(score.soft(), -100);
    assert_eq!(HardSoftScore::of_soft(-3), HardSoftScore::of(0, -3));
}

#[test]
fn test_feasibility() {
    assert!(HardSoftScore::of(0, -1000).is_feasible());
    assert!(!HardSoftScore::of(-1, 0).is_feasible());
}

#[test]
fn test_comparison() {
    assert!(HardSoftScore::of(0, -1000) > HardSoftScore::of(-1, 0));
    assert!(HardSoftScore::of(0, -50) > HardSoftScore::of(0, -100));
    assert!(HardSoftScore::of(-1, -1000) > HardSoftScore::of(-2, 0));
}

#[test]
fn test_arithmetic() {
    let s1 = HardSoftScore::of(-1, -100);
    let s2 = HardSoftScore::of(-1, -50);

    assert_eq!(s1 + s2, HardSoftScore::of(-2, -150));
    assert_eq!(s1 - s2, HardSoftScore::of(0, -50));
    assert_eq!(-s1, HardSoftScore::of(1, 100));
    assert_eq!(s2.multiply(3), HardSoftScore::of(-3, -150));

    let total: HardSoftScore = vec![s1, s2, HardSoftScore::ONE_SOFT].into_iter().sum();
    assert_eq!(total, HardSoftScore::of(-2, -149));
}

#[test]
fn test_display() {
    assert_eq!(HardSoftScore::of(-1, -20).to_string(), "-1hard/-20soft");
}
