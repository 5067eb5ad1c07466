use flight_game::{RoundController, RoundTuning};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fresh(high_score: u32) -> RoundController {
    RoundController::new(RoundTuning::default(), high_score)
}

#[test]
fn duration_decays_geometrically_per_hit() {
    let mut rng = StdRng::seed_from_u64(2021);
    let mut c = fresh(0);
    for n in 0..60 {
        let expected = 10.0_f64 * 0.9_f64.powi(n);
        let got = c.duration() as f64;
        assert!(
            (got - expected).abs() <= expected * 1e-4,
            "after {n} hits expected {expected}, got {got}"
        );
        let spawn = c.on_hit(&mut rng).expect("round active");
        assert_eq!(spawn.duration, c.duration());
    }
}

#[test]
fn hits_count_only_while_round_active() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut c = fresh(0);
    for expected in 1..=5 {
        assert!(c.on_hit(&mut rng).is_some());
        assert_eq!(c.score(), expected);
    }
    let outcome = c.on_timeout().expect("first miss ends the round");
    assert_eq!(outcome.score, 5);
    let duration_at_miss = c.duration();
    for _ in 0..3 {
        assert!(c.on_hit(&mut rng).is_none());
    }
    assert_eq!(c.score(), 5);
    assert_eq!(c.duration(), duration_at_miss);
}

#[test]
fn set_high_score_keeps_maximum() {
    let mut c = fresh(10);
    let cases = [(3, 10, false), (10, 10, false), (11, 11, true), (4, 11, false)];
    for (candidate, expected, changed) in cases {
        assert_eq!(c.set_high_score(candidate), changed);
        assert_eq!(c.high_score(), expected);
    }
}

#[test]
fn timeout_records_new_high_score() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut c = fresh(2);
    for _ in 0..3 {
        c.on_hit(&mut rng);
    }
    let outcome = c.on_timeout().expect("round over");
    assert!(outcome.new_record);
    assert_eq!(outcome.high_score, 3);
    assert!(c.is_game_over());
}

#[test]
fn timeout_below_record_keeps_it() {
    let mut c = fresh(20);
    let outcome = c.on_timeout().expect("round over");
    assert!(!outcome.new_record);
    assert_eq!(c.high_score(), 20);
}

#[test]
fn reset_high_score_always_zero() {
    for prior in [0, 1, 999] {
        let mut c = fresh(prior);
        c.reset_high_score();
        assert_eq!(c.high_score(), 0);
    }
}

#[test]
fn restart_resets_round() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut c = fresh(0);
    for _ in 0..4 {
        c.on_hit(&mut rng);
    }
    c.on_timeout();
    let spawn = c.restart(&mut rng);
    assert_eq!(c.score(), 0);
    assert_eq!(c.duration(), 10.0);
    assert_eq!(spawn.duration, 10.0);
    assert!(!c.is_game_over());
    assert_eq!(c.run(), 1);
    assert_eq!(c.high_score(), 4);
    c.restart(&mut rng);
    assert_eq!(c.run(), 2);
}

#[test]
fn spawn_respects_configured_volume() {
    let mut rng = StdRng::seed_from_u64(123);
    let tuning = RoundTuning {
        spawn_range: 30,
        spawn_z: -120,
        ..RoundTuning::default()
    };
    let mut c = RoundController::new(tuning, 0);
    let mut saw_edge = false;
    for _ in 0..2000 {
        let s = c.spawn(&mut rng);
        assert!((-30..=30).contains(&s.position.x));
        assert!((-30..=30).contains(&s.position.y));
        assert_eq!(s.position.z, -120);
        saw_edge |= s.position.x.abs() == 30 || s.position.y.abs() == 30;
    }
    assert!(saw_edge, "inclusive range endpoints should be reachable");
}
