//! Engine construction, round accounting and observer tests.

use reelsim_core::{
    config::{standard_paylines, GameConfig, ModeKind},
    event::SimEvent,
    lines::Payline,
    paytable::{PayoutTable, PayoutWarning},
    reel::Reel,
    symbol::Symbol,
    EngineSettings, EvaluationMode, SimEngine, SimError, SimStats,
};
use std::ops::ControlFlow;

/// Five reels that only ever show A.
fn solid_reels() -> Vec<Reel> {
    (0..5)
        .map(|i| Reel::new(i, vec![Symbol::new("A", 1, 0)]).unwrap())
        .collect()
}

fn solid_table() -> PayoutTable {
    PayoutTable::from_pairs([("A", vec![0, 0, 10, 20, 50])]).unwrap()
}

fn solid_engine(mode: EvaluationMode) -> SimEngine {
    SimEngine::new(solid_reels(), solid_table(), mode, EngineSettings::default()).unwrap()
}

fn default_engine(mode: ModeKind, seed: u64, initial_balance: i64) -> SimEngine {
    GameConfig::default_test()
        .build_engine(mode, EngineSettings { seed, initial_balance, ..EngineSettings::default() })
        .unwrap()
}

#[test]
fn construction_fails_without_reels() {
    let err = SimEngine::new(vec![], solid_table(), EvaluationMode::Ways, EngineSettings::default())
        .err()
        .unwrap();
    assert!(matches!(err, SimError::NoReels));
}

#[test]
fn construction_fails_without_paylines_in_lines_mode() {
    let err = SimEngine::new(
        solid_reels(),
        solid_table(),
        EvaluationMode::Lines(vec![]),
        EngineSettings::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, SimError::NoPaylines));
}

#[test]
fn construction_fails_on_payline_outside_grid() {
    let mode = EvaluationMode::Lines(vec![Payline::new(vec![(0, 0), (0, 1), (0, 5)])]);
    let err = SimEngine::new(solid_reels(), solid_table(), mode, EngineSettings::default())
        .err()
        .unwrap();
    assert!(matches!(err, SimError::PaylineOutOfBounds { col: 5, cols: 5, .. }));
}

#[test]
fn construction_fails_on_zero_line_cost() {
    let settings = EngineSettings { line_cost: 0, ..EngineSettings::default() };
    let err = SimEngine::new(solid_reels(), solid_table(), EvaluationMode::Ways, settings)
        .err()
        .unwrap();
    assert!(matches!(err, SimError::ZeroLineCost));
}

#[test]
fn zero_bet_multiplier_is_rejected() {
    let mut engine = solid_engine(EvaluationMode::Ways);
    assert!(matches!(engine.play_round(0), Err(SimError::InvalidBetMultiplier)));
    assert!(matches!(engine.run_rounds(10, 0), Err(SimError::InvalidBetMultiplier)));
    assert_eq!(engine.stats().rounds_played, 0);
}

#[test]
fn round_charges_line_cost_and_pays_multiplied_win() {
    let mut engine = solid_engine(EvaluationMode::Lines(standard_paylines()));

    let outcome = engine.play_round(3).unwrap();

    // 20 lines of five A at 50 each, times 3.
    assert_eq!(outcome.round, 1);
    assert_eq!(outcome.bet, 150);
    assert_eq!(outcome.win, 3_000);
    assert!(outcome.warnings.is_empty());

    let stats = engine.stats();
    assert_eq!(stats.total_wagered, 150);
    assert_eq!(stats.total_won, 3_000);
    assert_eq!(stats.balance, 2_850);
    assert_eq!(stats.winning_rounds, 1);
}

#[test]
fn oversized_bet_is_rejected_before_any_round() {
    let one_line = vec![Payline::from_rows(&[0, 0, 0, 0, 0])];
    let mut engine = solid_engine(EvaluationMode::Lines(one_line));

    let err = engine.play_round(u64::MAX / 10).err().unwrap();
    assert!(matches!(err, SimError::BetOverflow { line_cost: 50, .. }));

    // Fits in u64 but not in a signed balance.
    let past_balance = i64::MAX as u64 / 50 + 1;
    assert!(matches!(engine.play_round(past_balance), Err(SimError::BetOverflow { .. })));
    assert!(matches!(engine.run_rounds(10, past_balance), Err(SimError::BetOverflow { .. })));
    assert!(matches!(engine.run_parallel(10, past_balance, 2), Err(SimError::BetOverflow { .. })));

    assert_eq!(engine.stats(), &SimStats::new(0));
}

#[test]
fn overflowing_win_fails_the_round_without_touching_totals() {
    let settings = EngineSettings { line_cost: 1, ..EngineSettings::default() };
    let one_line = vec![Payline::from_rows(&[0, 0, 0, 0, 0])];
    let mut engine =
        SimEngine::new(solid_reels(), solid_table(), EvaluationMode::Lines(one_line), settings)
            .unwrap();

    // Five A pays 50; the bet itself fits.
    let multiplier = u64::MAX / 50 + 1;
    let err = engine.play_round(multiplier).err().unwrap();
    assert!(matches!(err, SimError::WinOverflow { score: 50, .. }));
    assert_eq!(engine.stats().rounds_played, 0);
    assert_eq!(engine.stats().total_wagered, 0);

    assert!(matches!(engine.run_rounds(5, multiplier), Err(SimError::WinOverflow { .. })));
    assert_eq!(engine.stats(), &SimStats::new(0));

    // Ordinary play still works afterwards.
    assert_eq!(engine.play_round(1).unwrap().win, 50);
}

#[test]
fn accumulator_refuses_to_wrap() {
    let mut stats = SimStats::new(i64::MIN + 10);
    assert!(matches!(stats.record_bet(11), Err(SimError::StatsOverflow { rounds: 0 })));
    assert_eq!(stats, SimStats::new(i64::MIN + 10));

    let mut stats = SimStats::new(0);
    assert!(matches!(stats.record_win(u64::MAX), Err(SimError::StatsOverflow { .. })));
    assert_eq!(stats.winning_rounds, 0);

    let mut full = SimStats::new(0);
    full.total_wagered = u64::MAX - 1;
    let mut other = SimStats::new(0);
    other.record_bet(2).unwrap();
    let before = full.clone();
    assert!(matches!(full.merge(&other), Err(SimError::StatsOverflow { .. })));
    assert_eq!(full, before);
}

#[test]
fn rtp_is_won_over_wagered() {
    let mut stats = SimStats::new(0);
    assert_eq!(stats.rtp(), 0.0);

    stats.record_bet(100).unwrap();
    stats.record_win(50).unwrap();
    assert_eq!(stats.rtp(), 50.0);
    assert_eq!(stats.winning_rounds, 1);

    stats.record_bet(100).unwrap();
    stats.record_win(0).unwrap();
    assert_eq!(stats.rounds_played, 2);
    assert_eq!(stats.winning_rounds, 1);
    assert_eq!(stats.rtp(), 25.0);
    assert_eq!(stats.hit_frequency(), 50.0);
}

#[test]
fn balance_never_drifts_from_totals() {
    for mode in [ModeKind::Lines, ModeKind::Ways] {
        let mut engine = default_engine(mode, 2024, 1_000_000);
        let stats = engine.run_rounds(5_000, 2).unwrap();

        assert_eq!(stats.rounds_played, 5_000);
        assert_eq!(stats.total_wagered, 5_000 * 50 * 2);
        assert_eq!(
            stats.balance,
            stats.initial_balance - stats.total_wagered as i64 + stats.total_won as i64,
        );
        assert!(stats.winning_rounds <= stats.rounds_played);
    }
}

#[test]
fn zero_rounds_leave_statistics_unchanged() {
    let mut engine = default_engine(ModeKind::Lines, 9, 500);
    engine.run_rounds(100, 1).unwrap();
    let before = engine.stats().clone();

    let after = engine.run_rounds(0, 4).unwrap();

    assert_eq!(before, after);
    assert_eq!(&after, engine.stats());
}

#[test]
fn observer_sees_start_progress_and_completion() {
    let mut engine = default_engine(ModeKind::Lines, 5, 0);
    let mut events = Vec::new();

    engine
        .run_rounds_observed(1_000, 1, |event| {
            events.push(event.clone());
            ControlFlow::Continue(())
        })
        .unwrap();

    assert!(matches!(events.first(), Some(SimEvent::RunStarted { total_rounds: 1_000, .. })));
    assert!(matches!(
        events.last(),
        Some(SimEvent::RunCompleted { rounds_done: 1_000, stopped: false, .. })
    ));
    let progress: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::Progress { rounds_done, .. } => Some(*rounds_done),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 20);
    assert_eq!(progress[0], 50);
    assert_eq!(progress[19], 1_000);
}

#[test]
fn observer_can_stop_the_run() {
    let mut engine = default_engine(ModeKind::Ways, 5, 0);
    let mut completed = None;

    let stats = engine
        .run_rounds_observed(1_000, 1, |event| match event {
            SimEvent::Progress { .. } => ControlFlow::Break(()),
            SimEvent::RunCompleted { rounds_done, stopped, .. } => {
                completed = Some((*rounds_done, *stopped));
                ControlFlow::Continue(())
            }
            _ => ControlFlow::Continue(()),
        })
        .unwrap();

    assert_eq!(stats.rounds_played, 50);
    assert_eq!(completed, Some((50, true)));
}

#[test]
fn repeated_warnings_are_reported_once_and_tallied() {
    // Every round: 3^5 = 243 ways of A against a five-entry table.
    let mut engine = solid_engine(EvaluationMode::Ways);
    let mut raised = Vec::new();

    let stats = engine
        .run_rounds_observed(40, 1, |event| {
            if let SimEvent::PayoutWarningRaised { round, warning } = event {
                raised.push((*round, warning.clone()));
            }
            ControlFlow::Continue(())
        })
        .unwrap();

    let expected = PayoutWarning::MatchCountOutOfRange { symbol: "A".into(), count: 243, max: 5 };
    assert_eq!(raised, vec![(1, expected.clone())]);
    assert_eq!(engine.warning_tally().get(&expected), Some(&40));
    assert_eq!(engine.total_warnings(), 40);
    assert_eq!(stats.total_won, 0, "warnings resolve to a zero payout");
    assert_eq!(stats.rounds_played, 40, "warnings never abort a round");
}

#[test]
fn play_round_returns_its_own_warnings() {
    let mut engine = solid_engine(EvaluationMode::Ways);
    let first = engine.play_round(1).unwrap();
    let second = engine.play_round(1).unwrap();

    assert_eq!(first.warnings.len(), 1);
    assert_eq!(second.warnings.len(), 1);
    assert_eq!(engine.total_warnings(), 2);
}
