mod helpers;

use helpers::{config, human_vs_callers, total_chips, AlwaysCall, AlwaysFold, MinRaiser};
use rand::RngCore;
use trainer_engine::cards::Card;
use trainer_engine::config::TableConfig;
use trainer_engine::engine::{Engine, Progress};
use trainer_engine::errors::{EngineFault, GameError};
use trainer_engine::game::{GameSnapshot, Street};
use trainer_engine::history::ShowdownResult;
use trainer_engine::player::{Action, ActionKind};
use trainer_engine::seat::{Decision, DecisionSource, Seat};

struct Shover;

impl DecisionSource for Shover {
    fn decide(&self, _s: &GameSnapshot, _hole: &[Card], _rng: &mut dyn RngCore) -> Decision {
        Decision::new(Action::AllIn, "shove")
    }

    fn label(&self) -> &str {
        "shover"
    }
}

/// Plays the human passively (check or call) until the hand ends.
fn play_out(engine: &mut Engine, mut progress: Progress, chips: u64) -> ShowdownResult {
    loop {
        progress = match progress {
            Progress::AwaitingHuman { seat } => {
                let to_call = engine.bet_level() - engine.players()[seat].street_contribution();
                let action = if to_call == 0 { Action::Check } else { Action::Call };
                engine.apply_human_action(action)
            }
            Progress::AwaitingOpponents { .. } => engine.run_opponent_turns(),
            Progress::StreetComplete { .. } => engine.advance_street(),
            Progress::HandComplete(result) => return result,
        }
        .expect("passive play is always legal");
        assert_eq!(total_chips(engine), chips);
    }
}

#[test]
fn human_first_to_act_preflop_and_check_is_rejected() {
    let mut engine = human_vs_callers(7, 3);
    let progress = engine.start_hand().unwrap();
    assert_eq!(engine.dealer(), 1);
    assert_eq!(progress, Progress::AwaitingHuman { seat: 0 });
    assert_eq!(engine.pot(), 30);

    let err = engine.apply_human_action(Action::Check).unwrap_err();
    assert_eq!(err, GameError::CheckFacingBet { to_call: 20 });
    assert_eq!(engine.pot(), 30);
    assert_eq!(engine.players()[0].stack(), 1000);
    assert_eq!(engine.status().unwrap(), Progress::AwaitingHuman { seat: 0 });

    let err = engine.apply_human_action(Action::Raise(20)).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidBetAmount {
            amount: 20,
            minimum: 21
        }
    );

    let progress = engine.apply_human_action(Action::Call).unwrap();
    assert_eq!(
        progress,
        Progress::StreetComplete {
            street: Street::Preflop
        }
    );
    assert_eq!(engine.pot(), 80);
    assert_eq!(total_chips(&engine), 4000);
}

#[test]
fn postflop_action_starts_left_of_the_dealer() {
    let mut engine = human_vs_callers(7, 3);
    engine.start_hand().unwrap();
    engine.apply_human_action(Action::Call).unwrap();
    let progress = engine.advance_street().unwrap();
    assert_eq!(engine.board().len(), 3);
    assert_eq!(progress, Progress::AwaitingOpponents { seat: 2 });
    assert_eq!(
        engine.run_opponent_turns().unwrap(),
        Progress::AwaitingHuman { seat: 0 }
    );
    assert_eq!(
        engine.apply_human_action(Action::Check).unwrap(),
        Progress::StreetComplete { street: Street::Flop }
    );
}

#[test]
fn big_blind_human_gets_the_option() {
    let mut engine = human_vs_callers(11, 2);
    assert_eq!(
        engine.start_hand().unwrap(),
        Progress::AwaitingOpponents { seat: 1 }
    );
    assert_eq!(
        engine.run_opponent_turns().unwrap(),
        Progress::AwaitingHuman { seat: 0 }
    );
    assert_eq!(engine.bet_level(), 20);
    engine.apply_human_action(Action::Check).unwrap();
    assert_eq!(engine.pot(), 60);
}

#[test]
fn passive_hand_reaches_showdown_and_conserves_chips() {
    let mut engine = human_vs_callers(42, 3);
    let progress = engine.start_hand().unwrap();
    let result = play_out(&mut engine, progress, 4000);

    assert_eq!(engine.board().len(), 5);
    assert_eq!(result.pot, 80);
    assert!(result.winning_category.is_some());
    assert_eq!(result.hands.len(), 4);
    assert_eq!(engine.pot(), 0);
    assert_eq!(total_chips(&engine), 4000);

    let record = engine.last_record().expect("sealed record");
    assert_eq!(record.streets.len(), 4);
    assert_eq!(record.result, result);
    let start: u32 = record.seats.iter().map(|s| s.chips_start).sum();
    let end: u32 = record.seats.iter().map(|s| s.chips_end).sum();
    assert_eq!(start, end);
}

#[test]
fn everyone_folds_to_the_big_blind() {
    let seats = vec![
        Seat::human("You"),
        Seat::scripted("F1", Box::new(AlwaysFold)),
        Seat::scripted("F2", Box::new(AlwaysFold)),
        Seat::scripted("F3", Box::new(AlwaysFold)),
    ];
    let mut engine = Engine::new(&config(5), seats).unwrap();
    engine.start_hand().unwrap();
    let result = match engine.apply_human_action(Action::Fold).unwrap() {
        Progress::HandComplete(result) => result,
        other => panic!("expected the hand to end, got {other:?}"),
    };
    assert_eq!(result.winner, 3);
    assert_eq!(result.winner_name, "F3");
    assert_eq!(result.pot, 30);
    assert_eq!(result.winning_category, None);
    assert!(result.hands.is_empty());
    assert_eq!(engine.players()[3].stack(), 1010);
    assert_eq!(engine.players()[2].stack(), 990);
    assert!(engine.board().is_empty());

    assert_eq!(
        engine.apply_human_action(Action::Call),
        Err(GameError::HandAlreadyComplete)
    );
    assert_eq!(engine.advance_street(), Err(GameError::HandAlreadyComplete));
}

#[test]
fn misuse_before_and_during_a_hand_is_rejected() {
    let mut engine = human_vs_callers(3, 3);
    assert_eq!(
        engine.apply_human_action(Action::Call),
        Err(GameError::NoHandInProgress)
    );
    assert_eq!(engine.advance_street(), Err(GameError::NoHandInProgress));

    engine.start_hand().unwrap();
    assert_eq!(engine.start_hand(), Err(GameError::HandInProgress));
    assert_eq!(
        engine.advance_street(),
        Err(GameError::StreetInProgress {
            street: Street::Preflop
        })
    );

    engine.apply_human_action(Action::Call).unwrap();
    assert_eq!(
        engine.apply_human_action(Action::Check),
        Err(GameError::StreetClosed {
            street: Street::Preflop
        })
    );
}

#[test]
fn raise_ceiling_halts_the_engine_for_good() {
    let seats = vec![
        Seat::scripted("R1", Box::new(MinRaiser(20))),
        Seat::scripted("R2", Box::new(MinRaiser(20))),
    ];
    let mut engine = Engine::new(&config(1), seats).unwrap();
    assert_eq!(
        engine.start_hand().unwrap(),
        Progress::AwaitingOpponents { seat: 0 }
    );
    let fault = EngineFault::ActionCeilingExceeded {
        street: Street::Preflop,
        ceiling: 6,
    };
    assert_eq!(
        engine.run_opponent_turns(),
        Err(GameError::Fault(fault.clone()))
    );
    assert_eq!(engine.fault(), Some(&fault));
    assert_eq!(engine.start_hand(), Err(GameError::Fault(fault.clone())));
    assert_eq!(engine.drive(), Err(GameError::Fault(fault.clone())));
    assert_eq!(engine.status(), Err(GameError::Fault(fault)));
    assert_eq!(total_chips(&engine), 2000);
}

#[test]
fn all_in_preflop_runs_out_the_board() {
    let seats = vec![
        Seat::scripted("Shove", Box::new(Shover)),
        Seat::scripted("C1", Box::new(AlwaysCall)),
        Seat::scripted("C2", Box::new(AlwaysCall)),
    ];
    let mut engine = Engine::new(&config(21), seats).unwrap();
    engine.start_hand().unwrap();
    let result = match engine.drive().unwrap() {
        Progress::HandComplete(result) => result,
        other => panic!("expected showdown, got {other:?}"),
    };
    assert_eq!(engine.board().len(), 5);
    assert_eq!(result.pot, 3000);
    assert_eq!(result.hands.len(), 3);
    assert_eq!(engine.players()[result.winner].stack(), 3000);
    assert_eq!(
        engine.start_hand(),
        Err(GameError::NotEnoughPlayers {
            minimum: 2,
            actual: 1
        })
    );
}

#[test]
fn busted_seats_sit_out_the_next_hand() {
    let seats = vec![
        Seat::scripted("Shove", Box::new(Shover)),
        Seat::scripted("Caller", Box::new(AlwaysCall)),
        Seat::scripted("F1", Box::new(AlwaysFold)),
        Seat::scripted("F2", Box::new(AlwaysFold)),
    ];
    let mut engine = Engine::new(&config(8), seats).unwrap();
    engine.start_hand().unwrap();
    engine.drive().unwrap();
    assert_eq!(total_chips(&engine), 4000);

    let busted = engine
        .players()
        .iter()
        .position(|p| p.stack() == 0)
        .expect("one of the all-in players lost");
    engine.start_hand().unwrap();
    let player = &engine.players()[busted];
    assert!(player.is_folded());
    assert!(player.hole_cards().is_empty());
    assert_ne!(engine.dealer(), busted);
    let dealt = engine
        .players()
        .iter()
        .filter(|p| p.hole_cards().len() == 2)
        .count();
    assert_eq!(dealt, 3);
    engine.drive().unwrap();
    assert_eq!(total_chips(&engine), 4000);
}

#[test]
fn view_hides_other_players_hole_cards() {
    let mut engine = human_vs_callers(13, 3);
    engine.start_hand().unwrap();
    let view = engine.view(Some(0));
    assert_eq!(view.players.len(), 4);
    assert_eq!(view.players[0].hole.as_ref().map(Vec::len), Some(2));
    assert!(view.players[1..].iter().all(|p| p.hole.is_none()));
    assert_eq!(view.bet_level, 20);
    assert_eq!(view.pot, 30);
    assert!(engine.view(None).players.iter().all(|p| p.hole.is_none()));
}

#[test]
fn blinds_are_recorded_before_any_decision() {
    let mut engine = human_vs_callers(17, 3);
    engine.start_hand().unwrap();
    engine.apply_human_action(Action::Fold).unwrap();
    engine.drive().unwrap();
    let record = engine.last_record().unwrap();
    let blinds: Vec<_> = record.actions.iter().take(2).collect();
    assert!(blinds.iter().all(|a| a.kind == ActionKind::Blind));
    assert_eq!(blinds[0].rationale, "Small Blind");
    assert_eq!(blinds[0].amount, 10);
    assert_eq!(blinds[1].rationale, "Big Blind");
    assert_eq!(blinds[1].amount, 20);
    assert_eq!(record.actions[2].rationale, "Player decision");
    assert_eq!(record.actions[2].kind, ActionKind::Fold);
}

#[test]
fn same_seed_replays_the_same_hand() {
    let run = |seed| {
        let seats = (0..4)
            .map(|i| Seat::scripted(format!("C{i}"), Box::new(AlwaysCall)))
            .collect();
        let mut engine = Engine::new(&config(seed), seats).unwrap();
        engine.start_hand().unwrap();
        engine.drive().unwrap();
        engine.last_record().cloned().unwrap()
    };
    let a = run(99);
    let b = run(99);
    assert_eq!(a.seats, b.seats);
    assert_eq!(a.streets, b.streets);
    assert_eq!(a.result, b.result);
    assert_ne!(a.seats, run(100).seats);
}

#[test]
fn dealer_button_moves_every_hand() {
    let seats = (0..3)
        .map(|i| Seat::scripted(format!("C{i}"), Box::new(AlwaysCall)))
        .collect();
    let mut engine = Engine::new(&config(4), seats).unwrap();
    let mut dealers = Vec::new();
    for _ in 0..4 {
        engine.start_hand().unwrap();
        dealers.push(engine.dealer());
        engine.drive().unwrap();
    }
    assert_eq!(dealers, vec![1, 2, 0, 1]);
    assert_eq!(engine.history().len(), 4);
    assert_eq!(total_chips(&engine), 3000);
}

#[test]
fn tied_showdown_goes_to_the_first_seat() {
    let seats = (0..4)
        .map(|i| Seat::scripted(format!("C{i}"), Box::new(AlwaysCall)))
        .collect();
    let mut engine = Engine::new(&config(3), seats).unwrap();
    engine.start_hand().unwrap();
    let result = match engine.drive().unwrap() {
        Progress::HandComplete(result) => result,
        other => panic!("expected showdown, got {other:?}"),
    };

    assert_eq!(result.winner, 0);
    assert_eq!(result.winner_name, "C0");
    assert_eq!(
        result.notes.as_deref(),
        Some("tie between C0, C2, C3; pot awarded to C0 by seat order")
    );
    let stacks: Vec<u32> = engine.players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![1060, 980, 980, 980]);
    assert_eq!(total_chips(&engine), 4000);
}

#[test]
fn stacks_too_large_for_the_pot_are_rejected() {
    let huge = TableConfig {
        starting_stack: 3_000_000_000,
        ..config(1)
    };
    let seats = vec![Seat::human("You"), Seat::scripted("Caller", Box::new(AlwaysCall))];
    assert!(matches!(
        Engine::new(&huge, seats),
        Err(GameError::InvalidConfig(_))
    ));

    let largest = TableConfig {
        starting_stack: u32::MAX / 2,
        ..config(1)
    };
    let seats = vec![
        Seat::scripted("Shove", Box::new(Shover)),
        Seat::scripted("Caller", Box::new(AlwaysCall)),
    ];
    let mut engine = Engine::new(&largest, seats).unwrap();
    engine.start_hand().unwrap();
    let result = match engine.drive().unwrap() {
        Progress::HandComplete(result) => result,
        other => panic!("expected showdown, got {other:?}"),
    };
    assert_eq!(result.pot, u32::MAX - 1);
    assert_eq!(total_chips(&engine), u64::from(u32::MAX - 1));
}

#[test]
fn legal_min_raises_can_trip_the_ceiling() {
    let seats = (0..4).map(|i| Seat::human(format!("H{i}"))).collect();
    let mut engine = Engine::new(&config(9), seats).unwrap();
    let mut progress = engine.start_hand().unwrap();
    for _ in 0..12 {
        let Progress::AwaitingHuman { seat } = progress else {
            panic!("expected a human turn, got {progress:?}");
        };
        let to_call = engine.bet_level() - engine.players()[seat].street_contribution();
        progress = engine.apply_human_action(Action::Raise(to_call + 1)).unwrap();
    }
    let Progress::AwaitingHuman { seat } = progress else {
        panic!("expected a human turn, got {progress:?}");
    };
    let to_call = engine.bet_level() - engine.players()[seat].street_contribution();
    let fault = EngineFault::ActionCeilingExceeded {
        street: Street::Preflop,
        ceiling: 12,
    };
    assert_eq!(
        engine.apply_human_action(Action::Raise(to_call + 1)),
        Err(GameError::Fault(fault.clone()))
    );
    assert_eq!(engine.start_hand(), Err(GameError::Fault(fault)));
    assert_eq!(total_chips(&engine), 4000);
}

#[test]
fn snapshot_of_a_missing_seat_is_none() {
    let mut engine = human_vs_callers(4, 3);
    engine.start_hand().unwrap();
    assert!(engine.snapshot(4).is_none());
    let snap = engine.snapshot(0).unwrap();
    assert_eq!(snap.seat, 0);
    assert_eq!(snap.to_call(), 20);
}
