//! End-to-end behaviour of machines built from enumeration symbols.

use flying_fsm::checkpoint::{EnumRegistry, Format, RestoreHooks};
use flying_fsm::core::{Symbol, Transition, TransitionKey};
use flying_fsm::engine::{event_hook, transition_hook, Fsm, Machine, Verdict};
use flying_fsm::{symbol_enum, BuildError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

symbol_enum! {
    enum State {
        Waiting,
        Going,
    }
}

symbol_enum! {
    enum Event {
        Start,
        Stop,
        Continue,
    }
}

struct Traffic;

impl Machine for Traffic {
    type Data = ();

    fn rules() -> Result<Vec<Transition>, BuildError> {
        Ok(vec![
            Transition::new(State::Waiting, Event::Continue, State::Waiting)?,
            Transition::new(State::Waiting, Event::Start, State::Going)?,
            Transition::new(State::Going, Event::Continue, State::Going)?,
            Transition::new(State::Going, Event::Stop, State::Waiting)?,
        ])
    }

    fn initial_state() -> Symbol {
        State::Waiting.into()
    }
}

fn registry() -> EnumRegistry {
    EnumRegistry::new().register::<State>().register::<Event>()
}

fn state_of(fsm: &Fsm) -> Option<State> {
    fsm.current().to_enum::<State>()
}

fn counting(counter: &Arc<AtomicUsize>) -> flying_fsm::engine::TransitionHook<()> {
    let counter = Arc::clone(counter);
    transition_hook(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

#[test]
fn traffic_scenario_walks_through_states() {
    let mut fsm = Traffic::build().unwrap();
    assert_eq!(state_of(&fsm), Some(State::Waiting));
    assert_eq!(fsm.previous(), None);
    assert_eq!(fsm.next(), None);

    fsm.input(Event::Start).unwrap();
    assert_eq!(state_of(&fsm), Some(State::Going));
    assert_eq!(fsm.previous(), Some(&Symbol::from(State::Waiting)));

    fsm.input(Event::Stop).unwrap();
    assert_eq!(state_of(&fsm), Some(State::Waiting));
    assert_eq!(fsm.previous(), Some(&Symbol::from(State::Going)));

    let fired = Arc::new(AtomicUsize::new(0));
    fsm.add_transition_hook(
        &TransitionKey::new(State::Waiting, Event::Continue, State::Waiting),
        counting(&fired),
    )
    .unwrap();
    fsm.input(Event::Continue).unwrap();
    assert_eq!(state_of(&fsm), Some(State::Waiting));
    assert_eq!(fsm.previous(), Some(&Symbol::from(State::Waiting)));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn two_even_branches_both_occur_over_ten_trials() {
    let rules: Vec<Transition> = Transition::to_any("coin", "flip", ["heads", "tails"], 1.0)
        .unwrap()
        .into_iter()
        .chain(Transition::from_any(["heads", "tails"], "reset", "coin", 1.0).unwrap())
        .collect();

    // A single batch misses an outcome with probability 2/1024.
    let mut both_seen = false;
    for _ in 0..5 {
        let mut fsm = Fsm::new(rules.clone(), "coin").unwrap();
        let (mut heads, mut tails) = (0, 0);
        for _ in 0..10 {
            match fsm.input("flip").unwrap().to_string().as_str() {
                "heads" => heads += 1,
                "tails" => tails += 1,
                other => panic!("unexpected outcome {other}"),
            }
            fsm.input("reset").unwrap();
        }
        assert_eq!(heads + tails, 10);
        if heads > 0 && tails > 0 {
            both_seen = true;
            break;
        }
    }
    assert!(both_seen);
}

#[test]
fn uniform_branching_approximates_expected_frequencies() {
    let faces = ["one", "two", "three", "four", "five", "six"];
    let rules: Vec<Transition> = Transition::to_any("hand", "roll", faces, 1.0)
        .unwrap()
        .into_iter()
        .chain(Transition::from_any(faces, "pick_up", "hand", 1.0).unwrap())
        .collect();
    let mut fsm = Fsm::new(rules, "hand").unwrap();

    let trials = 6000;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..trials {
        let face = fsm.input("roll").unwrap();
        *counts.entry(face.to_string()).or_default() += 1;
        fsm.input("pick_up").unwrap();
    }

    assert_eq!(counts.values().sum::<usize>(), trials);
    for face in faces {
        let frequency = counts.get(face).copied().unwrap_or(0) as f64 / trials as f64;
        assert!(
            (frequency - 1.0 / 6.0).abs() < 0.04,
            "{face} landed with frequency {frequency}"
        );
    }
}

#[test]
fn veto_prevents_mutation_and_transition_hooks() {
    let mut fsm = Traffic::build().unwrap();
    let fired = Arc::new(AtomicUsize::new(0));
    fsm.add_transition_hook(
        &TransitionKey::new(State::Waiting, Event::Start, State::Going),
        counting(&fired),
    )
    .unwrap();

    let veto = event_hook(|_, _, _| Ok(Verdict::from(false)));
    fsm.add_event_hook(Event::Start, Arc::clone(&veto));

    let before = fsm.current().clone();
    assert_eq!(fsm.input(Event::Start).unwrap(), before);
    assert_eq!(fsm.current(), &before);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    fsm.remove_event_hook(Event::Start, &veto);
    fsm.input(Event::Start).unwrap();
    assert_eq!(state_of(&fsm), Some(State::Going));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn hooks_fire_in_order_around_the_commit() {
    let mut fsm = Traffic::build().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));

    let event_log = Arc::clone(&log);
    fsm.add_event_hook(
        Event::Start,
        event_hook(move |event, machine, _| {
            event_log.lock().unwrap().push(format!(
                "event {event} at {} heading {}",
                machine.current(),
                machine.next().map(ToString::to_string).unwrap_or_default()
            ));
            Ok(Verdict::Proceed)
        }),
    );
    let transition_log = Arc::clone(&log);
    fsm.add_transition_hook(
        &TransitionKey::new(State::Waiting, Event::Start, State::Going),
        transition_hook(move |tn, _| {
            transition_log
                .lock()
                .unwrap()
                .push(format!("transition into {}", tn.to_state()));
            Ok(())
        }),
    )
    .unwrap();

    fsm.input(Event::Start).unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "event Event(0) at State(0) heading State(1)".to_string(),
            "transition into State(1)".to_string(),
        ]
    );
}

#[test]
fn hooks_on_foreign_rules_are_refused() {
    let mut fsm = Traffic::build().unwrap();
    let fired = Arc::new(AtomicUsize::new(0));
    let result = fsm.add_transition_hook(
        &TransitionKey::new(State::Going, Event::Start, State::Waiting),
        counting(&fired),
    );
    assert!(result.is_err());
}

#[test]
fn construction_failures_are_reported() {
    assert_eq!(
        Fsm::<()>::new(Vec::new(), State::Waiting).unwrap_err(),
        BuildError::NoTransitions
    );

    let overflow = Fsm::<()>::new(
        vec![
            Transition::weighted(State::Waiting, Event::Start, State::Going, 0.75).unwrap(),
            Transition::weighted(State::Waiting, Event::Start, State::Waiting, 0.5).unwrap(),
        ],
        State::Waiting,
    );
    assert!(matches!(overflow, Err(BuildError::ProbabilityOverflow { .. })));

    let bad_initial = Fsm::<()>::new(Traffic::rules().unwrap(), "");
    assert!(matches!(bad_initial, Err(BuildError::InvalidSymbol { .. })));
}

fn scattering() -> Fsm {
    let lanes: Vec<String> = (1..=9).map(|lane| format!("lane{lane}")).collect();
    let mut rules = Traffic::rules().unwrap();
    rules.extend(Transition::to_any(State::Going, "scatter", lanes, 1.0).unwrap());
    Fsm::new(rules, State::Waiting).unwrap()
}

#[test]
fn pack_and_unpack_preserve_runtime_state() {
    for format in [Format::Json, Format::Bincode] {
        let mut fsm = scattering();
        fsm.input(Event::Start).unwrap();

        let bytes = fsm.pack(format).unwrap();
        let restored: Fsm =
            Fsm::unpack(&bytes, format, &registry(), RestoreHooks::new()).unwrap();

        assert_eq!(restored.initial_state(), fsm.initial_state());
        assert_eq!(restored.current(), fsm.current());
        assert_eq!(restored.previous(), fsm.previous());
        assert_eq!(restored.next(), fsm.next());
        assert_eq!(restored.rules(), fsm.rules());
        let probabilities = |machine: &Fsm| -> Vec<u64> {
            machine
                .rules()
                .iter()
                .map(|rule| rule.probability().to_bits())
                .collect()
        };
        assert_eq!(probabilities(&restored), probabilities(&fsm));
        assert_eq!(restored.current().to_enum::<State>(), Some(State::Going));
    }
}

#[test]
fn pending_destination_survives_a_pack_taken_mid_event() {
    let mut fsm = Traffic::build().unwrap();
    let packed: Arc<Mutex<Option<Vec<u8>>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&packed);
    fsm.add_event_hook(
        Event::Start,
        event_hook(move |_, machine, _| {
            *sink.lock().unwrap() = Some(machine.pack(Format::Json)?);
            Ok(Verdict::Proceed)
        }),
    );

    fsm.input(Event::Start).unwrap();
    assert_eq!(fsm.next(), None);

    let bytes = packed.lock().unwrap().take().unwrap();
    let restored: Fsm =
        Fsm::unpack(&bytes, Format::Json, &registry(), RestoreHooks::new()).unwrap();
    assert_eq!(restored.current().to_enum::<State>(), Some(State::Waiting));
    assert_eq!(restored.next().and_then(Symbol::to_enum::<State>), Some(State::Going));
}

#[test]
fn hooks_must_be_reattached_after_decode() {
    let mut fsm = Traffic::build().unwrap();
    let fired = Arc::new(AtomicUsize::new(0));
    let key = TransitionKey::new(State::Waiting, Event::Start, State::Going);
    fsm.add_transition_hook(&key, counting(&fired)).unwrap();
    let bytes = fsm.pack(Format::Json).unwrap();

    let mut bare: Fsm =
        Fsm::unpack(&bytes, Format::Json, &registry(), RestoreHooks::new()).unwrap();
    bare.input(Event::Start).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    let vetoes = Arc::new(AtomicUsize::new(0));
    let veto_counter = Arc::clone(&vetoes);
    let mut transition_hooks = HashMap::new();
    transition_hooks.insert(key.clone(), vec![counting(&fired)]);
    let hooks = RestoreHooks::new()
        .with_transition_map(transition_hooks)
        .on_event(
            Event::Stop,
            event_hook(move |_, _, _| {
                veto_counter.fetch_add(1, Ordering::SeqCst);
                Ok(Verdict::Cancel)
            }),
        );
    let mut rehooked: Fsm = Fsm::unpack(&bytes, Format::Json, &registry(), hooks).unwrap();

    rehooked.input(Event::Start).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    rehooked.input(Event::Stop).unwrap();
    assert_eq!(vetoes.load(Ordering::SeqCst), 1);
    assert_eq!(rehooked.current().to_enum::<State>(), Some(State::Going));
}

#[test]
fn restore_rebuilds_the_concrete_machine() {
    let mut fsm = Traffic::build().unwrap();
    fsm.input(Event::Start).unwrap();
    fsm.input(Event::Stop).unwrap();
    let bytes = fsm.pack(Format::Bincode).unwrap();

    let mut restored: Fsm =
        Fsm::restore::<Traffic>(&bytes, Format::Bincode, &registry(), RestoreHooks::new())
            .unwrap();

    assert_eq!(restored.current().to_enum::<State>(), Some(State::Waiting));
    assert_eq!(
        restored.previous().and_then(Symbol::to_enum::<State>),
        Some(State::Going)
    );
    restored.input(Event::Start).unwrap();
    assert_eq!(restored.current().to_enum::<State>(), Some(State::Going));
}

#[test]
fn decode_without_registry_entries_fails() {
    let bytes = Traffic::build().unwrap().pack(Format::Json).unwrap();
    let result = Fsm::<()>::unpack(
        &bytes,
        Format::Json,
        &EnumRegistry::new().register::<Event>(),
        RestoreHooks::new(),
    );
    assert!(result.is_err());
}
