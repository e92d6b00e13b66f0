//! Traffic Light State Machine
//!
//! This demo drives a cyclic machine with a pedestrian override.
//!
//! Key concepts:
//! - Enumeration states and events via `symbol_enum!`
//! - Event hooks vetoing a transition
//! - Transition hooks observing committed changes
//!
//! Run with: cargo run --example traffic_light

use flying_fsm::core::{Transition, TransitionKey};
use flying_fsm::engine::{event_hook, transition_hook, Verdict};
use flying_fsm::{symbol_enum, FsmBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

symbol_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

symbol_enum! {
    enum Signal {
        Tick,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let crossing = Arc::new(AtomicBool::new(false));
    let guard = Arc::clone(&crossing);

    let mut machine = FsmBuilder::<()>::new()
        .initial(TrafficLight::Red)
        .add_transition(
            Transition::new(TrafficLight::Red, Signal::Tick, TrafficLight::Green).unwrap(),
        )
        .add_transition(
            Transition::new(TrafficLight::Green, Signal::Tick, TrafficLight::Yellow).unwrap(),
        )
        .add_transition(
            Transition::new(TrafficLight::Yellow, Signal::Tick, TrafficLight::Red).unwrap(),
        )
        .event_hook(
            Signal::Tick,
            event_hook(move |_, machine, _| {
                // Hold red while a pedestrian is crossing.
                let holding = guard.load(Ordering::SeqCst)
                    && machine.current().to_enum::<TrafficLight>() == Some(TrafficLight::Red);
                Ok(Verdict::from(!holding))
            }),
        )
        .build()
        .unwrap();

    machine
        .add_transition_hook(
            &TransitionKey::new(TrafficLight::Yellow, Signal::Tick, TrafficLight::Red),
            transition_hook(|_, _| {
                println!("  (cycle complete)");
                Ok(())
            }),
        )
        .unwrap();

    for step in 0..7 {
        if step == 3 {
            println!("  pedestrian presses the button");
            crossing.store(true, Ordering::SeqCst);
        }
        if step == 5 {
            println!("  pedestrian has crossed");
            crossing.store(false, Ordering::SeqCst);
        }
        let state = machine.input(Signal::Tick).unwrap();
        println!(
            "tick {step}: {:?}",
            state.to_enum::<TrafficLight>().unwrap_or(TrafficLight::Red)
        );
    }

    println!("\n=== Demo Complete ===");
}
