//! Weighted Coin with Checkpointing
//!
//! This demo flips a biased coin, checkpoints the machine and resumes it.
//!
//! Key concepts:
//! - Weighted transitions sharing a (state, event) pair
//! - A probability total below 1.0 leaving some flips inert
//! - Packing to bytes and restoring with an enumeration registry
//!
//! Run with: cargo run --example weighted_coin

use flying_fsm::checkpoint::{EnumRegistry, Format, RestoreHooks};
use flying_fsm::core::Transition;
use flying_fsm::engine::Fsm;
use flying_fsm::{symbol_enum, BuildError};

symbol_enum! {
    enum Coin {
        InHand,
        Heads,
        Tails,
    }
}

fn rules() -> Result<Vec<Transition>, BuildError> {
    let mut rules = vec![
        Transition::weighted(Coin::InHand, "flip", Coin::Heads, 0.6)?,
        Transition::weighted(Coin::InHand, "flip", Coin::Tails, 0.3)?,
    ];
    rules.extend(Transition::from_any([Coin::Heads, Coin::Tails], "pick_up", Coin::InHand, 1.0)?);
    Ok(rules)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Weighted Coin ===\n");

    let mut fsm: Fsm = Fsm::new(rules()?, Coin::InHand)?;
    let (mut heads, mut tails, mut dropped) = (0, 0, 0);
    for _ in 0..1000 {
        match fsm.input("flip")?.to_enum::<Coin>() {
            Some(Coin::Heads) => heads += 1,
            Some(Coin::Tails) => tails += 1,
            _ => dropped += 1,
        }
        fsm.input("pick_up")?;
    }
    println!("heads: {heads}, tails: {tails}, coin slipped: {dropped}");

    fsm.input("flip")?;
    let bytes = fsm.pack(Format::Json)?;
    println!("\ncheckpoint ({} bytes): {}", bytes.len(), String::from_utf8_lossy(&bytes));

    let registry = EnumRegistry::new().register::<Coin>();
    let resumed: Fsm = Fsm::unpack(&bytes, Format::Json, &registry, RestoreHooks::new())?;
    println!(
        "\nresumed in {:?}, previously {:?}",
        resumed.current().to_enum::<Coin>(),
        resumed.previous().and_then(|s| s.to_enum::<Coin>())
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
