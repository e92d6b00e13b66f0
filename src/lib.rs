//! Flying FSM: a declarative finite state machine with weighted transitions
//!
//! A machine is a fixed set of rules, each moving an origin state to a
//! destination on an event with some probability. When several rules share an
//! (origin, event) pair, one is drawn at random by weight. Event hooks may veto
//! an event before it commits; transition hooks observe a rule after it has
//! committed. Machines can be packed to bytes and restored later.
//!
//! # Core Concepts
//!
//! - **Symbol**: State and event identifiers, plain strings or enum variants
//! - **Transition**: A weighted rule whose identity is its (from, event, to) triple
//! - **Fsm**: The engine resolving events against an immutable rule index
//! - **Checkpoint**: Tagged serialization that rebuilds enum identifiers
//!
//! # Example
//!
//! ```rust
//! use flying_fsm::core::Transition;
//! use flying_fsm::engine::{event_hook, Fsm, Verdict};
//! use flying_fsm::symbol_enum;
//!
//! symbol_enum! {
//!     enum State { Waiting, Going }
//! }
//!
//! symbol_enum! {
//!     enum Event { Start, Stop, Continue }
//! }
//!
//! let mut fsm: Fsm = Fsm::new(
//!     vec![
//!         Transition::new(State::Waiting, Event::Continue, State::Waiting).unwrap(),
//!         Transition::new(State::Waiting, Event::Start, State::Going).unwrap(),
//!         Transition::new(State::Going, Event::Continue, State::Going).unwrap(),
//!         Transition::new(State::Going, Event::Stop, State::Waiting).unwrap(),
//!     ],
//!     State::Waiting,
//! )
//! .unwrap();
//!
//! fsm.input(Event::Start).unwrap();
//! assert_eq!(fsm.current().to_enum::<State>(), Some(State::Going));
//!
//! fsm.add_event_hook(Event::Stop, event_hook(|_, _, _| Ok(Verdict::Cancel)));
//! fsm.input(Event::Stop).unwrap();
//! assert_eq!(fsm.current().to_enum::<State>(), Some(State::Going));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, FsmBuilder, TransitionBuilder};
pub use crate::checkpoint::{CheckpointError, EnumRegistry, Format, RestoreHooks};
pub use crate::core::{Enumeration, RawValue, Symbol, Transition, TransitionKey};
pub use crate::engine::{event_hook, transition_hook, Fsm, FsmError, Machine, Verdict};
