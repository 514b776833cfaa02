//! Battle resolution.
//!
//! The engine is a pure function over two monster snapshots: it never looks
//! anything up, never fails and never writes back to the store.

pub mod battle_engine;

pub use battle_engine::{damage, first_attacker, resolve, simulate, BattleOutcome, Combatant, Side};
