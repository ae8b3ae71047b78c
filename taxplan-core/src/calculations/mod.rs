//! Bracket and capital gains calculations over the tax tables.
//!
//! Every calculation is a pure function of its inputs and an immutable
//! rate schedule, so results can be computed from any thread.

pub mod bracket_resolver;
pub mod common;
pub mod ltcg_split;
pub mod roth_room;

pub use bracket_resolver::{BracketResolver, resolve_bracket};
pub use ltcg_split::{split_ltcg, stack_ltcg};
pub use roth_room::{RothRoomCalculator, compute_roth_room};
