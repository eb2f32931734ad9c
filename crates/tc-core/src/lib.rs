//! # tc-core — Completion core for tmux-complete
//!
//! Everything here is pure: no terminal, no tmux, no files. The binary hands
//! in printable pane lines and a cursor, and gets back a candidate list it
//! can paint and steer.
//!
//! - **[`geometry`]** — logical ↔ wrapped screen coordinates
//! - **[`identifier`]** — the token ending at the cursor
//! - **[`candidate`]** — pattern scan over all lines, nested trimmed units
//! - **[`unique`]** — order-preserving dedup on `(value, parent)`
//! - **[`select`]** — initial selection by reading-order proximity
//! - **[`navigate`]** — directional selection moves
//! - **[`session`]** — the façade wiring the above into one interactive run

pub mod candidate;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod navigate;
pub mod select;
pub mod session;
pub mod unique;

pub use candidate::{Candidate, TrimRule, TrimSide};
pub use error::{Error, PatternKind, Result};
pub use geometry::Position;
pub use identifier::Identifier;
pub use navigate::Direction;
pub use session::{CompletionConfig, Outcome, Session};
