//! This crate assigns every member of a small roster exactly one other
//! member as their gift recipient, subject to two hard constraints: nobody
//! is assigned to themselves, and nobody is assigned the same recipient they
//! had in the previous round.
//!
//! Formally, given a [roster] of N identifiers and, for each identifier, a
//! set of forbidden targets, the task is to find a bijection from givers to
//! receivers that avoids every forbidden pair — a derangement of the roster,
//! generalized with the extra forbidden pairs contributed by the prior
//! round. The [`Assigner`] finds one such bijection with a depth-first
//! backtracking search over roster positions, or proves that none exists.
//! Before a position's candidates are tried they are shuffled, so which of
//! the possibly many valid assignments is produced varies from run to run;
//! the random source is injectable, and a seeded generator makes the result
//! reproducible. The search is satisficing: the first complete assignment
//! wins, and infeasibility is reported only after every branch has been
//! exhausted. Infeasibility depends only on the constraint sets, never on
//! the shuffle order.
//!
//! Around that core, the [`table`] module reads rosters and prior-round
//! results from CSV tables and writes the resulting pairings back out, and
//! the `secret-santa` binary wires the two together behind a pair of file
//! prompts. Input parsing is deliberately forgiving (bad tables degrade to
//! empty record sets with a warning), while an infeasible assignment is
//! always a hard, explicit error: a silently partial gift exchange would be
//! worse than a visible failure.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use secret_santa::{Assigner, PriorRound, Roster};
//!
//! let roster: Roster = [
//!     ("Ada Lovelace", "ada@example.com"),
//!     ("Grace Hopper", "grace@example.com"),
//!     ("Edsger Dijkstra", "edsger@example.com"),
//! ]
//! .into_iter()
//! .collect();
//! let mut prior = PriorRound::new();
//! prior.insert("ada@example.com", "grace@example.com");
//!
//! let assigner = Assigner::with_rng(&roster, &prior, StdRng::seed_from_u64(7));
//! let assignment = assigner.solve()?;
//! // With Ada -> Grace forbidden, the only valid assignment is the cycle
//! // Ada -> Edsger -> Grace -> Ada.
//! assert_eq!(
//!     assignment.receiver_of("ada@example.com").unwrap().email,
//!     "edsger@example.com"
//! );
//! # Ok::<(), secret_santa::AssignError>(())
//! ```
//!
//! [roster]: `Roster`

mod assignment;
mod error;
mod indices;
mod roster;
mod solver;
pub mod table;

pub use assignment::{Assignment, Pairing};
pub use error::{AssignError, TableError};
pub use indices::MemberIndex;
pub use roster::{Member, PriorRound, Roster};
pub use solver::Assigner;
