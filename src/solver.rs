use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assignment::Assignment;
use crate::error::AssignError;
use crate::indices::MemberIndex;
use crate::roster::{PriorRound, Roster};

/// One level of the depth-first search: the candidate receivers still worth
/// trying for the giver at this roster position.
///
/// The candidates are shuffled once, when the frame is created, and then
/// consumed left to right. The shuffle decides only which of the possibly
/// many valid assignments is found; it has no bearing on whether one exists.
struct Frame {
    /// The eligible receivers not yet consumed by an earlier position,
    /// in random order.
    choices: Vec<MemberIndex>,
    /// The number of candidates already tried.
    cursor: usize,
}

impl Frame {
    /// Returns the next candidate to try, if any remains.
    fn next(&mut self) -> Option<MemberIndex> {
        let choice = self.choices.get(self.cursor).copied();
        self.cursor += 1;
        choice
    }
}

/// Finds a total assignment of one receiver to every giver on a roster,
/// such that the assignment is a bijection, nobody is assigned to
/// themselves, and nobody repeats their prior-round receiver.
///
/// The search proceeds position by position in roster order, committing one
/// receiver per giver and backtracking when a position runs out of eligible
/// receivers. The first complete assignment found is returned; the search is
/// satisficing, not exhaustive. If instead the first position exhausts all
/// of its candidates, no valid assignment exists for the given inputs and
/// the search reports [`AssignError::Infeasible`].
///
/// The random source is a constructor argument so that callers can make the
/// outcome reproducible; see [`Self::with_rng`].
///
/// # Example
///
/// Assign receivers to four participants, forbidding last round's pairs:
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use secret_santa::{Assigner, PriorRound, Roster};
///
/// let roster: Roster = [
///     ("Ada Lovelace", "ada@example.com"),
///     ("Grace Hopper", "grace@example.com"),
///     ("Edsger Dijkstra", "edsger@example.com"),
///     ("Barbara Liskov", "barbara@example.com"),
/// ]
/// .into_iter()
/// .collect();
/// let mut prior = PriorRound::new();
/// prior.insert("ada@example.com", "grace@example.com");
/// prior.insert("grace@example.com", "ada@example.com");
///
/// let assigner = Assigner::with_rng(&roster, &prior, StdRng::seed_from_u64(2024));
/// let assignment = assigner.solve()?;
/// for pairing in assignment.pairings() {
///     assert_ne!(pairing.giver.email, pairing.receiver.email);
/// }
/// assert_ne!(
///     assignment.receiver_of("ada@example.com").unwrap().email,
///     "grace@example.com"
/// );
/// # Ok::<(), secret_santa::AssignError>(())
/// ```
pub struct Assigner<'r, R> {
    /// The participants, in search and output order.
    roster: &'r Roster,
    /// The eligible receivers for the giver at each roster position:
    /// everyone except the giver themselves and their prior-round receiver.
    /// Computed once at construction time and fixed for the whole search.
    candidates: Vec<Vec<MemberIndex>>,
    /// The source of candidate-order randomness.
    rng: R,
}

impl<'r> Assigner<'r, ThreadRng> {
    /// Creates an assigner that draws candidate orderings from the
    /// thread-local generator.
    #[must_use]
    pub fn new(roster: &'r Roster, prior: &PriorRound) -> Self {
        Self::with_rng(roster, prior, rand::thread_rng())
    }
}

impl<'r, R: Rng> Assigner<'r, R> {
    // Setup routines.

    /// Creates an assigner that draws candidate orderings from the given
    /// generator.
    ///
    /// Passing a seeded generator (such as `StdRng::seed_from_u64`) makes
    /// the search deterministic, which is how the tests in this crate pin
    /// down exact outcomes.
    #[must_use]
    pub fn with_rng(roster: &'r Roster, prior: &PriorRound, rng: R) -> Self {
        let candidates = roster
            .members()
            .iter()
            .enumerate()
            .map(|(giver_ix, giver)| {
                // A prior receiver who has since left the roster imposes
                // no constraint.
                let prior_ix = prior
                    .recipient_of(&giver.email)
                    .and_then(|email| roster.position(email));
                (0..roster.len())
                    .map(MemberIndex::new)
                    .filter(|&receiver| receiver.get() != giver_ix && Some(receiver) != prior_ix)
                    .collect()
            })
            .collect();
        Self {
            roster,
            candidates,
            rng,
        }
    }

    /// Builds the search frame for the giver at the given roster position:
    /// their eligible receivers minus those already consumed, shuffled.
    fn frame(&mut self, giver: usize, used: &[bool]) -> Frame {
        let mut choices: Vec<MemberIndex> = self.candidates[giver]
            .iter()
            .copied()
            .filter(|receiver| !used[receiver.get()])
            .collect();
        choices.shuffle(&mut self.rng);
        Frame { choices, cursor: 0 }
    }

    // Search routines.

    /// Runs the backtracking search to completion.
    ///
    /// Returns the first complete assignment found, or
    /// [`AssignError::Infeasible`] once every branch has been exhausted.
    /// Infeasibility depends only on the candidate sets, so re-running an
    /// infeasible instance with another generator also fails.
    ///
    /// The search state lives in an explicit stack of [`Frame`]s rather than
    /// on the call stack, so roster size never threatens recursion depth.
    /// The worst case visits exponentially many branches, but eligible sets
    /// have at least `N - 2` members each, so in practice dead ends occur
    /// only near the last few positions and the search runs in near-linear
    /// time for rosters in the tens to low hundreds.
    pub fn solve(mut self) -> Result<Assignment<'r>, AssignError> {
        let n = self.roster.len();
        if n == 0 {
            // There is no position 0 to build a frame for.
            return Err(AssignError::Infeasible);
        }
        // The receiver committed at each position `< frames.len() - 1`.
        let mut receivers: Vec<Option<MemberIndex>> = vec![None; n];
        // Whether each member is already some earlier giver's receiver.
        // Mirrors the committed entries of `receivers`.
        let mut used = vec![false; n];
        let mut frames = Vec::with_capacity(n);
        frames.push(self.frame(0, &used));
        loop {
            let depth = frames.len() - 1;
            match frames[depth].next() {
                Some(receiver) => {
                    // Tentatively commit this receiver and descend.
                    receivers[depth] = Some(receiver);
                    used[receiver.get()] = true;
                    if depth + 1 == n {
                        // All givers are committed; the first complete
                        // assignment wins.
                        let receivers = receivers
                            .into_iter()
                            .map(|r| r.expect("complete solution commits every position"))
                            .collect();
                        return Ok(Assignment::new(self.roster, receivers));
                    }
                    let frame = self.frame(depth + 1, &used);
                    frames.push(frame);
                }
                None => {
                    // This giver's candidates are exhausted. Drop the frame
                    // and undo the parent's tentative commit, so the parent
                    // can try its next candidate.
                    frames.pop();
                    let Some(parent) = frames.len().checked_sub(1) else {
                        // Position 0 itself ran dry: no branch remains.
                        return Err(AssignError::Infeasible);
                    };
                    let receiver = receivers[parent]
                        .take()
                        .expect("a frame commits a receiver before descending");
                    used[receiver.get()] = false;
                }
            }
        }
    }
}
