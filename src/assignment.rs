use crate::indices::MemberIndex;
use crate::roster::{Member, Roster};

/// One row of the result: a giver and the receiver selected for them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Pairing<'r> {
    /// The member selecting a gift.
    pub giver: &'r Member,
    /// The member receiving it.
    pub receiver: &'r Member,
}

/// A completed assignment of one receiver to every giver on the roster.
///
/// Values of this type are produced only by a successful [search]; a failed
/// search yields an error instead, so a partial assignment is never exposed.
///
/// # Invariants
///
/// - `receivers` has exactly one entry per roster member, indexed by giver
///   position.
/// - Viewed as a function from givers to receivers, the assignment is a
///   permutation of the roster: every member occurs exactly once on each
///   side.
///
/// [search]: `crate::Assigner::solve`
#[derive(Debug)]
pub struct Assignment<'r> {
    /// The roster the assignment was computed over.
    roster: &'r Roster,
    /// The receiver committed for the giver at each roster position.
    receivers: Vec<MemberIndex>,
}

impl<'r> Assignment<'r> {
    /// Creates an assignment over the given roster.
    ///
    /// # Panics
    ///
    /// This function panics unless there is exactly one receiver per
    /// roster member.
    pub(crate) fn new(roster: &'r Roster, receivers: Vec<MemberIndex>) -> Self {
        assert_eq!(
            receivers.len(),
            roster.len(),
            "assignment must cover the entire roster"
        );
        Self { roster, receivers }
    }

    /// Returns the position of the receiver assigned to the giver at the
    /// given roster position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    #[must_use]
    pub fn receiver(&self, giver: MemberIndex) -> MemberIndex {
        self.receivers[giver.get()]
    }

    /// Returns the member assigned to the giver with the given identifier,
    /// or [`None`] if no such giver is on the roster.
    #[must_use]
    pub fn receiver_of(&self, giver: &str) -> Option<&'r Member> {
        let ix = self.roster.position(giver)?;
        Some(self.roster.member(self.receiver(ix)))
    }

    /// Returns the number of pairings, which always equals the roster size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    /// Returns whether the assignment is empty. This can happen only for an
    /// empty roster, which in fact the search always rejects as infeasible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Returns the pairings in roster order, one per giver.
    ///
    /// This is a pure view of the committed search result; it involves no
    /// randomness, and it cannot fail because the assignment is total by
    /// construction.
    pub fn pairings(&self) -> impl Iterator<Item = Pairing<'r>> + '_ {
        self.receivers
            .iter()
            .enumerate()
            .map(|(giver_ix, &receiver_ix)| Pairing {
                giver: self.roster.member(MemberIndex::new(giver_ix)),
                receiver: self.roster.member(receiver_ix),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        [("Ada", "ada@x"), ("Grace", "grace@x"), ("Edsger", "edsger@x")]
            .into_iter()
            .collect()
    }

    #[test]
    fn pairings_follow_roster_order() {
        let roster = sample_roster();
        // A cyclic shift: Ada -> Grace -> Edsger -> Ada.
        let receivers = vec![
            MemberIndex::new(1),
            MemberIndex::new(2),
            MemberIndex::new(0),
        ];
        let assignment = Assignment::new(&roster, receivers);
        let rows: Vec<_> = assignment
            .pairings()
            .map(|p| (p.giver.name.as_str(), p.receiver.name.as_str()))
            .collect();
        assert_eq!(
            rows,
            [("Ada", "Grace"), ("Grace", "Edsger"), ("Edsger", "Ada")]
        );
    }

    #[test]
    fn receiver_lookup_by_identifier() {
        let roster = sample_roster();
        let receivers = vec![
            MemberIndex::new(2),
            MemberIndex::new(0),
            MemberIndex::new(1),
        ];
        let assignment = Assignment::new(&roster, receivers);
        assert_eq!(assignment.receiver_of("ada@x").unwrap().email, "edsger@x");
        assert!(assignment.receiver_of("unknown@x").is_none());
    }

    #[test]
    #[should_panic]
    fn partial_assignment_is_rejected() {
        let roster = sample_roster();
        let _ = Assignment::new(&roster, vec![MemberIndex::new(1)]);
    }
}
