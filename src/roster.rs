use std::collections::HashMap;

use crate::indices::MemberIndex;

/// A participant in the current round of the gift exchange.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Member {
    /// The display name shown in the output table, e.g. `Jane Smith`.
    pub name: String,
    /// The unique identifier of this participant, e.g. an email address.
    ///
    /// Identifiers are opaque to this crate: they are compared byte for
    /// byte, with no case folding or whitespace trimming.
    pub email: String,
}

/// The ordered set of participants for the current round.
///
/// The order of a roster is significant: the search commits givers in roster
/// order, and the output table has one row per member in that same order.
///
/// # Invariant
///
/// No two members share an identifier. [`Self::insert`] maintains this by
/// treating a repeated identifier as an update of the existing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    /// The members, in insertion order.
    members: Vec<Member>,
    /// The position of each member in `members`, keyed by identifier.
    index: HashMap<String, MemberIndex>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant and returns their position in the roster.
    ///
    /// If a member with the same identifier is already present, their display
    /// name is replaced but they keep their original position; the roster
    /// never holds two members with one identifier.
    pub fn insert(&mut self, name: impl Into<String>, email: impl Into<String>) -> MemberIndex {
        let name = name.into();
        let email = email.into();
        if let Some(&ix) = self.index.get(&email) {
            self.members[ix.get()].name = name;
            return ix;
        }
        let ix = MemberIndex::new(self.members.len());
        self.index.insert(email.clone(), ix);
        self.members.push(Member { name, email });
        ix
    }

    /// Returns the number of members in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the roster has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns a reference to the member at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    #[must_use]
    pub fn member(&self, ix: MemberIndex) -> &Member {
        &self.members[ix.get()]
    }

    /// Returns the position of the member with the given identifier, if any.
    #[must_use]
    pub fn position(&self, email: &str) -> Option<MemberIndex> {
        self.index.get(email).copied()
    }

    /// Returns the members in roster order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

impl<N: Into<String>, E: Into<String>> FromIterator<(N, E)> for Roster {
    fn from_iter<T: IntoIterator<Item = (N, E)>>(iter: T) -> Self {
        let mut roster = Self::new();
        for (name, email) in iter {
            roster.insert(name, email);
        }
        roster
    }
}

/// Who each giver was assigned in the previous round.
///
/// This is a read-only constraint source for the search: a giver may not be
/// assigned the same receiver two rounds in a row. The map may be partial,
/// and it is not required to be a valid permutation itself; entries whose
/// receiver is not on the current roster impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriorRound {
    recipients: HashMap<String, String>,
}

impl PriorRound {
    /// Creates an empty prior round, which constrains nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `giver` was assigned `receiver` in the previous round.
    pub fn insert(&mut self, giver: impl Into<String>, receiver: impl Into<String>) {
        self.recipients.insert(giver.into(), receiver.into());
    }

    /// Returns the identifier of the receiver that `giver` was assigned in
    /// the previous round, if known.
    #[must_use]
    pub fn recipient_of(&self, giver: &str) -> Option<&str> {
        self.recipients.get(giver).map(String::as_str)
    }

    /// Returns the number of recorded prior assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Returns whether no prior assignments are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
