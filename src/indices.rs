/// The position of a member in the sequential table of a [`Roster`].
///
/// Roster order is significant: it is both the order in which the search
/// commits givers and the order of the rows in the output table, so member
/// positions are passed around instead of identifier strings wherever the
/// solver needs to refer to a participant.
///
/// [`Roster`]: `crate::Roster`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub struct MemberIndex(usize);

impl MemberIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}
