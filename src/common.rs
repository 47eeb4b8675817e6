/// Outcome of a command that may be ignored.
///
/// A nudge that would leave the servo's range is not an error; it leaves the angle as it was.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update<T> {
    Unchanged(T),
    Updated(T),
}

impl<T> Update<T> {
    pub fn value(&self) -> &T {
        match self {
            Update::Unchanged(data) => data,
            Update::Updated(data) => data,
        }
    }

    pub fn updated(&self) -> Option<&T> {
        match self {
            Update::Unchanged(_) => None,
            Update::Updated(data) => Some(data),
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, Update::Updated(_))
    }
}
