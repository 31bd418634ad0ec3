use core::error::Error;
use core::fmt;

/// The error returned by the fallible positional operations
/// (`try_insert`, `try_remove`, `try_set`).
///
/// Carries the rejected position and the container length at the time of
/// the call. The container is unchanged when this error is returned.
///
/// # Examples
///
/// ```
/// use treap_array::TreapArray;
///
/// let mut array = TreapArray::from([1, 2, 3]);
/// let error = array.try_remove(7).unwrap_err();
/// assert_eq!(error.index, 7);
/// assert_eq!(error.len, 3);
/// assert_eq!(array.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexOutOfBounds {
    /// The rejected position.
    pub index: usize,
    /// The container length at the time of the call.
    pub len: usize,
}

impl fmt::Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of bounds in container of length {}", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_names_index_and_len() {
        let error = IndexOutOfBounds { index: 9, len: 4 };
        assert_eq!(error.to_string(), "index 9 out of bounds in container of length 4");
    }
}
