//! Immutable point-in-time copies of a gauge's values.

use std::ops::Deref;
use std::sync::Arc;

/// Values retained by a [`ListGauge`](crate::gauge::ListGauge) at one instant,
/// oldest first.
///
/// The values are copied out of the gauge when the snapshot is taken, so later
/// `add` calls or evictions are never visible through it. Cloning a snapshot is
/// cheap (two reference-count bumps).
///
/// # Example
///
/// ```
/// use listgauge::gauge::ListGauge;
///
/// let gauge = ListGauge::with_defaults("errors");
/// gauge.add("disk full");
///
/// let before = gauge.snapshot();
/// gauge.add("timeout");
/// let after = gauge.snapshot();
///
/// assert_eq!(before.as_slice(), &["disk full"]);
/// assert_eq!(after.as_slice(), &["disk full", "timeout"]);
/// assert_eq!(after.name(), "errors");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGaugeSnapshot<T> {
    name: Arc<str>,
    values: Arc<[T]>,
    taken_at_ms: u64,
}

impl<T> ListGaugeSnapshot<T> {
    pub(crate) fn new(name: Arc<str>, values: Arc<[T]>, taken_at_ms: u64) -> Self {
        Self {
            name,
            values,
            taken_at_ms,
        }
    }

    /// Name of the gauge this snapshot was taken from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clock reading (milliseconds) used for the eviction pass before copying.
    #[inline]
    pub fn taken_at_ms(&self) -> u64 {
        self.taken_at_ms
    }

    /// Values, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Copies the values into an owned `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.to_vec()
    }
}

impl<T> Deref for ListGaugeSnapshot<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<'a, T> IntoIterator for &'a ListGaugeSnapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_of(values: Vec<u32>) -> ListGaugeSnapshot<u32> {
        ListGaugeSnapshot::new(Arc::from("g"), Arc::from(values), 99)
    }

    #[test]
    fn exposes_values_as_slice() {
        let snap = snapshot_of(vec![1, 2, 3]);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap[0], 1);
        assert_eq!(snap.as_slice(), &[1, 2, 3]);
        assert_eq!(snap.to_vec(), vec![1, 2, 3]);
        assert_eq!(snap.taken_at_ms(), 99);
    }

    #[test]
    fn iterates_oldest_first() {
        let snap = snapshot_of(vec![5, 6]);
        let collected: Vec<u32> = (&snap).into_iter().copied().collect();
        assert_eq!(collected, vec![5, 6]);
    }

    #[test]
    fn clones_share_storage() {
        let snap = snapshot_of(vec![1]);
        let copy = snap.clone();
        assert!(Arc::ptr_eq(&snap.values, &copy.values));
        assert_eq!(snap, copy);
    }
}
