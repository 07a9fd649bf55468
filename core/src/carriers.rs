use core::fmt;

use smallvec::SmallVec;

// CONSTANTS
// ================================================================================================

/// The highest yarn-carrier id on the supported machine class.
pub const MAX_CARRIER_ID: CarrierId = 10;

/// Identifier of a yarn carrier (`1..=10`).
pub type CarrierId = u8;

// CARRIER SET
// ================================================================================================

/// An ordered set of yarn carriers attached to a needle operation.
///
/// A pass knits with one carrier, or with two when plating; the leading carrier is the one listed
/// first. Order is significant and preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CarrierSet(SmallVec<[CarrierId; 2]>);

impl CarrierSet {
    /// Returns a carrier set over the specified ids, or `None` if any id is out of range or
    /// repeated.
    pub fn new(ids: impl IntoIterator<Item = CarrierId>) -> Option<Self> {
        let mut carriers = SmallVec::new();
        for id in ids {
            if id == 0 || id > MAX_CARRIER_ID || carriers.contains(&id) {
                return None;
            }
            carriers.push(id);
        }
        Some(Self(carriers))
    }

    /// Returns the carrier set holding the single specified id.
    ///
    /// # Panics
    /// Panics if the id is out of range.
    pub fn single(id: CarrierId) -> Self {
        assert!(id >= 1 && id <= MAX_CARRIER_ID, "carrier id {id} out of range");
        Self(SmallVec::from_slice(&[id]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: CarrierId) -> bool {
        self.0.contains(&id)
    }

    /// Returns the leading carrier id, if any.
    pub fn first(&self) -> Option<CarrierId> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = CarrierId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[CarrierId] {
        &self.0
    }
}

impl fmt::Display for CarrierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::CarrierSet;

    #[test]
    fn rejects_invalid_ids() {
        assert!(CarrierSet::new([0]).is_none());
        assert!(CarrierSet::new([11]).is_none());
        assert!(CarrierSet::new([3, 3]).is_none());
        assert!(CarrierSet::new([10, 1]).is_some());
    }

    #[test]
    fn preserves_order() {
        let set = CarrierSet::new([2, 1]).unwrap();
        assert_eq!(set.as_slice(), &[2, 1]);
        assert_eq!(format!("{set}"), "2 1");
    }
}
