use crate::model::VehicleId;

/// Hands out identifiers by scanning the live collection.
///
/// The scan is the only source of truth. `high_water` is a cached maximum
/// refreshed by [`IdAllocator::resync`] after bulk loads and by every
/// allocation.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    high_water: VehicleId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `max(ids ∪ {0}) + 1`, or `None` once the maximum is `VehicleId::MAX`
    pub fn next_id<I>(&mut self, ids: I) -> Option<VehicleId>
    where
        I: IntoIterator<Item = VehicleId>,
    {
        let next = max_id(ids).checked_add(1)?;
        self.high_water = next;
        Some(next)
    }

    pub fn resync<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = VehicleId>,
    {
        self.high_water = max_id(ids);
    }

    pub fn high_water(&self) -> VehicleId {
        self.high_water
    }

    pub fn is_unique<I>(id: VehicleId, ids: I) -> bool
    where
        I: IntoIterator<Item = VehicleId>,
    {
        ids.into_iter().all(|existing| existing != id)
    }
}

fn max_id<I>(ids: I) -> VehicleId
where
    I: IntoIterator<Item = VehicleId>,
{
    ids.into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_starts_at_one() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.next_id(Vec::new()), Some(1));
    }

    #[test]
    fn test_next_exceeds_max_not_count() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.next_id(vec![3, 9, 4]), Some(10));
    }

    #[test]
    fn test_resync_agrees_with_scan() {
        let ids = vec![5, 2, 12];
        let mut allocator = IdAllocator::new();
        allocator.resync(ids.clone());
        assert_eq!(allocator.high_water(), 12);
        let expected = allocator.high_water() + 1;
        assert_eq!(allocator.next_id(ids), Some(expected));
        assert_eq!(allocator.high_water(), 13);
    }

    #[test]
    fn test_scan_ignores_stale_high_water() {
        let mut allocator = IdAllocator::new();
        allocator.resync(vec![40]);
        // The collection shrank since the last resync
        assert_eq!(allocator.next_id(vec![1, 2]), Some(3));
    }

    #[test]
    fn test_exhausted_at_max_id() {
        let mut allocator = IdAllocator::new();
        allocator.resync(vec![7]);
        assert_eq!(allocator.next_id(vec![1, VehicleId::MAX]), None);
        assert_eq!(allocator.high_water(), 7);
    }

    #[test]
    fn test_is_unique() {
        assert!(IdAllocator::is_unique(4, vec![1, 2, 3]));
        assert!(!IdAllocator::is_unique(2, vec![1, 2, 3]));
    }
}
