use crate::{Observation, Triangulator};
use sighting_core::{Result, TriangulatorRays, WorldPoint};
use std::collections::BTreeMap;

/// Triangulated points kept in key order.
///
/// Keys are opaque to the triangulation and usually are the timestamps of the observed frames.
/// Triangulating the same key again replaces the earlier point.
#[derive(Debug, Clone, PartialEq)]
pub struct Track<K> {
    points: BTreeMap<K, WorldPoint>,
}

impl<K> Track<K>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Triangulates an observation and stores the result under its key.
    ///
    /// A rejected observation is not stored and leaves any earlier point under the same key in place.
    pub fn record<T>(
        &mut self,
        triangulator: &Triangulator<T>,
        observation: Observation<K>,
    ) -> Result<WorldPoint>
    where
        T: TriangulatorRays,
    {
        let [first, second] = observation.pixels;
        let point = triangulator.triangulate(first, second)?;
        self.points.insert(observation.key, point);
        Ok(point)
    }

    /// Stores a point, returning the one it replaced.
    pub fn insert(&mut self, key: K, point: WorldPoint) -> Option<WorldPoint> {
        self.points.insert(key, point)
    }

    pub fn get(&self, key: &K) -> Option<&WorldPoint> {
        self.points.get(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<WorldPoint> {
        self.points.remove(key)
    }

    /// Iterates the points in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &WorldPoint)> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<K> Default for Track<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FromIterator<(K, WorldPoint)> for Track<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, WorldPoint)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<K> Extend<(K, WorldPoint)> for Track<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, WorldPoint)>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
