use crate::CameraIndex;
use sighting_core::KeyPoint;

/// Both pixels of one observation, one per camera, under a caller chosen key.
///
/// The key is typically the synchronized timestamp of the two video frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<K> {
    pub key: K,
    pub pixels: [KeyPoint; 2],
}

/// Waits for the pixel of each camera before releasing an [`Observation`].
///
/// Pixels arrive one camera at a time, in any order. Once both cameras have a pixel under the same
/// key, the pair is released and the buffer is empty again. A pixel under a different key replaces
/// the half that was waiting, since it belongs to an observation that will never be completed.
///
/// ```
/// use sighting::{CameraIndex, KeyPoint, PendingPair};
///
/// let mut pending = PendingPair::new();
/// assert!(pending.insert(CameraIndex::Second, 12, KeyPoint::new(3.0, 4.0)).is_none());
/// let observation = pending.insert(CameraIndex::First, 12, KeyPoint::new(1.0, 2.0)).unwrap();
/// assert_eq!(observation.pixels, [KeyPoint::new(1.0, 2.0), KeyPoint::new(3.0, 4.0)]);
/// assert!(pending.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPair<K> {
    slots: [Option<(K, KeyPoint)>; 2],
}

impl<K> PendingPair<K>
where
    K: PartialEq,
{
    pub fn new() -> Self {
        Self {
            slots: [None, None],
        }
    }

    /// Stores the pixel picked in `camera` for `key`, releasing the observation once both are known.
    ///
    /// Picking again in the same camera for the same key replaces the earlier pixel.
    pub fn insert(&mut self, camera: CameraIndex, key: K, pixel: KeyPoint) -> Option<Observation<K>> {
        let other = 1 - camera.index();
        if matches!(&self.slots[other], Some((other_key, _)) if *other_key != key) {
            log::debug!("discarding unmatched pixel from the other camera");
            self.slots[other] = None;
        }
        self.slots[camera.index()] = Some((key, pixel));

        if self.slots.iter().all(Option::is_some) {
            let [first, second] = core::mem::replace(&mut self.slots, [None, None]);
            let (key, first) = first?;
            let (_, second) = second?;
            Some(Observation {
                key,
                pixels: [first, second],
            })
        } else {
            None
        }
    }

    /// The pixel waiting for its counterpart, if any.
    pub fn waiting(&self, camera: CameraIndex) -> Option<&(K, KeyPoint)> {
        self.slots[camera.index()].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }
}

impl<K> Default for PendingPair<K>
where
    K: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_in_camera_order() {
        let mut pending = PendingPair::new();
        assert!(pending
            .insert(CameraIndex::First, "t0", KeyPoint::new(1.0, 1.0))
            .is_none());
        let observation = pending
            .insert(CameraIndex::Second, "t0", KeyPoint::new(2.0, 2.0))
            .unwrap();
        assert_eq!(observation.key, "t0");
        assert_eq!(
            observation.pixels,
            [KeyPoint::new(1.0, 1.0), KeyPoint::new(2.0, 2.0)]
        );
        assert!(pending.is_empty());
    }

    #[test]
    fn same_camera_twice_replaces_pixel() {
        let mut pending = PendingPair::new();
        pending.insert(CameraIndex::First, 1, KeyPoint::new(1.0, 1.0));
        pending.insert(CameraIndex::First, 1, KeyPoint::new(5.0, 5.0));
        let observation = pending
            .insert(CameraIndex::Second, 1, KeyPoint::new(2.0, 2.0))
            .unwrap();
        assert_eq!(observation.pixels[0], KeyPoint::new(5.0, 5.0));
    }

    #[test]
    fn different_key_discards_stale_half() {
        let mut pending = PendingPair::new();
        pending.insert(CameraIndex::First, 1, KeyPoint::new(1.0, 1.0));
        assert!(pending
            .insert(CameraIndex::Second, 2, KeyPoint::new(2.0, 2.0))
            .is_none());
        assert!(pending.waiting(CameraIndex::First).is_none());
        assert_eq!(
            pending.waiting(CameraIndex::Second),
            Some(&(2, KeyPoint::new(2.0, 2.0)))
        );
        let observation = pending
            .insert(CameraIndex::First, 2, KeyPoint::new(3.0, 3.0))
            .unwrap();
        assert_eq!(observation.key, 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut pending = PendingPair::new();
        pending.insert(CameraIndex::Second, 1, KeyPoint::new(1.0, 1.0));
        pending.clear();
        assert!(pending.is_empty());
    }
}
