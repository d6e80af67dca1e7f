use crate::sample::SweepSample;

/// Fixed-capacity, ordered store of the samples of one sweep.
///
/// `valid_count` samples were measured; after [`pad_with_sentinels`] the
/// remaining `capacity - valid_count` slots hold [`SweepSample::sentinel`].
///
/// [`pad_with_sentinels`]: SweepBuffer::pad_with_sentinels
#[derive(Clone, Debug, PartialEq)]
pub struct SweepBuffer {
    samples: Vec<SweepSample>,
    valid_count: usize,
    capacity: usize,
}

impl SweepBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            valid_count: 0,
            capacity,
        }
    }

    /// Rebuilds a buffer from decoded slots.
    ///
    /// Returns `None` if `valid_count` or the number of slots exceed `capacity`.
    pub fn from_parts(
        samples: Vec<SweepSample>,
        valid_count: usize,
        capacity: usize,
    ) -> Option<Self> {
        if samples.len() > capacity || valid_count > samples.len() {
            return None;
        }
        Some(Self {
            samples,
            valid_count,
            capacity,
        })
    }

    /// Appends a measured sample. When the buffer is full the sample is
    /// dropped and `false` is returned.
    pub fn push(&mut self, sample: SweepSample) -> bool {
        if self.is_full() {
            return false;
        }
        self.samples.push(sample);
        self.valid_count += 1;
        true
    }

    /// Fills every unused slot with a sentinel.
    pub fn pad_with_sentinels(&mut self) {
        self.samples.resize(self.capacity, SweepSample::sentinel());
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.valid_count = 0;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of measured samples.
    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// Number of occupied slots, padding included.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn is_padded(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// All occupied slots, padding included.
    pub fn samples(&self) -> &[SweepSample] {
        &self.samples
    }

    pub fn valid_samples(&self) -> &[SweepSample] {
        &self.samples[..self.valid_count]
    }
}

/// A finished sweep, ready to go over the radio.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPacket {
    pub device_id: i8,
    /// Clock milliseconds at finalization.
    pub timestamp: u32,
    /// Degrees Celsius, read once at sweep start.
    pub temperature: f32,
    pub human_detected: bool,
    pub buffer: SweepBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::INVALID_DISTANCE;

    fn sample(distance: i16) -> SweepSample {
        SweepSample {
            distance,
            is_passable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_push_clamps_at_capacity() {
        let mut buffer = SweepBuffer::new(3);
        for i in 0..10 {
            let pushed = buffer.push(sample(i));
            assert_eq!(pushed, i < 3);
            assert!(buffer.len() <= buffer.capacity());
        }
        assert_eq!(buffer.valid_count(), 3);
        assert_eq!(buffer.samples()[2].distance, 2);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_pad_with_sentinels() {
        let mut buffer = SweepBuffer::new(5);
        buffer.push(sample(100));
        buffer.push(sample(110));
        buffer.pad_with_sentinels();

        assert!(buffer.is_padded());
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.valid_count(), 2);
        assert_eq!(buffer.valid_samples().len(), 2);
        for s in &buffer.samples()[2..] {
            assert_eq!(s.distance, INVALID_DISTANCE);
            assert!(!s.is_passable);
        }
        // Padding occupies the slots, nothing more fits.
        assert!(!buffer.push(sample(1)));
        assert_eq!(buffer.valid_count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut buffer = SweepBuffer::new(2);
        buffer.push(sample(1));
        buffer.pad_with_sentinels();
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.valid_count(), 0);
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn test_from_parts() {
        assert!(SweepBuffer::from_parts(vec![SweepSample::sentinel(); 3], 1, 3).is_some());
        assert!(SweepBuffer::from_parts(vec![SweepSample::sentinel(); 4], 1, 3).is_none());
        assert!(SweepBuffer::from_parts(vec![SweepSample::sentinel(); 2], 3, 3).is_none());
    }
}
