use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Latest known person-presence state.
///
/// Written by the detection link, read by the sweep. Reading never clears it.
#[derive(Debug, Clone, Default)]
pub struct DetectionFlag(Arc<AtomicBool>);

impl DetectionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, detected: bool) {
        self.0.store(detected, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_between_clones() {
        let flag = DetectionFlag::new();
        let writer = flag.clone();
        assert!(!flag.get());
        writer.set(true);
        assert!(flag.get());
        // Still set after being read.
        assert!(flag.get());
        writer.set(false);
        assert!(!flag.get());
    }
}
