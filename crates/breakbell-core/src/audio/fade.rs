use std::time::Duration;

/// Interval between two volume updates of a fade.
pub const FADE_STEP: Duration = Duration::from_millis(50);

/// Linear 0.0 -> 1.0 volume ramp, one value per [`FADE_STEP`].
///
/// Yields nothing more once it has produced 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeRamp {
    step: u32,
    total_steps: u32,
}

impl FadeRamp {
    pub fn new(duration: Duration) -> Self {
        let total_steps = (duration.as_millis() / FADE_STEP.as_millis()).max(1);
        Self {
            step: 0,
            total_steps: u32::try_from(total_steps).unwrap_or(u32::MAX),
        }
    }

    pub fn from_secs(secs: u32) -> Self {
        Self::new(Duration::from_secs(u64::from(secs)))
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Volume reached so far.
    pub fn volume(&self) -> f32 {
        (self.step as f32 / self.total_steps as f32).min(1.0)
    }

    pub fn is_saturated(&self) -> bool {
        self.step >= self.total_steps
    }
}

impl Iterator for FadeRamp {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.is_saturated() {
            return None;
        }
        self.step += 1;
        Some(self.volume())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_seconds_is_eighty_steps() {
        let ramp = FadeRamp::from_secs(4);
        assert_eq!(ramp.total_steps(), 80);
        let volumes: Vec<f32> = ramp.collect();
        assert_eq!(volumes.len(), 80);
        assert_eq!(*volumes.last().unwrap(), 1.0);
        assert!((volumes[0] - 0.0125).abs() < 1e-6);
    }

    #[test]
    fn volumes_increase_monotonically() {
        let volumes: Vec<f32> = FadeRamp::from_secs(2).collect();
        assert!(volumes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn zero_duration_jumps_to_full() {
        let mut ramp = FadeRamp::from_secs(0);
        assert_eq!(ramp.next(), Some(1.0));
        assert_eq!(ramp.next(), None);
        assert!(ramp.is_saturated());
    }
}
