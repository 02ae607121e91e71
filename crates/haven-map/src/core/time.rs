/// Variable-step frame clock.
/// Each tick advances by the real frame delta, capped at `max_dt`.
pub struct FrameClock {
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
        }
    }

    /// Advance by one frame. Returns the delta the simulation should use.
    pub fn advance(&self, frame_dt: f32) -> f32 {
        if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_normal_deltas_through() {
        let clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(1.0 / 60.0), 1.0 / 60.0);
    }

    #[test]
    fn caps_long_frames() {
        let clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(3.0), 0.25);
    }

    #[test]
    fn rejects_negative_and_nan() {
        let clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
    }
}
