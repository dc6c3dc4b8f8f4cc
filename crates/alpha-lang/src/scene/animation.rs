use super::GameObject;
use crate::config::PulseConfig;

/// Pulsing highlight applied to the selected object once per frame.
#[derive(Debug, Clone)]
pub struct Pulse {
    time: f64,
    config: PulseConfig,
}

impl Pulse {
    pub fn new(config: PulseConfig) -> Self {
        Self { time: 0.0, config }
    }

    pub fn time(&self) -> f64 { self.time }

    /// Advance the clock by one frame and, when there is a target, set its
    /// opacity and size from the new time.
    pub fn advance(&mut self, target: Option<&mut GameObject>) {
        self.time += self.config.step;
        if let Some(obj) = target {
            let c = &self.config;
            obj.opacity = c.opacity_base + c.opacity_amp * self.time.sin();
            obj.size = c.size_base + c.size_amp * (self.time * 2.0).sin();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectDefaults;
    use crate::scene::Shape;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn clock_advances_without_target() {
        let mut pulse = Pulse::new(PulseConfig::default());
        pulse.advance(None);
        pulse.advance(None);
        assert!(close(pulse.time(), 0.1));
    }

    #[test]
    fn target_follows_sine() {
        let mut pulse = Pulse::new(PulseConfig::default());
        let mut obj = GameObject::new(Shape::Circle, &ObjectDefaults::default());
        pulse.advance(Some(&mut obj));
        assert!(close(obj.opacity, 0.5 + 0.5 * 0.05_f64.sin()));
        assert!(close(obj.size, 40.0 + 10.0 * 0.1_f64.sin()));
    }

    #[test]
    fn values_stay_in_range() {
        let mut pulse = Pulse::new(PulseConfig::default());
        let mut obj = GameObject::new(Shape::Square, &ObjectDefaults::default());
        for _ in 0..500 {
            pulse.advance(Some(&mut obj));
            assert!((0.0..=1.0).contains(&obj.opacity));
            assert!(obj.size >= 30.0 && obj.size <= 50.0);
        }
    }
}
