//! Time-based scalar interpolation.
//!
//! An [`Interpolator`] moves a displayed value toward a target over a fixed
//! duration. Retargeting mid-flight starts the new tween from wherever the
//! value currently is, so successive retargets chain without jumps. Time is
//! supplied explicitly through [`Interpolator::tick`]; there is no global
//! timeline.

/// Easing curve applied to normalized progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Fast start, gentle landing: `1 - (1 - t)^2`.
    #[default]
    QuadOut,
    /// Slow start and end: smoothstep-like cubic.
    CubicInOut,
}

impl Ease {
    /// Applies the curve to `t`, clamped to [0, 1].
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// One animated scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    start: f64,
    current: f64,
    target: f64,
    start_time: f64,
    duration: f64,
    ease: Ease,
}

impl Interpolator {
    /// A settled interpolator resting at `value`.
    pub fn new(value: f64) -> Self {
        Self {
            start: value,
            current: value,
            target: value,
            start_time: 0.0,
            duration: 0.0,
            ease: Ease::default(),
        }
    }

    /// Same as [`Interpolator::new`] with a non-default easing curve.
    pub fn with_ease(value: f64, ease: Ease) -> Self {
        Self {
            ease,
            ..Self::new(value)
        }
    }

    /// Value as of the last [`tick`](Self::tick) or retarget.
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Value the current tween is heading toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the value has reached its target.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Starts a new tween from the current value toward `target`, beginning
    /// at `now` and lasting `duration`.
    ///
    /// A non-positive duration snaps immediately.
    pub fn retarget(&mut self, target: f64, now: f64, duration: f64) {
        self.start = self.current;
        self.target = target;
        self.start_time = now;
        self.duration = duration;
        if duration <= 0.0 {
            self.current = target;
        }
    }

    /// Advances the tween to time `now` and returns the new value.
    ///
    /// Times before the tween started leave the value where it began.
    pub fn tick(&mut self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            self.current = self.target;
            return self.current;
        }
        let progress = (now - self.start_time) / self.duration;
        self.current = if progress >= 1.0 {
            self.target
        } else {
            self.start + (self.target - self.start) * self.ease.apply(progress)
        };
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_settled_at_value() {
        let i = Interpolator::new(3.0);
        assert_eq!(i.value(), 3.0);
        assert_eq!(i.target(), 3.0);
        assert!(i.is_settled());
    }

    #[test]
    fn retarget_does_not_jump() {
        let mut i = Interpolator::new(0.0);
        i.retarget(10.0, 1.0, 0.8);
        assert_eq!(i.value(), 0.0);
        assert!(!i.is_settled());
    }

    #[test]
    fn tick_reaches_target_after_duration() {
        let mut i = Interpolator::new(0.0);
        i.retarget(10.0, 1.0, 0.8);
        assert_eq!(i.tick(1.8), 10.0);
        assert!(i.is_settled());
        assert_eq!(i.tick(5.0), 10.0);
    }

    #[test]
    fn tick_midway_is_between_start_and_target() {
        let mut i = Interpolator::with_ease(0.0, Ease::Linear);
        i.retarget(10.0, 0.0, 2.0);
        let v = i.tick(1.0);
        assert!((v - 5.0).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn quad_out_leads_linear() {
        let mut quad = Interpolator::new(0.0);
        let mut lin = Interpolator::with_ease(0.0, Ease::Linear);
        quad.retarget(1.0, 0.0, 1.0);
        lin.retarget(1.0, 0.0, 1.0);
        assert!(quad.tick(0.3) > lin.tick(0.3));
    }

    #[test]
    fn tick_before_start_holds_start_value() {
        let mut i = Interpolator::new(2.0);
        i.retarget(4.0, 10.0, 1.0);
        assert_eq!(i.tick(9.0), 2.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let mut i = Interpolator::with_ease(0.0, Ease::Linear);
        i.retarget(10.0, 0.0, 1.0);
        i.tick(0.5);
        i.retarget(0.0, 0.5, 1.0);
        assert!((i.value() - 5.0).abs() < 1e-12);
        let v = i.tick(1.0);
        assert!((v - 2.5).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn zero_duration_snaps() {
        let mut i = Interpolator::new(1.0);
        i.retarget(7.0, 0.0, 0.0);
        assert_eq!(i.value(), 7.0);
        assert_eq!(i.tick(0.0), 7.0);
    }

    #[test]
    fn ease_endpoints_are_fixed() {
        for ease in [Ease::Linear, Ease::QuadOut, Ease::CubicInOut] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_ease() -> impl Strategy<Value = Ease> {
            prop_oneof![
                Just(Ease::Linear),
                Just(Ease::QuadOut),
                Just(Ease::CubicInOut),
            ]
        }

        proptest! {
            #[test]
            fn value_stays_between_start_and_target(
                ease in any_ease(),
                from in -1e3_f64..1e3,
                to in -1e3_f64..1e3,
                duration in 0.01_f64..10.0,
                elapsed in 0.0_f64..20.0,
            ) {
                let mut i = Interpolator::with_ease(from, ease);
                i.retarget(to, 0.0, duration);
                let v = i.tick(elapsed);
                let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{v} outside [{lo}, {hi}]");
            }

            #[test]
            fn ease_is_monotonic(ease in any_ease(), a in 0.0_f64..1.0, b in 0.0_f64..1.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(ease.apply(lo) <= ease.apply(hi) + 1e-12);
            }
        }
    }
}
