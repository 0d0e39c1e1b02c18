/// Inclusive range of visible trace rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexWindow {
    pub min: usize,
    pub max: usize,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpDirection {
    Left,
    Right,
}
impl IndexWindow {
    /// Covers every row of a matrix with `trace_count` rows (`trace_count` > 0).
    pub fn full(trace_count: usize) -> Self {
        Self {
            min: 0,
            max: trace_count.saturating_sub(1),
        }
    }
    /// Clamps raw editor input into `[0, last]`. `None` when the bounds cross.
    pub fn clamped(min: i64, max: i64, last: usize) -> Option<Self> {
        let clamp = |v: i64| -> usize {
            if v <= 0 {
                0
            } else {
                (v as u64).min(last as u64) as usize
            }
        };
        let (min, max) = (clamp(min), clamp(max));
        (min <= max).then_some(Self { min, max })
    }
    pub fn width(&self) -> usize {
        self.max - self.min + 1
    }
    /// Moves the window by `multiplier` widths. A page that would start past the
    /// data edge collapses into extending the window to that edge.
    /// `None` when the window already touches the edge in `direction`.
    pub fn jumped(&self, direction: JumpDirection, multiplier: u32, last: usize) -> Option<Self> {
        if multiplier == 0 {
            return None;
        }
        let step = self.width().saturating_mul(multiplier as usize);
        match direction {
            JumpDirection::Right => {
                if self.max >= last {
                    return None;
                }
                let min = self.min.saturating_add(step);
                if min > last {
                    return Some(Self {
                        min: self.min,
                        max: last,
                    });
                }
                Some(Self {
                    min,
                    max: self.max.saturating_add(step).min(last),
                })
            }
            JumpDirection::Left => {
                if self.min == 0 {
                    return None;
                }
                if step > self.max {
                    return Some(Self {
                        min: 0,
                        max: self.max,
                    });
                }
                Some(Self {
                    min: self.min.saturating_sub(step),
                    max: self.max - step,
                })
            }
        }
    }
}
/// Amplitude clamp used for the gray scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueWindow {
    pub low: f64,
    pub high: f64,
}
impl ValueWindow {
    /// `None` for crossed or non-finite bounds.
    pub fn new(low: f64, high: f64) -> Option<Self> {
        (low.is_finite() && high.is_finite() && low <= high).then_some(Self { low, high })
    }
    /// Integer-aligned window enclosing the data extent.
    pub fn enclosing(extent: Option<(f32, f32)>) -> Self {
        match extent {
            Some((lo, hi)) => Self {
                low: (lo as f64).floor(),
                high: (hi as f64).ceil(),
            },
            None => Self {
                low: 0.0,
                high: 0.0,
            },
        }
    }
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
    pub fn span(&self) -> f64 {
        self.high - self.low
    }
    /// Position of `value` inside the window, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        if !value.is_finite() {
            return 0.0;
        }
        if span <= 0.0 {
            return if (value as f64) < self.low { 0.0 } else { 1.0 };
        }
        (((value as f64 - self.low) / span) as f32).clamp(0.0, 1.0)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn clamped_pulls_bounds_into_range() {
        assert_eq!(
            IndexWindow::clamped(-5, 500, 99),
            Some(IndexWindow { min: 0, max: 99 })
        );
        assert_eq!(IndexWindow::clamped(30, 20, 99), None);
        // both beyond the end collapse onto the last row
        assert_eq!(
            IndexWindow::clamped(120, 150, 99),
            Some(IndexWindow { min: 99, max: 99 })
        );
    }
    #[test]
    fn jump_right_pages_by_width() {
        let w = IndexWindow { min: 0, max: 9 };
        assert_eq!(
            w.jumped(JumpDirection::Right, 2, 99),
            Some(IndexWindow { min: 20, max: 29 })
        );
    }
    #[test]
    fn jump_shrinks_at_upper_edge() {
        let w = IndexWindow { min: 75, max: 84 };
        assert_eq!(
            w.jumped(JumpDirection::Right, 2, 99),
            Some(IndexWindow { min: 95, max: 99 })
        );
    }
    #[test]
    fn jump_past_edge_extends_to_edge() {
        let w = IndexWindow { min: 80, max: 89 };
        assert_eq!(
            w.jumped(JumpDirection::Right, 2, 99),
            Some(IndexWindow { min: 80, max: 99 })
        );
        let w = IndexWindow { min: 10, max: 19 };
        assert_eq!(
            w.jumped(JumpDirection::Left, 2, 99),
            Some(IndexWindow { min: 0, max: 19 })
        );
    }
    #[test]
    fn jump_at_edge_is_noop() {
        assert_eq!(
            IndexWindow { min: 50, max: 99 }.jumped(JumpDirection::Right, 1, 99),
            None
        );
        assert_eq!(
            IndexWindow { min: 0, max: 9 }.jumped(JumpDirection::Left, 1, 99),
            None
        );
        assert_eq!(
            IndexWindow { min: 10, max: 19 }.jumped(JumpDirection::Left, 0, 99),
            None
        );
    }
    #[test]
    fn value_window_rejects_crossed_and_nan() {
        assert!(ValueWindow::new(5.0, 2.0).is_none());
        assert!(ValueWindow::new(f64::NAN, 2.0).is_none());
        assert!(ValueWindow::new(f64::NEG_INFINITY, f64::INFINITY).is_none());
        assert!(ValueWindow::new(0.0, f64::INFINITY).is_none());
        assert!(ValueWindow::new(2.0, 2.0).is_some());
    }
    #[test]
    fn enclosing_rounds_outward() {
        let w = ValueWindow::enclosing(Some((-2.5, 6.1)));
        assert_eq!(w, ValueWindow { low: -3.0, high: 7.0 });
        assert_eq!(
            ValueWindow::enclosing(None),
            ValueWindow { low: 0.0, high: 0.0 }
        );
    }
    #[test]
    fn normalize_clamps() {
        let w = ValueWindow { low: -2.0, high: 2.0 };
        assert_eq!(w.normalize(-10.0), 0.0);
        assert_eq!(w.normalize(0.0), 0.5);
        assert_eq!(w.normalize(10.0), 1.0);
        let flat = ValueWindow { low: 1.0, high: 1.0 };
        assert_eq!(flat.normalize(0.0), 0.0);
        assert_eq!(flat.normalize(1.0), 1.0);
    }
}
