use std::ops::Deref;
use ndarray::{s, ArrayView2};
use crate::view::error::ViewError;
use crate::view::matrix::SampleMatrix;
use crate::view::window::{IndexWindow, JumpDirection, ValueWindow};
/// What the host has to redo before the next paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Redraw {
    /// Only the value window moved; re-map intensities.
    Scale,
    /// The visible rows changed (or a new matrix arrived).
    Full,
}
/// Borrowed data handed to the renderer.
#[derive(Clone, Debug)]
pub struct DisplaySlice<'a> {
    pub data: ArrayView2<'a, f32>, // rows = traces in `rows`
    pub rows: IndexWindow,
    pub values: ValueWindow,
}
#[derive(Debug)]
struct Loaded {
    matrix: SampleMatrix,
    extent: ValueWindow,
    index: IndexWindow,
    values: ValueWindow,
}
impl Loaded {
    fn last_row(&self) -> usize {
        self.matrix.trace_count() - 1
    }
}
/// Holds the loaded sample matrix together with the visible row range and
/// the gray-scale clamp.
#[derive(Debug, Default)]
pub struct WindowedMatrixView {
    state: Option<Loaded>,
    linked: bool,
    redraw: Option<Redraw>,
    suppressed: bool,
}
impl WindowedMatrixView {
    pub fn new(linked: bool) -> Self {
        Self {
            linked,
            ..Self::default()
        }
    }
    pub fn is_linked(&self) -> bool {
        self.linked
    }
    pub fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
    }
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }
    pub fn matrix(&self) -> Option<&SampleMatrix> {
        self.state.as_ref().map(|s| &s.matrix)
    }
    pub fn index_window(&self) -> Option<IndexWindow> {
        self.state.as_ref().map(|s| s.index)
    }
    pub fn value_window(&self) -> Option<ValueWindow> {
        self.state.as_ref().map(|s| s.values)
    }
    /// Value window covering the whole matrix, as set by the last load.
    pub fn data_extent(&self) -> Option<ValueWindow> {
        self.state.as_ref().map(|s| s.extent)
    }
    /// Replaces the matrix and resets both windows to full extent.
    /// A degenerate matrix is rejected and the current state is kept.
    pub fn load(&mut self, matrix: SampleMatrix) -> Result<(), ViewError> {
        if matrix.is_empty() {
            return Err(ViewError::EmptyData {
                traces: matrix.trace_count(),
                samples: matrix.sample_count(),
            });
        }
        let extent = ValueWindow::enclosing(matrix.extent());
        let index = IndexWindow::full(matrix.trace_count());
        self.state = Some(Loaded {
            matrix,
            extent,
            index,
            values: extent,
        });
        self.mark(Redraw::Full);
        Ok(())
    }
    /// Sets the visible rows. Out-of-range bounds are clamped; crossed bounds
    /// are a half-finished edit and leave the window as it is.
    /// Returns whether the window changed.
    pub fn set_index_window(&mut self, min: i64, max: i64) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let Some(next) = IndexWindow::clamped(min, max, state.last_row()) else {
            return false;
        };
        if next == state.index {
            return false;
        }
        state.index = next;
        self.mark(Redraw::Full);
        true
    }
    /// Sets the gray-scale clamp. In linked mode the moved bound is mirrored
    /// around the midpoint of the data extent.
    /// Returns whether the window changed.
    pub fn set_value_window(&mut self, low: f64, high: f64) -> bool {
        let linked = self.linked;
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let (low, high) = if linked {
            let mid = state.extent.midpoint();
            if high != state.values.high {
                (2.0 * mid - high, high)
            } else if low != state.values.low {
                (low, 2.0 * mid - low)
            } else {
                (low, high)
            }
        } else {
            (low, high)
        };
        let Some(next) = ValueWindow::new(low, high) else {
            return false;
        };
        if next == state.values {
            return false;
        }
        state.values = next;
        self.mark(Redraw::Scale);
        true
    }
    /// Rows inside the index window plus the current clamp. No sample data is copied.
    pub fn display_slice(&self) -> Result<DisplaySlice<'_>, ViewError> {
        let state = self.state.as_ref().ok_or(ViewError::EmptyData {
            traces: 0,
            samples: 0,
        })?;
        let rows = state.index;
        let data = state.matrix.view().slice_move(s![rows.min..rows.max + 1, ..]);
        Ok(DisplaySlice {
            data,
            rows,
            values: state.values,
        })
    }
    /// Pages the index window by `multiplier` times its current width.
    /// Returns whether the window moved.
    pub fn jump(&mut self, direction: JumpDirection, multiplier: u32) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let Some(next) = state.index.jumped(direction, multiplier, state.last_row()) else {
            return false;
        };
        if next == state.index {
            return false;
        }
        state.index = next;
        self.mark(Redraw::Full);
        true
    }
    /// Starts a compound edit. Bounds set through the guard are applied
    /// together when it is committed or dropped.
    pub fn begin_update(&mut self) -> CompoundUpdate<'_> {
        self.suppressed = true;
        CompoundUpdate {
            view: self,
            index_min: None,
            index_max: None,
            value_low: None,
            value_high: None,
            applied: false,
        }
    }
    pub fn needs_redraw(&self) -> bool {
        !self.suppressed && self.redraw.is_some()
    }
    /// Hands out and clears the pending redraw request.
    pub fn take_redraw(&mut self) -> Option<Redraw> {
        if self.suppressed {
            return None;
        }
        self.redraw.take()
    }
    fn mark(&mut self, redraw: Redraw) {
        self.redraw = Some(self.redraw.map_or(redraw, |r| r.max(redraw)));
    }
}
/// Scoped pair edit, see [`WindowedMatrixView::begin_update`].
pub struct CompoundUpdate<'a> {
    view: &'a mut WindowedMatrixView,
    index_min: Option<i64>,
    index_max: Option<i64>,
    value_low: Option<f64>,
    value_high: Option<f64>,
    applied: bool,
}
impl CompoundUpdate<'_> {
    pub fn set_index_min(&mut self, min: i64) -> &mut Self {
        self.index_min = Some(min);
        self
    }
    pub fn set_index_max(&mut self, max: i64) -> &mut Self {
        self.index_max = Some(max);
        self
    }
    pub fn set_value_low(&mut self, low: f64) -> &mut Self {
        self.value_low = Some(low);
        self
    }
    pub fn set_value_high(&mut self, high: f64) -> &mut Self {
        self.value_high = Some(high);
        self
    }
    /// Applies the staged bounds now instead of at drop.
    pub fn commit(mut self) {
        self.apply();
    }
    fn apply(&mut self) {
        if self.applied {
            return;
        }
        self.applied = true;
        self.view.suppressed = false;
        if self.index_min.is_some() || self.index_max.is_some() {
            if let Some(current) = self.view.index_window() {
                let min = self.index_min.unwrap_or(current.min as i64);
                let max = self.index_max.unwrap_or(current.max as i64);
                self.view.set_index_window(min, max);
            }
        }
        if self.value_low.is_some() || self.value_high.is_some() {
            if let Some(current) = self.view.value_window() {
                let low = self.value_low.unwrap_or(current.low);
                let high = self.value_high.unwrap_or(current.high);
                self.view.set_value_window(low, high);
            }
        }
    }
}
impl Deref for CompoundUpdate<'_> {
    type Target = WindowedMatrixView;
    fn deref(&self) -> &Self::Target {
        &*self.view
    }
}
impl Drop for CompoundUpdate<'_> {
    fn drop(&mut self) {
        self.apply();
    }
}
