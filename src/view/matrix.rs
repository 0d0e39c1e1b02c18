use ndarray::{Array2, ArrayView2};
use crate::view::error::ViewError;
/// Decoded trace data, one row per trace.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleMatrix {
    data: Array2<f32>, // traces x samples
}
impl SampleMatrix {
    pub fn from_array(data: Array2<f32>) -> Self {
        Self { data }
    }
    /// Builds a matrix from row-major samples.
    pub fn from_shape_vec(
        trace_count: usize,
        sample_count: usize,
        samples: Vec<f32>,
    ) -> Result<Self, ViewError> {
        let data = Array2::from_shape_vec((trace_count, sample_count), samples)?;
        Ok(Self { data })
    }
    /// Builds a matrix from per-trace sample vectors. All traces must share a length.
    pub fn from_traces(traces: &[Vec<f32>]) -> Result<Self, ViewError> {
        let sample_count = traces.first().map(|t| t.len()).unwrap_or(0);
        let mut flat = Vec::with_capacity(traces.len() * sample_count);
        for (index, trace) in traces.iter().enumerate() {
            if trace.len() != sample_count {
                return Err(ViewError::RaggedTrace {
                    index,
                    expected: sample_count,
                    actual: trace.len(),
                });
            }
            flat.extend_from_slice(trace);
        }
        Self::from_shape_vec(traces.len(), sample_count, flat)
    }
    pub fn trace_count(&self) -> usize {
        self.data.nrows()
    }
    pub fn sample_count(&self) -> usize {
        self.data.ncols()
    }
    pub fn is_empty(&self) -> bool {
        self.trace_count() == 0 || self.sample_count() == 0
    }
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }
    /// Smallest and largest finite sample, `None` when no sample is finite.
    pub fn extent(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn from_traces_keeps_row_order() {
        let m = SampleMatrix::from_traces(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
            .unwrap();
        assert_eq!(m.trace_count(), 3);
        assert_eq!(m.sample_count(), 2);
        assert_eq!(m.view()[[2, 0]], 5.0);
    }
    #[test]
    fn ragged_traces_are_rejected() {
        let err = SampleMatrix::from_traces(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ViewError::RaggedTrace {
                index: 1,
                expected: 2,
                actual: 1
            }
        );
    }
    #[test]
    fn shape_mismatch_maps_to_shape_error() {
        let err = SampleMatrix::from_shape_vec(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, ViewError::Shape(_)));
    }
    #[test]
    fn extent_skips_non_finite_samples() {
        let m = SampleMatrix::from_traces(&[vec![f32::NAN, -1.5], vec![f32::INFINITY, 2.25]])
            .unwrap();
        assert_eq!(m.extent(), Some((-1.5, 2.25)));
        let nan = SampleMatrix::from_traces(&[vec![f32::NAN]]).unwrap();
        assert_eq!(nan.extent(), None);
    }
    #[test]
    fn empty_inputs_build_empty_matrices() {
        assert!(SampleMatrix::from_traces(&[]).unwrap().is_empty());
        assert!(SampleMatrix::from_traces(&[vec![], vec![]]).unwrap().is_empty());
    }
}
