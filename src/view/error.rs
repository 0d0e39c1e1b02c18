use thiserror::Error;
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("matrix has no displayable data: {traces} traces x {samples} samples")]
    EmptyData { traces: usize, samples: usize },
    #[error("trace {index} has {actual} samples, expected {expected}")]
    RaggedTrace {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("invalid matrix shape: {0}")]
    Shape(String),
}
impl From<ndarray::ShapeError> for ViewError {
    fn from(value: ndarray::ShapeError) -> Self {
        ViewError::Shape(value.to_string())
    }
}
