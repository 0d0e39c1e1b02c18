pub mod config;
pub mod document;
pub mod gui;
pub mod plot;
pub mod view;
pub use document::{TraceDocument, TraceSource};
pub use view::{SampleMatrix, WindowedMatrixView};
