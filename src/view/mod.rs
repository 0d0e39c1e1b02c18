// src/view/mod.rs
pub mod controller;
pub mod edit;
pub mod error;
pub mod matrix;
pub mod window;
pub use controller::{CompoundUpdate, DisplaySlice, Redraw, WindowedMatrixView};
pub use edit::{parse_bounds, BoundsText, TransientEditError};
pub use error::ViewError;
pub use matrix::SampleMatrix;
pub use window::{IndexWindow, JumpDirection, ValueWindow};
