//! Observable Models
//!
//! Concrete data and filter sources backing the board in the browser.

mod filters;
mod points;

pub use filters::FilterModel;
pub use points::{PointsApi, PointsModel};
