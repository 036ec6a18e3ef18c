pub mod field;
pub mod model;
mod tests;

pub use field::{Field, Grid};
pub use model::{ForecastModel, RelaxationModel};
