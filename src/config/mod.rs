pub use constraints::{normalise, ConstraintId};
pub use store::{Configuration, ConfigurationStore};

mod constraints;
mod store;
