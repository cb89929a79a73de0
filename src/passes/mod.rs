//! Rise and set prediction for one satellite over one ground station.

mod pass;
mod predictor;

pub use pass::{Pass, PoleCrossing};
pub use predictor::PassPredictor;
