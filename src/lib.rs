pub mod consts;
pub mod elements;
pub mod error;
pub mod file;
pub mod illumination;
pub mod math;
pub mod observation;
pub mod observer;
pub mod passes;
pub mod propagator;
pub mod satellite;
pub mod time;
