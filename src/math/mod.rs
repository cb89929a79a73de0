pub mod angles;
pub mod geometry;
pub mod kepler;

pub use angles::{frac, mod_2pi, modulus};
pub use kepler::{solve_kepler, KeplerSolution};
