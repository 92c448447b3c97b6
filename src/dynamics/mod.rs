//! Body movement: the wall-bouncing integrator that feeds positions to detection.

pub mod integrator;

pub use integrator::Integrator;
