//! External dependency implementations (ports + adapters).

pub mod ports;
pub mod replicate;
pub mod resilient_image_gen;
