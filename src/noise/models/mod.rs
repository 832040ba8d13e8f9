//! Individual noise models

pub mod compression;
pub mod impulse;
pub mod salt_pepper;
