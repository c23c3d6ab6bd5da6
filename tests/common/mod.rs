#![allow(dead_code)]

pub mod builders;
pub mod mock_control_plane;
pub mod strategies;

pub use builders::*;
pub use mock_control_plane::*;
pub use strategies::*;
