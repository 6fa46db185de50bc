pub mod design;
pub mod health;

pub use design::{generate_game_design, ApiError};
pub use health::health;
