pub mod design_service;

pub use design_service::{GameDesignService, GenerationSettings};
