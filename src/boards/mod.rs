#[cfg(feature = "speedybee")]
pub mod speedybeef405wing;
#[cfg(feature = "speedybee")]
pub use speedybeef405wing as board;
