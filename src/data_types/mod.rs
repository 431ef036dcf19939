pub mod axis;
pub mod data;
pub mod metadata;
pub mod plot_configs;
pub mod state;

// Flat paths for the public API
pub use axis::*;
pub use data::*;
pub use metadata::*;
pub use plot_configs::*;
pub use state::*;
