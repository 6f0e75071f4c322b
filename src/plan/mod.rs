//! Plan inputs, presets and plan-file loading

mod data;
pub mod loader;
pub mod presets;

pub use data::SimulationInput;
pub use loader::{default_plans, load_plans, load_plans_from_reader};
pub use presets::PlanParams;
