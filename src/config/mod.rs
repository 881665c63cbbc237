pub mod resources;
pub mod settings;
pub mod validator;

pub use resources::*;
pub use settings::{DatabaseTarget, DeploymentMode, Settings};
pub use validator::validate_resources;
