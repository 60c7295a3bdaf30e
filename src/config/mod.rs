//! Configuration: TOML settings and default locations.

pub mod paths;
pub mod settings;

pub use paths::lockbox_home;
pub use settings::Settings;
