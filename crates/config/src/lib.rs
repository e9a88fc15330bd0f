//! Crossbuy Config
//!
//! Settings structures, the static chain registry and asset list, and the
//! configuration file loader.

pub mod loader;
pub mod registry;
pub mod settings;

pub use loader::load_config;
pub use registry::ChainRegistry;
pub use settings::{
	HomeSettings, LogFormat, LoggingSettings, ServiceEndpoint, Settings, SolverSettings,
	SubmissionSettings,
};
