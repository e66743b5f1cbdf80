//! Configuration schema types for conrelay.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod flow;
mod input;
mod logging;
mod remote;
mod surface;
mod transport;

pub use flow::*;
pub use input::*;
pub use logging::*;
pub use remote::*;
pub use surface::*;
pub use transport::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration shared by the supervisor and remote roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    pub transport: TransportConfig,
    pub flow: FlowConfig,
    pub surface: SurfaceConfig,
    pub input: InputConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}
