//! PolicyEngine Adapter Layer
//!
//! Programs too complex to hand-code (SNAP, Medicaid, tax credits) are
//! delegated to the external PolicyEngine microsimulation. This module owns
//! the full adapter: mapping household data into PolicyEngine's nested unit
//! structure, batching many programs into one request, calling the API with
//! private/public fallback, and extracting per-program results back out.
//!
//! - `inputs` / `outputs`: variable descriptors (pure functions of the screen)
//! - `config`: per-program input/output bundles and the config registry
//! - `request`: nested payload builder with conflict detection
//! - `response`: read-only accessor defaulting absent variables to zero
//! - `client`: ordered strategy list (private OAuth API, then public API)
//! - `extractors`: turn a response into an `Eligibility` per program

pub mod client;
pub mod config;
pub mod extractors;
pub mod inputs;
pub mod outputs;
pub mod request;
pub mod response;

pub use client::{PeApiConfig, PeStrategy, PolicyEngineClient, PolicyEngineError};
pub use config::{pe_program_config, PeProgramConfig};
pub use extractors::PeResultExtractor;
pub use inputs::{PeInput, PeTarget};
pub use outputs::{PeOutput, PeUnit};
pub use request::{PeRequest, RequestError, MAIN_TAX_UNIT, SECONDARY_TAX_UNIT};
pub use response::PeResponse;
