pub mod envelope;
pub mod service;

pub use envelope::{parse_envelope, Envelope, ImportError, ENVELOPE_VERSION, PLUGIN_MARKER};
pub use service::{PresetReport, ServiceConfig, ServiceError, ServiceResult, StyleService};
