//! Client core for the HDP quick start form: form state transitions, the
//! registry/batch query transport, and the controller tying them together.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod transport;

pub use config::{load_settings, Endpoints, Settings};
pub use controller::{perform_effect, FormController};
pub use error::{FormError, ServiceError};
pub use form::{
    Effect, FormEvent, FormState, InputEdit, InvocationTicket, SelectedProgramFile, StatusSlot,
};
pub use transport::{observe_result, HttpBackend, ProgramUpload, QuickStartBackend};

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod form_tests;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
