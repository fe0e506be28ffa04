pub mod client;
pub mod session;

pub use client::{ApiError, ClinicApi, ClinicClient, NewAppointment, PersonRef};
pub use session::{AuthError, SessionStore, SessionTokens};
