pub mod intake;
pub mod message;
pub mod source;

pub use crate::domain::model::LeadSubmission;
pub use crate::domain::ports::Notifier;
pub use crate::utils::error::Result;
pub use intake::{IntakeHandler, IntakeRequest, IntakeResponse, RequestBody};
