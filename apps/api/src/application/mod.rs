// Input collection for one generation attempt.
// Parses the submitted form and gates generation on required-field presence.

pub mod models;
pub mod multipart;
pub mod validation;

pub use models::{ApplicationRequest, Credential, ResumeFile};
pub use multipart::parse_application_form;
pub use validation::validate;
