//! Client-side submission flow shared by the contact form and the newsletter
//! form: local validation, one request in flight at a time, transient
//! feedback.

mod controller;
mod fields;
mod relay_client;
mod session;

pub use controller::{FormController, FormState, RelayOutcome, RevertTicket, SubmitRejected};
pub use fields::{
    ContactFields, EMAIL_REQUIRED, FormFields, MESSAGE_REQUIRED, NAME_REQUIRED, NewsletterFields,
};
pub use relay_client::RelayClient;
pub use session::{DEFAULT_DISPLAY_TIMEOUT, FormSession};
