mod contact_message;
mod contact_name;
pub mod email_address;
mod message_body;
mod subscription_request;

pub use contact_message::*;
pub use contact_name::ContactName;
pub use email_address::{EmailAddress, is_valid_email};
pub use message_body::MessageBody;
pub use subscription_request::*;
