//! Authentication: registering, logging in and out, and the bearer token.

mod family;
mod log_in;
mod log_out;
mod register_user;
mod token;

pub use log_in::LogInRequest;
pub use register_user::RegisterRequest;
pub use token::{AuthToken, TokenSlot};
