/// Server services
pub mod auth;
pub mod mail;
pub mod otp;

pub use auth::AuthService;
pub use mail::{Mailer, ResendMailer};
pub use otp::OtpService;
