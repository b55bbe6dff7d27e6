pub mod email;

pub use email::{EmailNotifier, MailTransport, SmtpMailer};
