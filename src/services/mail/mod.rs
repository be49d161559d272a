//! 메일 발송 서비스

pub mod mail_sender;

pub use mail_sender::*;
