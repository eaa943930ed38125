// /api/user - mail relay

pub mod send_mail;

pub use send_mail::send_mail;
