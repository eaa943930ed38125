pub mod user;

pub use user::UserRecord;
