pub mod user_created_logger;

pub use user_created_logger::UserCreatedLogger;
