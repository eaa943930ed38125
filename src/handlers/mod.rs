// handlers/mod.rs - HTTP handlers grouped by controller
//
// home   - /api/home/*  (bearer token required)
// user   - /api/user/*  (bearer token required)
// system - /, /health   (public)

pub mod home;
pub mod system;
pub mod user;
