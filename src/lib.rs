pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mail;
pub mod middleware;
pub mod observer;
pub mod report;
pub mod services;
pub mod state;
pub mod types;
