pub mod auth;
pub mod compare;
pub mod config;
pub mod context;
pub mod rate_later;
pub mod ratings;
