pub mod api;
pub mod config;
pub mod convert;
pub mod humanize;
pub mod observability;
