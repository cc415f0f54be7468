pub mod config;
pub mod error;
pub mod i18n;
pub mod menu;
pub mod merge;
pub mod pages;
pub mod remote;
pub mod retry;
pub mod security;
pub mod server;
pub mod stats;
