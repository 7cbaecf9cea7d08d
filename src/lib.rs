pub mod config;
pub mod db;
pub mod display;
pub mod game;
pub mod http;
pub mod metrics;
