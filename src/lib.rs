pub mod api;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod stats;
