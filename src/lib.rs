//! Library exports for the gallery service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod database;
pub mod error;
pub mod gallery;
pub mod handler;
pub mod model;
pub mod notion;
pub mod route;
pub mod stats;
