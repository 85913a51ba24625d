//! # Google API Endpoints

pub mod export;
