pub mod config;
pub mod context;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod surface;
pub mod vector;
