// Core game logic modules
pub mod core;

// Session tokens
pub mod auth;

// Services (entry points used by the handlers)
pub mod services;

// API models (requests/responses)
pub mod models;

// HTTP routes
pub mod routes;

// Application state
pub mod state;

// Environment configuration
pub mod config;

// Error type shared by all entry points
pub mod error;
