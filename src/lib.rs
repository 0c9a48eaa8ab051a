// Plant model and threshold profiles
pub mod plant;

// Well-being classification and trend analysis
pub mod evaluator;

// Chat persona and text-generation collaborator
pub mod chat;

// In-memory plant and reading store
pub mod store;

// Simulated sensor feed
pub mod simulator;

// Bearer token authentication
pub mod auth;

// Subscription management
pub mod subscription;

// HTTP and WebSocket APIs
pub mod api;

// Configuration
pub mod config;
