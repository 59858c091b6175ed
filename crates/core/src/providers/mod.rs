pub mod retry;
pub mod traits;

// API provider implementations
pub mod mfapi;
