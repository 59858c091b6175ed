pub mod analytics;
pub mod chart;
pub mod holding;
pub mod nav;
pub mod scheme;
pub mod settings;
