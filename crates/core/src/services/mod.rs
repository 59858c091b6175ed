pub mod chart_service;
pub mod nav_service;
pub mod portfolio_service;
pub mod scheme_resolver;
pub mod valuation_service;
