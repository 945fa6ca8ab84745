pub mod chart_service;
pub mod predict_service;
pub mod regression_service;
