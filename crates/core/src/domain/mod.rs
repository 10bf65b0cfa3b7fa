pub mod chart;
pub mod profile;
pub mod query;
