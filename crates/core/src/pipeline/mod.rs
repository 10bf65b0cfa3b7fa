//! Per-submission stages, leaves first: request building, response routing
//! (which enriches 200 results), and chart presentation.

pub mod chart;
pub mod request;
pub mod router;
pub mod transform;
