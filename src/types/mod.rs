pub mod filters;
pub mod station;
