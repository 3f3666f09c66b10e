pub mod schema;
pub mod series;
pub mod station;
