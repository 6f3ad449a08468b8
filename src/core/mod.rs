pub mod calendar;
pub mod leaves;
pub mod log;
pub mod normalize;
pub mod stats;
pub mod weekly;
