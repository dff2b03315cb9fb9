// Domain layer - plain data with no I/O
pub mod chart;
pub mod metric;
pub mod series;
pub mod token;
