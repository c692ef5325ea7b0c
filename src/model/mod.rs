pub mod classes;
pub mod thresholds;
pub mod verdict;
