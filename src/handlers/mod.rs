pub mod calculator;
pub mod catalog;
pub mod helpers;
pub mod middleware;
pub mod summary;
