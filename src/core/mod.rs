pub mod backup;
pub mod calculator;
pub mod clock;
pub mod dashboard;
pub mod details;
pub mod log;
pub mod logic;
pub mod reports;
pub mod schedule;
pub mod summary;
pub mod trigger;
pub mod users;
