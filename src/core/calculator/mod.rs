pub mod breaks;
pub mod daily;
pub mod deduction;
pub mod monthly;
