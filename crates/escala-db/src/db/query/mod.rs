pub mod assignment;
pub mod employee;
pub mod shift;
