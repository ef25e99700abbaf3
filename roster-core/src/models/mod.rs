mod employee;
mod gender;

pub use employee::Employee;
pub use gender::Gender;
