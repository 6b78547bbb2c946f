pub mod extract;
pub mod role;
pub mod token;
