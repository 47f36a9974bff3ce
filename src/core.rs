pub mod constants;
pub mod search;
