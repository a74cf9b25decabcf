pub mod capture;
pub mod enhancement;
