pub mod aggregate;
pub mod transfer;
