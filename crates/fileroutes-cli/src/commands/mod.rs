pub mod compile;
pub mod resolve;
