pub mod fetch;
pub mod flatten;
pub mod resolve;
