pub mod dispatch;
pub mod download;
pub mod import;
pub mod shared;
pub mod tables;
pub mod write;
