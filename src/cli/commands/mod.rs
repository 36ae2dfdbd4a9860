pub mod assignment;
pub mod backup;
pub mod category;
pub mod config;
pub mod course;
pub mod db;
pub mod del;
pub mod event;
pub mod export;
pub mod grades;
pub mod init;
pub mod list;
pub mod log;
pub mod restore;
pub mod term;
pub mod types;
