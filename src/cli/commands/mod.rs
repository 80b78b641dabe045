pub mod auth;
pub mod dashboard;
pub mod job;
pub mod output;
pub mod process;
pub mod remote;
