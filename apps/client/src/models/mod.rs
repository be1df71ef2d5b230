pub mod analysis;
pub mod chat;
pub mod job_description;
pub mod session;
