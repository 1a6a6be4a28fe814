// Applicant assessment: technical, personality and communication evaluations
// derived from the prescreening transcript, folded into a stored profile.

pub mod assessor;
pub mod handlers;
pub mod manager;
pub mod models;
pub mod profile;
pub mod prompts;
pub mod repository;
