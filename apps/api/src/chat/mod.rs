// Prescreening chat. Transcripts live in Redis; replies come from the first
// chat module that accepts the message.

pub mod handlers;
pub mod history;
pub mod modules;
pub mod prescreener;
pub mod prompts;
pub mod turn_lock;
