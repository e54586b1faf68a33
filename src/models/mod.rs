pub mod task;
pub mod user;

pub use task::{Task, TaskChanges, TaskDraft};
pub use user::{User, UserProfile};
