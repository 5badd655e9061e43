pub mod check;
pub mod search;
pub mod session;
pub mod task_ops;
