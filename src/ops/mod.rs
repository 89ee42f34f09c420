pub mod check;
pub mod grouping;
pub mod task_list;
pub mod task_ops;
