pub mod drag;
pub mod form;
pub mod keyboard_drag;
pub mod modal;
pub mod reorder;
pub mod sample;
pub mod search;
pub mod task_ops;
