pub mod cleanup_handler;

pub use cleanup_handler::{
    __path_cleanup_status, __path_run_cleanup, cleanup_status, run_cleanup, CleanupState,
};
