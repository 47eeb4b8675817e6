mod gimbal;

pub use gimbal::{run_gimbal_task, run_status_task};
pub use smoke_test::run_smoke_test_task;
