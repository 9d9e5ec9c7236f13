#[derive(Debug)]
pub struct ApiUrls;

impl ApiUrls {
    // Tasks - JSON APIs
    pub const TASKS: &'static str = "/api/tasks";
    pub const TASK_BY_ID: &'static str = "/api/tasks/{id}";
    pub const TASKS_STATS: &'static str = "/api/tasks/stats";
    pub const TASKS_COMPLETED: &'static str = "/api/tasks/completed";

    // Health
    pub const HEALTH: &'static str = "/health";
}
