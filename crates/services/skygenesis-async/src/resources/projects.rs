use crate::types::projects::Project;

crud_resource!(
    /// API resource for the `/projects` endpoints
    Projects,
    projects,
    "/projects",
    Project
);
