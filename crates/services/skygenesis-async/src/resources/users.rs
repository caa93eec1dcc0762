use crate::types::users::User;

crud_resource!(
    /// API resource for the `/users` endpoints
    Users,
    users,
    "/users",
    User
);
