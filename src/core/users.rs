use crate::db::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use tracing::info;

pub struct UserLogic;

impl UserLogic {
    /// Create or update a user. Id and name are required; the department may be empty.
    pub fn add(
        store: &mut impl AttendanceStore,
        id: &str,
        name: &str,
        department: Option<&str>,
        role: Role,
    ) -> AppResult<User> {
        let id = id.trim();
        let name = name.trim();

        if id.is_empty() {
            return Err(AppError::Other("user id must not be empty".into()));
        }
        if name.is_empty() {
            return Err(AppError::Other("user name must not be empty".into()));
        }

        let existed = store.load_user(id)?.is_some();

        let user = User {
            id: id.to_string(),
            name: name.to_string(),
            department: department.map(|d| d.trim().to_string()).unwrap_or_default(),
            role,
        };
        store.save_user(&user)?;

        store.audit(
            if existed { "user_update" } else { "user_add" },
            id,
            &format!("{} ({}, {})", user.name, user.department, role.to_db_str()),
        )?;
        info!(user = id, role = role.to_db_str(), existed, "user saved");

        Ok(user)
    }

    pub fn list(store: &impl AttendanceStore, role: Option<Role>) -> AppResult<Vec<User>> {
        store.list_users(role)
    }
}
