use crate::cli::parser::{Commands, UserAction};
use crate::cli::commands::{open_store, print_json};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::models::user::Role;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_store(cfg)?;

    match action {
        UserAction::Add {
            id,
            name,
            department,
            role,
        } => {
            let role = Role::parse(role.as_deref().unwrap_or(cfg.default_role.as_str()))?;
            let user = UserLogic::add(&mut pool, id, name, department.as_deref(), role)?;
            success(format!(
                "User '{}' saved ({}, {}).",
                user.id,
                user.name,
                user.role.to_db_str()
            ));
        }
        UserAction::List { role } => {
            let role = role.as_deref().map(Role::parse).transpose()?;
            let users = UserLogic::list(&pool, role)?;

            if json {
                return print_json(&users);
            }

            if users.is_empty() {
                info("No users registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 2),
                Column::new("NAME", 4),
                Column::new("DEPARTMENT", 10),
                Column::new("ROLE", 4),
            ]);
            for u in &users {
                table.add_row(vec![
                    u.id.clone(),
                    u.name.clone(),
                    u.department.clone(),
                    u.role.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
