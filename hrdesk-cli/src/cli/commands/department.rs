//! Department command handler

use std::sync::Arc;

use anyhow::Result;
use colored::*;

use super::{run_delete, run_export, run_import, run_list, run_show};
use crate::api::DocumentStore;
use crate::cli::DepartmentCommands;
use crate::config::Config;
use crate::entity::Department;
use crate::screen::{CollectionScreen, SaveOutcome};

pub async fn handle(
    command: DepartmentCommands,
    store: Arc<dyn DocumentStore>,
    config: &Config,
) -> Result<()> {
    let mut screen: CollectionScreen<Department> =
        CollectionScreen::new(store.clone(), config.page_size);

    match command {
        DepartmentCommands::List(args) => run_list(&mut screen, &args).await?,
        DepartmentCommands::Show { id } => run_show(&mut screen, &id).await?,
        DepartmentCommands::Add { name, manager_id } => {
            screen.load().await?;
            screen.open_editor();
            screen.set_field("name", name)?;
            screen.set_field("managerId", manager_id)?;
            screen.save().await?;
            println!("{}", "Department added".green());
        }
        DepartmentCommands::Edit { id, name, manager_id } => {
            screen.load().await?;
            screen.edit(&id)?;
            if let Some(name) = name {
                screen.set_field("name", name)?;
            }
            if let Some(manager_id) = manager_id {
                screen.set_field("managerId", manager_id)?;
            }
            let outcome = screen.save().await?;
            debug_assert_eq!(outcome, SaveOutcome::Updated);
            println!("{}", "Department updated".green());
        }
        DepartmentCommands::Delete(args) => run_delete(&mut screen, &args).await?,
        DepartmentCommands::Import { file } => {
            run_import(&mut screen, store.as_ref(), &file).await?
        }
        DepartmentCommands::Export { file } => run_export(&mut screen, &file).await?,
    }
    Ok(())
}
