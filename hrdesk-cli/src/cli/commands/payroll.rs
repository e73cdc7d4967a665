//! Payroll command handler

use std::sync::Arc;

use anyhow::Result;
use colored::*;

use super::{run_delete, run_export, run_import, run_list, run_show};
use crate::api::DocumentStore;
use crate::cli::PayrollCommands;
use crate::config::Config;
use crate::entity::Payroll;
use crate::screen::CollectionScreen;

pub async fn handle(
    command: PayrollCommands,
    store: Arc<dyn DocumentStore>,
    config: &Config,
) -> Result<()> {
    let mut screen: CollectionScreen<Payroll> =
        CollectionScreen::new(store.clone(), config.page_size);

    match command {
        PayrollCommands::List(args) => run_list(&mut screen, &args).await?,
        PayrollCommands::Show { id } => run_show(&mut screen, &id).await?,
        PayrollCommands::Add {
            employee_name,
            salary,
            deductions,
            net_pay,
            pay_period_start,
            pay_period_end,
            status,
        } => {
            screen.load().await?;
            screen.open_editor();
            screen.set_field("employeeName", employee_name)?;
            screen.set_field("salary", salary)?;
            screen.set_field("deductions", deductions)?;
            screen.set_field("netPay", net_pay)?;
            screen.set_field("payPeriodStart", pay_period_start)?;
            screen.set_field("payPeriodEnd", pay_period_end)?;
            screen.set_field("status", status)?;
            screen.save().await?;
            println!("{}", "Payroll record added".green());
        }
        PayrollCommands::Edit {
            id,
            employee_name,
            salary,
            deductions,
            net_pay,
            pay_period_start,
            pay_period_end,
            status,
        } => {
            screen.load().await?;
            screen.edit(&id)?;
            let updates = [
                ("employeeName", employee_name),
                ("salary", salary),
                ("deductions", deductions),
                ("netPay", net_pay),
                ("payPeriodStart", pay_period_start),
                ("payPeriodEnd", pay_period_end),
                ("status", status),
            ];
            for (field, value) in updates {
                if let Some(value) = value {
                    screen.set_field(field, value)?;
                }
            }
            screen.save().await?;
            println!("{}", "Payroll record updated".green());
        }
        PayrollCommands::Delete(args) => run_delete(&mut screen, &args).await?,
        PayrollCommands::Import { file } => run_import(&mut screen, store.as_ref(), &file).await?,
        PayrollCommands::Export { file } => run_export(&mut screen, &file).await?,
    }
    Ok(())
}
