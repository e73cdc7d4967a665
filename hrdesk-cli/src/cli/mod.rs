//! Command-line surface

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hrdesk", version, about = "CRUD and bulk transfer for HR document store collections")]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with the Departments collection
    Department {
        #[command(subcommand)]
        command: DepartmentCommands,
    },
    /// Work with the Payrolls collection
    Payroll {
        #[command(subcommand)]
        command: PayrollCommands,
    },
}

#[derive(Subcommand)]
pub enum DepartmentCommands {
    /// List departments, one page at a time
    List(ListArgs),
    /// Show one department in full
    Show {
        /// Record id
        id: String,
    },
    /// Add a department
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        manager_id: String,
    },
    /// Change fields of an existing department
    Edit {
        /// Record id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        manager_id: Option<String>,
    },
    /// Delete one or more departments, with confirmation
    Delete(DeleteArgs),
    /// Bulk-create departments from a spreadsheet
    Import {
        /// Workbook to read (first sheet only)
        file: PathBuf,
    },
    /// Write all departments to a spreadsheet
    Export {
        /// Workbook to write
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum PayrollCommands {
    /// List payroll records, one page at a time
    List(ListArgs),
    /// Show one payroll record in full
    Show {
        /// Record id
        id: String,
    },
    /// Add a payroll record
    Add {
        #[arg(long)]
        employee_name: String,
        #[arg(long)]
        salary: String,
        #[arg(long, default_value = "")]
        deductions: String,
        #[arg(long, default_value = "")]
        net_pay: String,
        #[arg(long, default_value = "")]
        pay_period_start: String,
        #[arg(long, default_value = "")]
        pay_period_end: String,
        #[arg(long, default_value = "")]
        status: String,
    },
    /// Change fields of an existing payroll record
    Edit {
        /// Record id
        id: String,
        #[arg(long)]
        employee_name: Option<String>,
        #[arg(long)]
        salary: Option<String>,
        #[arg(long)]
        deductions: Option<String>,
        #[arg(long)]
        net_pay: Option<String>,
        #[arg(long)]
        pay_period_start: Option<String>,
        #[arg(long)]
        pay_period_end: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete one or more payroll records, with confirmation
    Delete(DeleteArgs),
    /// Bulk-create payroll records from a spreadsheet
    Import {
        /// Workbook to read (first sheet only)
        file: PathBuf,
    },
    /// Write all payroll records to a spreadsheet
    Export {
        /// Workbook to write
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Zero-based page to show
    #[arg(long, default_value_t = 0)]
    pub page: usize,
    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Only show rows with a field containing this text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// One or more record ids
    #[arg(required = true)]
    pub ids: Vec<String>,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
