//! Command handlers
//!
//! One handler module per collection, plus the shared flows they both
//! drive: paged table output, the confirm-then-delete sequence, and bulk
//! import/export.

pub mod department;
pub mod payroll;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use dialoguer::Confirm;

use super::{DeleteArgs, ListArgs};
use crate::api::DocumentStore;
use crate::entity::{Entity, field_str};
use crate::screen::CollectionScreen;
use crate::transfer::{import_workbook, write_sheet};

/// Load and print one page of the collection.
pub(crate) async fn run_list<E: Entity>(
    screen: &mut CollectionScreen<E>,
    args: &ListArgs,
) -> Result<()> {
    if let Some(page_size) = args.page_size {
        screen.set_page_size(page_size);
    }
    screen.load().await?;
    if let Some(search) = &args.search {
        screen.set_filter(search.clone());
    }
    screen.set_page(args.page);
    print_table(screen);
    Ok(())
}

/// Print one record in full, one line per column.
pub(crate) async fn run_show<E: Entity>(screen: &mut CollectionScreen<E>, id: &str) -> Result<()> {
    screen.load().await?;
    let record = screen
        .view(id)
        .with_context(|| format!("No {} with id {}", E::NOUN, id))?;

    println!("{} {}", "ID:".bold(), record.id);
    let fields = record.entity.to_fields();
    for (wire, header) in E::COLUMNS {
        println!("{} {}", format!("{}:", header).bold(), field_str(&fields, wire));
    }
    Ok(())
}

/// The confirm-then-delete flow. A single id names the record in the
/// prompt; several ids go through the selection set and report the count.
/// Declining leaves the store untouched.
pub(crate) async fn run_delete<E: Entity>(
    screen: &mut CollectionScreen<E>,
    args: &DeleteArgs,
) -> Result<()> {
    screen.load().await?;
    for id in &args.ids {
        if screen.view(id).is_none() {
            anyhow::bail!("No {} with id {}", E::NOUN, id);
        }
    }

    if let [id] = args.ids.as_slice() {
        screen.request_delete(id)?;
    } else {
        for id in &args.ids {
            screen.select_one(id, true);
        }
        screen.request_bulk_delete()?;
    }

    let prompt = screen.confirm_prompt().context("Confirmation state missing")?;
    let confirmed = args.yes || Confirm::new().with_prompt(prompt).default(false).interact()?;

    if !confirmed {
        screen.cancel_delete();
        println!("Delete cancelled");
        return Ok(());
    }

    let deleted = screen.confirm_delete().await?;
    let noun = if deleted == 1 { E::NOUN } else { E::NOUN_PLURAL };
    println!("{}", format!("Deleted {} {}", deleted, noun).green());
    Ok(())
}

/// Bulk import, then reload and report. Validation failures surface as
/// errors before any write; per-row failures are listed and do not undo
/// earlier rows.
pub(crate) async fn run_import<E: Entity>(
    screen: &mut CollectionScreen<E>,
    store: &dyn DocumentStore,
    file: &Path,
) -> Result<()> {
    let run_date = Local::now().format("%Y-%m-%d").to_string();
    let report = import_workbook::<E>(store, &file.to_string_lossy(), &run_date).await?;

    screen.load().await?;

    if report.is_clean() {
        println!(
            "{}",
            format!("Uploaded {} {} successfully", report.created, E::NOUN_PLURAL).green()
        );
    } else {
        println!(
            "{}",
            format!(
                "Uploaded {} {}, {} row(s) failed:",
                report.created,
                E::NOUN_PLURAL,
                report.failed.len()
            )
            .yellow()
        );
        for failure in &report.failed {
            println!("  row {}: {}", failure.row, failure.reason.red());
        }
    }
    println!("{} {} now in the collection", screen.len(), E::NOUN_PLURAL);
    Ok(())
}

/// Export the loaded collection to a workbook.
pub(crate) async fn run_export<E: Entity>(
    screen: &mut CollectionScreen<E>,
    file: &Path,
) -> Result<()> {
    screen.load().await?;
    write_sheet(
        screen.records().iter().map(|record| &record.entity),
        &file.to_string_lossy(),
    )?;
    println!(
        "{}",
        format!("Exported {} {} to {}", screen.len(), E::NOUN_PLURAL, file.display()).green()
    );
    Ok(())
}

/// Print the current page as an aligned table with an ID column followed by
/// the entity's columns.
pub(crate) fn print_table<E: Entity>(screen: &CollectionScreen<E>) {
    let headers: Vec<&str> = std::iter::once("ID")
        .chain(E::COLUMNS.iter().map(|(_, header)| *header))
        .collect();

    let rows: Vec<Vec<String>> = screen
        .current_page()
        .iter()
        .map(|record| {
            let fields = record.entity.to_fields();
            std::iter::once(record.id.clone())
                .chain(E::COLUMNS.iter().map(|(wire, _)| field_str(&fields, wire)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{:<width$}", header, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.bold());

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }

    println!(
        "{}",
        format!(
            "page {} of {} ({} {})",
            screen.page() + 1,
            screen.page_count(),
            screen.len(),
            E::NOUN_PLURAL
        )
        .dimmed()
    );
}
