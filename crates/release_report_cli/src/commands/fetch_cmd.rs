use std::{
    fs,
    path::{Path, PathBuf},
};

use ado_client::{AdoClient, FileEntry, RepositoryReader};
use clap::Args;
use colored::Colorize;
use release_report_core::{fetch_release_scripts, ReleaseQuery, ReleaseScripts};
use tracing::{debug, info, instrument};

use crate::config::{get_config_path, read_token_from_env, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "fetch_cmd_tests.rs"]
mod tests;

/// Columns of the terminal table, in display order.
pub const TABLE_HEADERS: [&str; 6] = [
    "#",
    "File Name",
    "Added By",
    "Added On",
    "Updated By",
    "Updated On",
];

const COLUMN_GAP: &str = "  ";

/// Arguments of the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Release identifier, e.g. 1.2.0
    #[arg(short, long)]
    pub release: String,

    /// Folder label from the [folders] table of the configuration
    #[arg(short, long)]
    pub folder: String,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to write the spreadsheet export to
    #[arg(short, long)]
    pub export_dir: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Execute the fetch command
#[instrument(skip(args), fields(release = %args.release, folder = %args.folder))]
pub async fn execute(args: &FetchArgs) -> Result<(), Error> {
    let config_path = get_config_path(args.config.as_deref());
    debug!(message = "Loading configuration", path = ?config_path);

    let config = AppConfig::load_with_env(&config_path)?;
    let query = config.resolve_query(&args.release, &args.folder)?;
    let settings = config.connection_settings(read_token_from_env())?;
    let branch = settings.branch.clone();
    let client = AdoClient::new(settings)?;

    let output = run_fetch(
        &client,
        &query,
        &branch,
        args.export_dir.as_deref(),
        args.json,
    )
    .await?;
    print!("{output}");
    Ok(())
}

/// Runs the fetch cycle and renders everything the command prints.
///
/// With `export_dir` set, a non-empty result is also written there as a
/// spreadsheet.
///
/// # Errors
///
/// Returns `Error::Fetch` if the listing fails, and `Error::Report` or
/// `Error::WriteExport` if the export cannot be produced.
pub async fn run_fetch(
    reader: &dyn RepositoryReader,
    query: &ReleaseQuery,
    branch: &str,
    export_dir: Option<&Path>,
    json: bool,
) -> Result<String, Error> {
    let scripts = fetch_release_scripts(reader, query).await?;

    let exported = match export_dir {
        Some(dir) => write_export(&scripts, dir)?,
        None => None,
    };

    if json {
        let mut output = serde_json::to_string_pretty(&scripts)?;
        output.push('\n');
        return Ok(output);
    }

    let mut output = render_summary(&scripts);
    output.push('\n');

    if scripts.is_empty() {
        output.push_str(&format!("{}\n", scripts.empty_notice(branch).yellow()));
    } else {
        output.push_str(&render_table(&scripts.entries));
    }

    if let Some(path) = exported {
        output.push_str(&format!(
            "\n{} {}\n",
            "Exported to".green(),
            path.display()
        ));
    }

    Ok(output)
}

/// Writes the spreadsheet export into `dir`.
///
/// Returns the path of the written file, or `None` when there is nothing to
/// export.
pub fn write_export(scripts: &ReleaseScripts, dir: &Path) -> Result<Option<PathBuf>, Error> {
    let Some(artifact) = scripts.export()? else {
        debug!("Nothing to export");
        return Ok(None);
    };

    fs::create_dir_all(dir).map_err(Error::WriteExport)?;
    let path = dir.join(&artifact.filename);
    fs::write(&path, &artifact.bytes).map_err(Error::WriteExport)?;

    info!(message = "Export written", path = ?path, bytes = artifact.bytes.len());
    Ok(Some(path))
}

/// Release, folder and result count, one per line.
pub fn render_summary(scripts: &ReleaseScripts) -> String {
    let query = &scripts.query;
    format!(
        "{} {}\n{} {} ({})\n{} {}\n",
        "Release:      ".bold(),
        query.release,
        "Folder:       ".bold(),
        query.folder_label,
        query.scripts_path,
        "Scripts found:".bold(),
        scripts.len()
    )
}

/// Renders `entries` as a left-aligned text table. Indexes start at 1.
pub fn render_table(entries: &[FileEntry]) -> String {
    let rows: Vec<[String; 6]> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            [
                (idx + 1).to_string(),
                entry.name.clone(),
                entry.added_by.clone(),
                entry.added_date.clone(),
                entry.updated_by.clone(),
                entry.updated_date.clone(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let header = TABLE_HEADERS.map(str::to_string);
    let separator = widths.map(|width| "-".repeat(width));

    let mut table = String::new();
    for row in [&header, &separator].into_iter().chain(rows.iter()) {
        table.push_str(&format_row(row, &widths));
        table.push('\n');
    }
    table
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}
