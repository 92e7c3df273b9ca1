use crate::GlobalOpts;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use omni_config::Config;
use omni_logger as logger;
use omni_pbxproj::{
    fix_duplicate_build_files, preview_duplicate_build_files, DedupReport, PbxprojError,
};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct DedupCommand {
    /// Path to the project.pbxproj file (default: config `project-path`)
    pub project: Option<PathBuf>,

    /// Report duplicates without creating a backup or writing the file
    #[arg(long)]
    pub dry_run: bool,
}

fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(project) = project {
        return Ok(project);
    }

    let config = Config::load().context("Failed to load config")?;
    config.project_path.map(PathBuf::from).ok_or_else(|| {
        anyhow!(
            "No project file given. Pass a path or run `omni config set project-path <path>`"
        )
    })
}

pub fn handle_dedup(cmd: DedupCommand, _opts: &GlobalOpts) -> Result<()> {
    let project = resolve_project_path(cmd.project)?;

    if !project.is_file() {
        return Err(PbxprojError::ProjectNotFound(project).into());
    }

    println!("Processing: {}", project.display());

    if cmd.dry_run {
        let report = preview_duplicate_build_files(&project)
            .with_context(|| format!("Failed to scan {}", project.display()))?;
        for name in &report.removed {
            println!("  Would remove duplicate: {}", name);
        }
        println!();
        println!("Total duplicates found: {}", report.duplicates_removed());
        logger::info("Dry run: project file left unchanged");
        return Ok(());
    }

    let report = fix_duplicate_build_files(&project)?;
    print_report(&report);
    logger::success("Done! Rebuild the project to verify the fix.");
    Ok(())
}

fn print_report(report: &DedupReport) {
    if let Some(backup) = &report.backup {
        println!("Created backup: {}", backup.display());
    }
    for name in &report.removed {
        println!("  Removing duplicate: {}", name);
    }
    println!();
    println!("Total duplicates removed: {}", report.duplicates_removed());
    println!("Fixed project file: {}", report.project.display());
    if let Some(backup) = &report.backup {
        println!("Backup saved as: {}", backup.display());
    }
}
