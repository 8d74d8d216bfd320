use std::path::PathBuf;

use crate::error::Result;
use crate::models::{PoolSelection, ProblemId, RunSummary};
use crate::runner::{run_problem, validate_build_dir, ArtifactLayout, RunSettings};

use super::{report, Context};

fn settings(ctx: &Context, build_dir: Option<PathBuf>) -> Result<RunSettings> {
    match build_dir.or_else(|| ctx.config.build_dir.clone()) {
        Some(build_dir) => {
            validate_build_dir(&build_dir, &ctx.config.build_marker)?;
            Ok(RunSettings {
                library_path: vec![build_dir.join("libeuler")],
                layout: ArtifactLayout::Mirrored { build_dir },
                library_path_var: ctx.config.library_path_var.clone(),
            })
        }
        None => Ok(RunSettings {
            layout: ArtifactLayout::InTree,
            library_path: ctx.config.lib_dirs(ctx.workspace.root()),
            library_path_var: ctx.config.library_path_var.clone(),
        }),
    }
}

/// Runs the selection, printing each result as it finishes. Returns the
/// timing summary only for an unqualified run over the pools.
pub fn run_all(
    ctx: &Context,
    number: Option<ProblemId>,
    build_dir: Option<PathBuf>,
    pool: PoolSelection,
) -> Result<Option<RunSummary>> {
    let settings = settings(ctx, build_dir)?;

    let mut times = Vec::new();
    for id in ctx.select(number, pool)? {
        ctx.interrupt.check()?;
        match run_problem(&ctx.workspace, id, &settings, &ctx.interrupt) {
            Ok(result) => {
                print!("{}", result.output);
                if !result.output.is_empty() && !result.output.ends_with('\n') {
                    println!();
                }
                if !result.success() {
                    let code = result
                        .exit_code
                        .map_or_else(|| "none".to_string(), |c| c.to_string());
                    eprintln!("ERROR: Problem {} exited with code {}", result.id, code);
                }
                println!("{} ms", result.elapsed_ms);
                println!();
                times.push(result.elapsed_ms);
            }
            Err(e) => report(e)?,
        }
    }

    if number.is_some() {
        return Ok(None);
    }
    Ok(RunSummary::from_times(&times))
}

pub fn run(
    ctx: &Context,
    number: Option<ProblemId>,
    build_dir: Option<PathBuf>,
    pool: PoolSelection,
) -> Result<()> {
    if let Some(summary) = run_all(ctx, number, build_dir, pool)? {
        println!("{}", summary);
    }
    Ok(())
}
