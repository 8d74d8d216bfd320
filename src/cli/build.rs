use crate::builder::build_problem;
use crate::error::Result;
use crate::models::{BuildConfiguration, PoolSelection, ProblemId, Profile};

use super::{report, Context};

pub fn build(
    ctx: &Context,
    number: Option<ProblemId>,
    debug: bool,
    verbose: bool,
    pool: PoolSelection,
) -> Result<()> {
    let profile = Profile::from_debug_flag(debug);
    let config = BuildConfiguration::for_profile(profile, &ctx.config, ctx.workspace.root());
    let problems = ctx.select(number, pool)?;

    tracing::info!(profile = profile.display_name(), count = problems.len(), "building problems");

    let mut failed = 0;
    for id in problems {
        ctx.interrupt.check()?;
        match build_problem(&ctx.workspace, id, &config, verbose, &ctx.interrupt) {
            Ok(out) => tracing::debug!(
                problem = %id,
                artifact = %out.artifact.display(),
                lines = out.output.lines().count(),
                "built"
            ),
            Err(e) => {
                failed += 1;
                report(e)?;
            }
        }
    }

    if failed > 0 {
        eprintln!("Build failed for {} problem(s)!", failed);
    }
    Ok(())
}
