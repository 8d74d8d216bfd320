use crate::cleaner::{clean_problem, CleanOutcome};
use crate::error::Result;
use crate::models::{PoolSelection, ProblemId};

use super::{report, Context};

pub fn clean(ctx: &Context, number: Option<ProblemId>, pool: PoolSelection) -> Result<()> {
    for id in ctx.select(number, pool)? {
        ctx.interrupt.check()?;
        match clean_problem(&ctx.workspace, id) {
            Ok(CleanOutcome::Removed(path)) => println!("Removed {}", path.display()),
            Ok(CleanOutcome::AlreadyClean | CleanOutcome::UnknownProblem) => {}
            Err(e) => report(e)?,
        }
    }
    Ok(())
}
