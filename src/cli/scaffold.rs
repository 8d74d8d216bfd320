use crate::error::{HarnessError, Result};
use crate::models::ProblemId;
use crate::scaffold::create_problem;

use super::Context;

pub fn scaffold(ctx: &Context, number: ProblemId) -> Result<()> {
    match create_problem(&ctx.workspace, number) {
        Ok(location) => {
            println!("Created problem {} at {}", number, location.path.display());
            Ok(())
        }
        Err(e @ (HarnessError::ProblemExists { .. } | HarnessError::InvalidProblemNumber(_))) => {
            eprintln!("FATAL: {}", e);
            eprintln!("Creating problem failed!");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
