use crate::error::Result;
use crate::models::PoolSelection;

use super::Context;

pub fn list(ctx: &Context, pool: PoolSelection) -> Result<()> {
    for &p in pool.pools() {
        for id in ctx.workspace.list(p)? {
            println!("{}  {}", id.dir_name(), p);
        }
    }
    Ok(())
}
