use anyhow::Context;
use planner_core::store;
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing planner in: {}", root.display());

    let report =
        store::init(root).with_context(|| format!("failed to initialize {}", root.display()))?;

    for (file, created) in report {
        if created {
            println!("  created: {file}");
        } else {
            println!("  exists:  {file}");
        }
    }
    Ok(())
}
