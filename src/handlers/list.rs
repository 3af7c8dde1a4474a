use anyhow::Result;
use colored::*;
use vnsh::engine::{Registry, register_builtins};

pub fn handle_list() -> Result<()> {
    let mut registry = Registry::new();
    register_builtins(&mut registry)?;

    println!("{}", "Available Commands:".bold().underline());

    let max_len = registry
        .descriptors()
        .map(|d| d.display_name().len())
        .max()
        .unwrap_or(0);

    // Registry iterates in canonical-name order.
    for descriptor in registry.descriptors() {
        let name = descriptor.display_name();
        let syntax = descriptor.syntax();
        let params = syntax.strip_prefix(name.as_str()).unwrap_or(&syntax).trim_start();
        let padding = " ".repeat(max_len - name.len() + 2);
        println!("  {}{}{}", name.cyan(), padding, params.italic());
    }

    Ok(())
}
