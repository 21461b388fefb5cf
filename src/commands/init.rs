use crate::core::{command_init::ProjjContext, error::Result, print_info, print_success};

pub fn execute_init() -> Result<()> {
    let mut ctx = ProjjContext::from_env()?;
    let count = ctx.index.entries()?.len();

    print_success(&format!("Base directory: {}", ctx.config.base.display()));
    print_info(&format!("Config file: {}", ctx.home.config_file().display()));
    print_info(&format!("Indexed repositories: {count}"));
    Ok(())
}
