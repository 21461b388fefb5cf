use crate::core::{
    command_init::ProjjContext,
    error::{ProjjError, Result},
    hooks::run_hook,
};
use std::io::{self, Write};

pub fn execute_run(hook: &str) -> Result<()> {
    let mut ctx = ProjjContext::from_env()?;
    let cwd = std::env::current_dir()?;
    let mut stdout = io::stdout();

    run_configured_hook(&mut ctx, hook, &cwd.to_string_lossy(), &mut stdout)
}

/// Run `hook` for `key`, failing when the hook is not configured.
///
/// Unlike [`run_hook`], asking for an unknown hook by name is an error here.
pub fn run_configured_hook(
    ctx: &mut ProjjContext,
    hook: &str,
    key: &str,
    sink: &mut dyn Write,
) -> Result<()> {
    if ctx.config.hook_command(hook).is_none() {
        return Err(ProjjError::hook_not_found(hook));
    }
    run_hook(ctx, hook, key, sink)
}
