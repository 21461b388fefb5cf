use crate::core::{
    command_init::ProjjContext,
    error::{ProjjError, Result},
    hooks::run_hook,
    index::IndexEntry,
    print_success,
    process::{self, shell_quote, CommandOptions},
    url::{cache_key, normalize_url},
};
use std::io::{self, Write};

/// Environment variable git uses to find its ssh wrapper
const GIT_SSH_ENV: &str = "GIT_SSH";

pub fn execute_add(url: &str) -> Result<()> {
    let mut ctx = ProjjContext::from_env()?;
    let mut stdout = io::stdout();

    let key = add_repository(&mut ctx, url, &mut stdout)?;

    print_success(&format!(
        "Added {} to {}",
        key,
        ctx.config.repo_path(&key).display()
    ));
    Ok(())
}

/// Clone `url` under the base directory and record it in the index.
///
/// Steps run in order and the first failure stops the sequence:
/// `preadd` hook, `git clone`, index update and dump, `postadd` hook.
/// Nothing is rolled back; a failing `postadd` leaves the repository cloned and indexed.
pub fn add_repository(ctx: &mut ProjjContext, url: &str, sink: &mut dyn Write) -> Result<String> {
    let key = cache_key(url, &ctx.config.alias)?;
    let repo = normalize_url(url, &ctx.config.alias);
    let target = ctx.config.repo_path(&key);
    log::debug!("Adding {repo} as {key}");

    if ctx.index.contains(&key)? || target.exists() {
        return Err(ProjjError::repository_exists(&key, &target));
    }

    run_hook(ctx, "preadd", &key, sink)?;

    log::info!("Cloning {} into {}", repo, target.display());
    let clone = format!(
        "git clone {} {}",
        shell_quote(&repo),
        shell_quote(&target.to_string_lossy())
    );
    let options = CommandOptions::default().with_env(
        GIT_SSH_ENV,
        ctx.home.ssh_helper().to_string_lossy().into_owned(),
    );
    process::run(&clone, &options, sink)?;

    ctx.index.set(key.clone(), IndexEntry::new(repo))?;
    ctx.index.dump()?;

    if let Err(e) = run_hook(ctx, "postadd", &key, sink) {
        log::warn!("{key} is cloned and indexed, but the postadd hook failed");
        return Err(e);
    }

    Ok(key)
}
