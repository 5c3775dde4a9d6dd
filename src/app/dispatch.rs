use crate::cache::SummaryCache;
use crate::cli::{CacheCommands, Cli, Commands};
use crate::config::Config;
use crate::seal::{self, SealedSummary, SummaryInput, UnsealPolicy, is_valid_task_id};
use anyhow::{Context, Result, bail};
use rand::RngCore;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Secrets shorter than this are refused by `keygen`.
const MIN_SECRET_BYTES: usize = 16;
/// Upper bound for `keygen --bytes`.
const MAX_SECRET_BYTES: usize = 1024;

/// Run one CLI command, writing human-facing output to `out`.
pub fn dispatch(cli: Cli, config: &Config, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Seal {
            user,
            task,
            summary,
            summary_file,
            save,
        } => {
            let summary = read_summary(summary, summary_file.as_deref())?;
            run_seal(config, &user, &task, &summary, save, out)
        }
        Commands::Unseal {
            token,
            max_age_secs,
            user,
            task,
        } => {
            let mut policy = match max_age_secs {
                Some(secs) => UnsealPolicy::new().with_max_age(Duration::from_secs(secs)),
                None => config.unseal_policy(),
            };
            if let Some(user) = user {
                policy = policy.for_user(user);
            }
            if let Some(task) = task {
                policy = policy.for_task(task);
            }
            run_unseal(config, &token, &policy, out)
        }
        Commands::TaskId { task_id } => {
            if is_valid_task_id(&task_id) {
                writeln!(out, "valid")?;
                Ok(())
            } else {
                bail!("invalid task id: {task_id:?}")
            }
        }
        Commands::Keygen { bytes } => run_keygen(bytes, out),
        Commands::Cache { cache_command } => run_cache(config, cache_command, out),
    }
}

fn read_summary(summary: Option<String>, summary_file: Option<&Path>) -> Result<String> {
    match (summary, summary_file) {
        (Some(summary), _) => Ok(summary),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read summary file {}", path.display())),
        (None, None) => bail!("either --summary or --summary-file is required"),
    }
}

fn run_seal(
    config: &Config,
    user: &str,
    task: &str,
    summary: &str,
    save: bool,
    out: &mut impl Write,
) -> Result<()> {
    if !is_valid_task_id(task) {
        bail!("invalid task id: {task:?}");
    }

    let sealer = config.sealer()?;
    let token = sealer.seal(&SummaryInput::new(user, task, summary))?;

    if save {
        let mut cache = SummaryCache::open(config.cache_path())?;
        cache.put(task, &token)?;
    }

    writeln!(out, "{token}")?;
    Ok(())
}

fn run_unseal(
    config: &Config,
    token: &str,
    policy: &UnsealPolicy,
    out: &mut impl Write,
) -> Result<()> {
    let sealer = config.sealer()?;
    let Some(payload) = sealer.unseal_with(token, policy) else {
        bail!("invalid token");
    };
    print_payload(&payload, out)
}

fn run_keygen(bytes: usize, out: &mut impl Write) -> Result<()> {
    if bytes < MIN_SECRET_BYTES {
        bail!("refusing to generate a secret shorter than {MIN_SECRET_BYTES} bytes");
    }
    if bytes > MAX_SECRET_BYTES {
        bail!("refusing to generate a secret longer than {MAX_SECRET_BYTES} bytes");
    }
    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);
    writeln!(out, "{}", seal::codec::encode(&buf))?;
    Ok(())
}

fn run_cache(config: &Config, command: CacheCommands, out: &mut impl Write) -> Result<()> {
    let mut cache = SummaryCache::open(config.cache_path())?;

    match command {
        CacheCommands::List => {
            for task_id in cache.task_ids() {
                writeln!(out, "{task_id}")?;
            }
        }
        CacheCommands::Save { task, token } => {
            cache.put(&task, &token)?;
        }
        CacheCommands::Show { task } => {
            let sealer = config.sealer()?;
            match cache.load(&sealer, &task, &config.unseal_policy())? {
                Some(payload) => print_payload(&payload, out)?,
                None => writeln!(out, "no summary for {task}")?,
            }
        }
        CacheCommands::Remove { task } => {
            if cache.remove(&task)? {
                info!(task_id = %task, "removed sealed summary");
            } else {
                writeln!(out, "no summary for {task}")?;
            }
        }
        CacheCommands::Clear => {
            let removed = cache.len();
            cache.clear()?;
            info!(removed, "cleared summary cache");
        }
    }

    Ok(())
}

fn print_payload(payload: &SealedSummary, out: &mut impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(payload).context("Failed to render payload")?;
    writeln!(out, "{json}")?;
    Ok(())
}
