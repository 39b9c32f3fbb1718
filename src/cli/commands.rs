//! Command dispatch: wires CLI arguments to the query facade

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::debug;

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{parse_id_list, LocaleId};
use crate::infrastructure::catalog::load_catalog;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{SelectionItem, Selector, SkimSelector};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { ids }) => cmd_tree(cli, ids),
        Some(Commands::Children { id }) => cmd_children(cli, *id),
        Some(Commands::Roots { pid }) => cmd_roots(cli, *pid),
        Some(Commands::ImportKey { source, id }) => cmd_import_key(cli, source, id),
        Some(Commands::Select) => cmd_select(cli),
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "rscat", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Everything one request needs: the wired services plus the locale and
/// scope resolved once at this boundary.
struct RequestContext {
    container: ServiceContainer,
    locale: LocaleId,
    scope: Option<String>,
}

fn request_context(cli: &Cli) -> CliResult<RequestContext> {
    let settings = Settings::load().map_err(InfraError::Application)?;

    let catalog_path: PathBuf = cli
        .data
        .clone()
        .or_else(|| settings.catalog.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no catalog file: pass --data <file> or set catalog in config".to_string(),
            )
        })?;
    let records = load_catalog(&catalog_path).map_err(InfraError::Catalog)?;
    debug!(
        "loaded {} record(s) from {}",
        records.len(),
        catalog_path.display()
    );

    let locale = cli.locale.unwrap_or(settings.locale);
    let scope = cli.scope.clone().or_else(|| settings.scope.clone());
    let container = ServiceContainer::new(settings, records);

    Ok(RequestContext {
        container,
        locale,
        scope,
    })
}

fn cmd_tree(cli: &Cli, ids: &str) -> CliResult<()> {
    let roots = parse_id_list(ids);
    if roots.is_empty() {
        return Err(CliError::InvalidArgs(format!(
            "no valid category ids in {ids:?}"
        )));
    }

    let ctx = request_context(cli)?;
    let forest = ctx
        .container
        .categories
        .find_tree(&roots, ctx.scope.as_deref(), ctx.locale)
        .map_err(InfraError::Application)?;

    if forest.is_empty() {
        output::warning("no categories found");
    } else {
        print!("{}", output::render_forest(&forest));
    }
    Ok(())
}

fn cmd_children(cli: &Cli, id: u64) -> CliResult<()> {
    let ctx = request_context(cli)?;
    let children = ctx
        .container
        .categories
        .find_children(id)
        .map_err(InfraError::Application)?;

    for child in &children {
        output::info(&output::category_line(child));
    }
    Ok(())
}

fn cmd_roots(cli: &Cli, pid: u64) -> CliResult<()> {
    let ctx = request_context(cli)?;
    let roots = ctx
        .container
        .categories
        .find_root_categories(pid)
        .map_err(InfraError::Application)?;

    for root in &roots {
        output::info(&output::category_line(root));
    }
    Ok(())
}

fn cmd_import_key(cli: &Cli, source: &str, id: &str) -> CliResult<()> {
    let ctx = request_context(cli)?;
    let found = ctx
        .container
        .categories
        .find_by_import_key(source, id)
        .map_err(InfraError::Application)?;

    match found {
        Some(category) => output::info(&output::category_line(&category)),
        None => output::warning(&format!("no category for import key {source}:{id}")),
    }
    Ok(())
}

fn cmd_select(cli: &Cli) -> CliResult<()> {
    use crate::domain::{CategoryFilter, FetchOrdering};

    let ctx = request_context(cli)?;
    let all = ctx
        .container
        .store
        .fetch(&CategoryFilter::new(), FetchOrdering::SortOrderAscending)
        .map_err(|e| InfraError::Application(e.into()))?;

    let items: Vec<SelectionItem> = all
        .iter()
        .map(|c| SelectionItem {
            display: format!("{} (pid {})", output::category_line(c), c.pid),
            value: c.id.to_string(),
        })
        .collect();

    let selected = SkimSelector
        .select_one(&items, "category> ")
        .map_err(CliError::InvalidArgs)?;

    let Some(selected) = selected else {
        return Ok(());
    };
    let roots = parse_id_list(&selected.value);
    if roots.is_empty() {
        return Ok(());
    }

    let forest = ctx
        .container
        .categories
        .find_tree(&roots, ctx.scope.as_deref(), ctx.locale)
        .map_err(InfraError::Application)?;
    print!("{}", output::render_forest(&forest));
    Ok(())
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load().map_err(InfraError::Application)?;
            let toml = settings.to_toml().map_err(InfraError::Application)?;
            print!("{toml}");
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory available"),
            }
            Ok(())
        }
        ConfigCommands::Init => {
            let Some(path) = global_config_path() else {
                return Err(CliError::Usage(
                    "no config directory available".to_string(),
                ));
            };
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}
