use anyhow::{Context, Result};

use snipdeck::controller::Controller;
use snipdeck::gate::{DELETE_CONFIRMATION, DeleteGate, GateOutcome, INCORRECT_MESSAGE};
use snipdeck::model::{LANGUAGES, ProjectId, SnippetId, StoreConfig, language_label};
use snipdeck::remote::RestClient;
use snipdeck::settings::{ConfigDir, mask_key};

use crate::{Commands, ConfigCommands, ProjectCommands, SnippetCommands};

pub(crate) fn handle_command(command: Commands, flags: StoreConfig) -> Result<()> {
    match command {
        Commands::Config { command } => handle_config_command(command),
        Commands::Project { command } => handle_project_command(command, flags),
        Commands::Snippet { command } => handle_snippet_command(command, flags),
    }
}

fn connect(flags: StoreConfig) -> Result<Controller<RestClient>> {
    let dir = ConfigDir::discover()?;
    let remote = crate::cli_runtime::resolve_with(&dir, flags)?;
    let client = RestClient::new(remote).context("create store client")?;
    Ok(Controller::new(client))
}

/// Load projects and select `id`, failing when it does not exist.
fn select(controller: &mut Controller<RestClient>, id: &str) -> Result<()> {
    controller.load_projects()?;
    let errors_before = controller.notices().errors();
    if !controller.ensure_selected(&ProjectId::from(id)) {
        anyhow::bail!("no project with id {}", id);
    }
    if controller.notices().errors() > errors_before
        && let Some(n) = controller.notices().latest()
    {
        anyhow::bail!("{}", n.message);
    }
    Ok(())
}

fn handle_project_command(command: ProjectCommands, flags: StoreConfig) -> Result<()> {
    let mut controller = connect(flags)?;
    match command {
        ProjectCommands::List { json } => {
            controller.load_projects()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(controller.projects())
                        .context("serialize projects json")?
                );
            } else if controller.projects().is_empty() {
                println!("No projects yet");
            } else {
                for p in controller.projects() {
                    match p.description() {
                        Some(d) => println!("{} {} {} - {}", p.id, p.created_at, p.name, d),
                        None => println!("{} {} {}", p.id, p.created_at, p.name),
                    }
                }
            }
        }
        ProjectCommands::Add {
            name,
            description,
            json,
        } => {
            controller.add_project(&name, &description)?;
            let created = controller
                .selected()
                .context("created project missing from state")?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(created).context("serialize project json")?
                );
            } else {
                println!("{}", created.id);
            }
        }
        ProjectCommands::Edit {
            id,
            name,
            description,
        } => {
            select(&mut controller, &id)?;
            let description = match description {
                Some(d) => d,
                None => controller
                    .selected()
                    .and_then(|p| p.description())
                    .unwrap_or_default()
                    .to_string(),
            };
            controller.edit_project(&name, &description)?;
            println!("Saved {}", id);
        }
        ProjectCommands::Delete { id, confirm } => {
            select(&mut controller, &id)?;
            let mut gate = DeleteGate::new();
            gate.set_input(&confirm);
            match gate.submit(|| controller.delete_project()) {
                GateOutcome::Confirmed(res) => res?,
                GateOutcome::Rejected => anyhow::bail!(
                    "{} (pass `--confirm {}` to delete the project and its snippets)",
                    INCORRECT_MESSAGE,
                    DELETE_CONFIRMATION
                ),
            }
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn handle_snippet_command(command: SnippetCommands, flags: StoreConfig) -> Result<()> {
    if let SnippetCommands::Languages = command {
        for tag in LANGUAGES {
            println!("{:<12} {}", tag, language_label(tag));
        }
        return Ok(());
    }

    let mut controller = connect(flags)?;
    match command {
        SnippetCommands::List { project, json } => {
            select(&mut controller, &project)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(controller.snippets())
                        .context("serialize snippets json")?
                );
            } else if controller.snippets().is_empty() {
                println!("No code snippets yet");
            } else {
                for s in controller.snippets() {
                    println!(
                        "{} {} {} [{}]",
                        s.id,
                        s.created_at,
                        s.title,
                        language_label(&s.language)
                    );
                }
            }
        }
        SnippetCommands::Add {
            project,
            title,
            language,
            code,
            file,
            json,
        } => {
            let code = match (code, file) {
                (Some(code), _) => code,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                (None, None) => anyhow::bail!("one of --code or --file is required"),
            };
            if !LANGUAGES.contains(&language.as_str()) {
                tracing::warn!(language = %language, "unknown language tag");
            }
            select(&mut controller, &project)?;
            controller.add_snippet(&title, &code, &language)?;
            let created = controller
                .snippets()
                .first()
                .context("created snippet missing from state")?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(created).context("serialize snippet json")?
                );
            } else {
                println!("{}", created.id);
            }
        }
        SnippetCommands::Delete { id } => {
            controller.delete_snippet(&SnippetId::from(id.as_str()))?;
            println!("Deleted {}", id);
        }
        SnippetCommands::Languages => {}
    }
    Ok(())
}

fn handle_config_command(command: ConfigCommands) -> Result<()> {
    let dir = ConfigDir::discover()?;
    match command {
        ConfigCommands::Show { json } => {
            let cfg = dir.read_config()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg).context("serialize config json")?
                );
            } else {
                println!("file: {}", dir.path().display());
                println!("url: {}", cfg.base_url.as_deref().unwrap_or("(unset)"));
                let key = cfg
                    .api_key
                    .as_deref()
                    .map(mask_key)
                    .unwrap_or_else(|| "(unset)".to_string());
                println!("key: {}", key);
            }
        }
        ConfigCommands::Set { url, key } => {
            let cfg = StoreConfig {
                base_url: Some(url),
                api_key: Some(key),
            };
            // Reject unusable values before they reach the file.
            let remote = snipdeck::settings::resolve(
                StoreConfig::default(),
                StoreConfig::default(),
                cfg,
            )?;
            dir.write_config(&StoreConfig {
                base_url: Some(remote.base_url),
                api_key: Some(remote.api_key),
            })?;
            println!("Store configured ({})", dir.path().display());
        }
    }
    Ok(())
}
