//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::TreeSession;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{age_label, ordinal_label, FamilyGraph, FamilyMember, FamilyTree, MemberId};
use crate::infrastructure::di::ServiceContainer;
use crate::tree_traits::NodeLabeler;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    let local_dir = local_config_dir(cli.config_dir.as_deref(), command.snapshot());
    let settings = Settings::load(local_dir.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { snapshot, root } => cmd_tree(&container, snapshot, root.as_deref()),
        Commands::Root { snapshot } => cmd_root(&container, snapshot),
        Commands::Info { snapshot, id } => cmd_info(&container, snapshot, id),
        Commands::Navigate { snapshot, steps } => cmd_navigate(&container, snapshot, steps),
        Commands::Branches { snapshot, root } => {
            cmd_branches(&container, snapshot, root.as_deref())
        }
        Commands::Config { command } => cmd_config(&container, command, local_dir.as_deref()),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// `-C` wins; otherwise the directory of the snapshot file.
fn local_config_dir(explicit: Option<&Path>, snapshot: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        snapshot
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    })
}

fn print_tree(container: &ServiceContainer, tree: &FamilyTree) {
    let labeler = NodeLabeler::new(container.settings.display.clone());
    output::info(&labeler.render(tree));
    for pruned in tree.pruned() {
        output::warning(&format!(
            "cycle: {} is an ancestor of {}, branch omitted",
            pruned.child, pruned.parent
        ));
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, snapshot: &Path, root: Option<&str>) -> CliResult<()> {
    let mut session = container.open_session(snapshot, root)?;
    match session.current_tree()? {
        Some(tree) => print_tree(container, &tree),
        None => output::warning("snapshot has no members, nothing to show"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_root(container: &ServiceContainer, snapshot: &Path) -> CliResult<()> {
    let session = container.open_session(snapshot, None)?;
    let root = session
        .default_root()
        .and_then(|id| session.graph().member(id.as_str()));
    match root {
        Some(member) => output::action(member.id.as_str(), member),
        None => output::warning("snapshot has no members, no root available"),
    }
    Ok(())
}

/// Detail lines shown by `info`: gender, age, spouse, birth order per parent,
/// children and notes.
fn member_details(graph: &FamilyGraph, member: &FamilyMember, today: NaiveDate) -> Vec<String> {
    let id = member.id.as_str();
    let mut lines = vec![format!("gender: {}", member.gender)];
    lines.push(match member.birth_date {
        Some(birth) => format!("age: {}", age_label(birth, member.death_date, today)),
        None if member.is_deceased() => "age: unknown (deceased)".to_string(),
        None => "age: unknown".to_string(),
    });
    if let Some(spouse) = graph.spouse_of(id) {
        lines.push(format!("spouse: {}", spouse));
    }
    for parent in graph.parents_of(id) {
        let siblings = graph.children_of(parent.id.as_str());
        if let Some(label) = ordinal_label(id, parent, &siblings) {
            lines.push(label);
        }
    }
    let children = graph.children_of(id);
    if !children.is_empty() {
        let names: Vec<String> = children.iter().map(|c| c.display_name()).collect();
        lines.push(format!("children: {}", names.join(", ")));
    }
    if let Some(notes) = &member.notes {
        lines.push(format!("notes: {}", notes));
    }
    lines
}

#[instrument(skip(container))]
fn cmd_info(container: &ServiceContainer, snapshot: &Path, id: &str) -> CliResult<()> {
    let session = container.open_session(snapshot, None)?;
    let graph = session.graph();
    let member = graph
        .member(id)
        .ok_or_else(|| CliError::InvalidArgs(format!("unknown member id: {id}")))?;

    output::header(&format!("{} ({})", member, member.id));
    for line in member_details(graph, member, Local::now().date_naive()) {
        output::detail(&line);
    }
    Ok(())
}

/// Apply navigation steps in order: `back`, `reset`, or a member id to visit.
fn apply_steps(session: &mut TreeSession, steps: &[String]) -> CliResult<()> {
    for step in steps {
        debug!("step: {}", step);
        match step.as_str() {
            "back" => {
                if !session.can_go_back() {
                    output::warning("nothing to go back to");
                }
                session.back()?;
            }
            "reset" => {
                session.reset()?;
            }
            id => {
                session.on_node_selected(id)?;
            }
        }
    }
    Ok(())
}

fn history_line(session: &TreeSession) -> String {
    session
        .history()
        .iter()
        .map(MemberId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[instrument(skip(container))]
fn cmd_navigate(container: &ServiceContainer, snapshot: &Path, steps: &[String]) -> CliResult<()> {
    let mut session = container.open_session(snapshot, None)?;
    apply_steps(&mut session, steps)?;

    match session.current_tree()? {
        Some(tree) => print_tree(container, &tree),
        None => output::warning("snapshot has no members, nothing to show"),
    }
    output::action("history", &history_line(&session));
    output::action("can go back", &session.can_go_back());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_branches(container: &ServiceContainer, snapshot: &Path, root: Option<&str>) -> CliResult<()> {
    let mut session = container.open_session(snapshot, root)?;
    let Some(tree) = session.current_tree()? else {
        output::warning("snapshot has no members, nothing to show");
        return Ok(());
    };
    for branch in tree.branches() {
        output::info(&branch.join(" -> "));
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    local_dir: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            if let Some(dir) = local_dir {
                output::action("local", &local_config_path(dir).display());
            }
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
