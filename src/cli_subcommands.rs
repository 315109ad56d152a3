use std::path::PathBuf;

use clap::{ArgGroup, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Manage code snippets
    Snippet {
        #[command(subcommand)]
        command: SnippetCommands,
    },

    /// Show or set the store endpoint
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProjectCommands {
    /// List projects, newest first
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a project
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a project or change its description
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Replaces the description; kept as is when omitted
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a project and all of its snippets
    Delete {
        #[arg(long)]
        id: String,
        /// Must be the word `delete`
        #[arg(long, value_name = "TEXT")]
        confirm: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum SnippetCommands {
    /// List the snippets of a project, newest first
    List {
        #[arg(long)]
        project: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a snippet to a project
    #[command(group(ArgGroup::new("source").required(true).args(["code", "file"])))]
    Add {
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        /// Language tag (see `snipdeck snippet languages`)
        #[arg(long, default_value = snipdeck::model::DEFAULT_LANGUAGE)]
        language: String,
        /// Snippet source text
        #[arg(long)]
        code: Option<String>,
        /// Read the snippet source from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a snippet
    Delete {
        #[arg(long)]
        id: String,
    },

    /// List the known language tags
    Languages,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the stored endpoint
    Show {
        /// Emit JSON (key unmasked)
        #[arg(long)]
        json: bool,
    },

    /// Store the endpoint in the config file
    Set {
        #[arg(long)]
        url: String,
        #[arg(long)]
        key: String,
    },
}
