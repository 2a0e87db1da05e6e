use std::ffi::OsString;
use std::path::Path;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// Name used when argv[0] is unusable.
pub const DEFAULT_PROGRAM: &str = "vt";

#[derive(Debug, Parser)]
#[command(
    name = "vt",
    about = "Jump to libvirt hosts and their guests by alias.",
    long_about = "vt looks up an alias in ~/.config/vt.json and runs virsh, virt-viewer,\n\
                  ssh, scp or ssh-copy-id against the address and port it finds there.",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

// Arguments after the alias are optional here so that an unknown alias is
// reported before a missing user shortcut or file list.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List supported host names, or the domains on a physical host
    Ls {
        #[arg(value_name = "ALIAS")]
        alias: Option<String>,
    },
    /// Run an interactive virsh shell on the physical host
    Go {
        #[arg(value_name = "ALIAS")]
        alias: String,
    },
    /// Open virt-viewer for a virtual host
    View {
        #[arg(value_name = "VHOST")]
        alias: String,
    },
    /// Ssh to a physical or virtual host
    Ssh {
        #[arg(value_name = "ALIAS")]
        alias: String,
        /// User shortcut (r, u, m)
        #[arg(value_name = "USER")]
        user: Option<String>,
        /// Run this command instead of a login shell
        #[arg(value_name = "COMMAND", allow_hyphen_values = true)]
        remote_command: Option<String>,
    },
    /// Show address, port, parent host and domain of an alias
    Alias {
        #[arg(value_name = "ALIAS")]
        alias: String,
    },
    /// Copy local files to the remote home directory
    Copy {
        #[arg(value_name = "ALIAS")]
        alias: String,
        #[arg(value_name = "USER")]
        user: Option<String>,
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },
    /// Install your public key on a host
    #[command(name = "copy-id")]
    CopyId {
        #[arg(value_name = "ALIAS")]
        alias: String,
        #[arg(value_name = "USER")]
        user: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

impl Command {
    /// Whether the host table must be loaded before dispatching.
    pub fn needs_hosts(&self) -> bool {
        !matches!(self, Command::Completions { .. })
    }
}

fn examples(prog: &str) -> String {
    [
        format!("  {prog} ls      [phost|vhost]"),
        format!("  {prog} go      <phost|vhost>"),
        format!("  {prog} view    <vhost>"),
        format!("  {prog} ssh     <phost|vhost> <user> [command]"),
        format!("  {prog} alias   <phost|vhost>"),
        format!("  {prog} copy    <phost|vhost> <user> <files...>"),
        format!("  {prog} copy-id <phost|vhost> <user>"),
    ]
    .iter()
    .fold(String::from("Examples:"), |mut acc, line| {
        acc.push('\n');
        acc.push_str(line);
        acc
    })
}

/// Plain-text help shown whenever arguments don't add up.
pub fn usage(prog: &str) -> String {
    Cli::command()
        .bin_name(prog)
        .after_help(examples(prog))
        .render_help()
        .to_string()
}

/// Basename of argv[0]. The config file is named after it.
pub fn program_name(argv0: Option<OsString>) -> String {
    argv0
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}
