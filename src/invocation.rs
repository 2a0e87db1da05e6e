use std::fmt;

use crate::host_table::model::HostRecord;

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    /// stdin, stdout and stderr inherited.
    Interactive,
    /// stdout and stderr inherited, stdin detached.
    OutputOnly,
}

/// A fully built external command, ready to hand to a `Spawner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub io: IoMode,
}

impl Invocation {
    fn new<I, S>(program: &str, args: I, io: IoMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            io,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', "'\\''"))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// libvirt connection URI for the system instance on a hypervisor.
pub fn connection_uri(user: &str, host: &HostRecord) -> String {
    format!("qemu+ssh://{}@{}:{}/system", user, host.address, host.port)
}

fn login(user: &str, host: &HostRecord) -> String {
    format!("{}@{}", user, host.address)
}

/// `virsh -c <uri> list --all` against a physical host.
pub fn virsh_list(physical: &HostRecord, user: &str) -> Invocation {
    Invocation::new(
        "virsh",
        [
            "-c".to_string(),
            connection_uri(user, physical),
            "list".to_string(),
            "--all".to_string(),
        ],
        IoMode::OutputOnly,
    )
}

/// Interactive `virsh` shell on a physical host.
pub fn virsh_shell(physical: &HostRecord, user: &str) -> Invocation {
    Invocation::new(
        "virsh",
        ["-c".to_string(), connection_uri(user, physical)],
        IoMode::Interactive,
    )
}

/// `virt-viewer` for `domain`, reached through its physical host.
pub fn virt_viewer(physical: &HostRecord, domain: &str, user: &str) -> Invocation {
    Invocation::new(
        "virt-viewer",
        [
            "-c".to_string(),
            connection_uri(user, physical),
            domain.to_string(),
        ],
        IoMode::Interactive,
    )
}

/// `ssh -X -p <port> user@addr [command]`.
pub fn ssh(host: &HostRecord, user: &str, remote_command: Option<&str>) -> Invocation {
    let mut args = vec![
        "-X".to_string(),
        "-p".to_string(),
        host.port.clone(),
        login(user, host),
    ];
    if let Some(command) = remote_command {
        args.push(command.to_string());
    }
    Invocation::new("ssh", args, IoMode::Interactive)
}

/// `scp -P <port> <files...> user@addr:`.
pub fn scp<S: AsRef<str>>(host: &HostRecord, user: &str, files: &[S]) -> Invocation {
    let mut args = vec!["-P".to_string(), host.port.clone()];
    args.extend(files.iter().map(|f| f.as_ref().to_string()));
    args.push(format!("{}:", login(user, host)));
    Invocation::new("scp", args, IoMode::Interactive)
}

/// `ssh-copy-id -p <port> user@addr`.
pub fn ssh_copy_id(host: &HostRecord, user: &str) -> Invocation {
    Invocation::new(
        "ssh-copy-id",
        ["-p".to_string(), host.port.clone(), login(user, host)],
        IoMode::Interactive,
    )
}
