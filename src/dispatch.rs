use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::{self, Cli, Command};
use crate::error::{Fallback, Result, VtError};
use crate::host_table::model::{HostRecord, HostTable};
use crate::invocation::{self, Invocation};
use crate::listing;
use crate::runner::Spawner;
use crate::users::UserTable;

/// What a command turns into once its alias and user are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<'a> {
    ListHosts,
    ShowAlias(&'a HostRecord),
    Run(Invocation),
    Completions(Shell),
}

/// How the process should finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A child ran; exit with its code.
    Exited(i32),
}

/// Read-only state for one run.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    pub hosts: &'a HostTable,
    pub users: &'a UserTable,
    pub prog: &'a str,
}

impl<'a> Session<'a> {
    pub fn new(hosts: &'a HostTable, users: &'a UserTable, prog: &'a str) -> Self {
        Session { hosts, users, prog }
    }

    fn lookup(&self, alias: &str) -> Result<&'a HostRecord> {
        self.hosts
            .get(alias)
            .ok_or_else(|| VtError::UnknownAlias(alias.to_string()))
    }

    /// Resolve a command into a step without touching the outside world.
    /// The alias is checked first, then arity, then the user shortcut.
    pub fn plan(&self, command: &Command) -> Result<Step<'a>> {
        match command {
            Command::Ls { alias: None } => Ok(Step::ListHosts),
            Command::Completions { shell } => Ok(Step::Completions(*shell)),
            Command::Ls { alias: Some(alias) } => {
                let record = self.lookup(alias)?;
                let physical = self.hosts.resolve_physical(record);
                let user = self.users.default_user()?;
                Ok(Step::Run(invocation::virsh_list(physical, user)))
            }
            Command::Go { alias } => {
                let record = self.lookup(alias)?;
                let physical = self.hosts.resolve_physical(record);
                let user = self.users.default_user()?;
                Ok(Step::Run(invocation::virsh_shell(physical, user)))
            }
            Command::View { alias } => {
                let record = self.lookup(alias)?;
                if record.is_physical() {
                    return Err(VtError::NotVirtual(alias.clone()));
                }
                let physical = self.hosts.resolve_physical(record);
                let user = self.users.default_user()?;
                Ok(Step::Run(invocation::virt_viewer(
                    physical,
                    &record.domain,
                    user,
                )))
            }
            Command::Ssh {
                alias,
                user,
                remote_command,
            } => {
                let record = self.lookup(alias)?;
                let shortcut = user.as_deref().ok_or(VtError::Arity("ssh"))?;
                let user = self.users.resolve(shortcut)?;
                Ok(Step::Run(invocation::ssh(
                    record,
                    user,
                    remote_command.as_deref(),
                )))
            }
            Command::Alias { alias } => Ok(Step::ShowAlias(self.lookup(alias)?)),
            Command::Copy { alias, user, files } => {
                let record = self.lookup(alias)?;
                let shortcut = match user.as_deref() {
                    Some(shortcut) if !files.is_empty() => shortcut,
                    _ => return Err(VtError::Arity("copy")),
                };
                let user = self.users.resolve(shortcut)?;
                Ok(Step::Run(invocation::scp(record, user, files.as_slice())))
            }
            Command::CopyId { alias, user } => {
                let record = self.lookup(alias)?;
                let shortcut = user.as_deref().ok_or(VtError::Arity("copy-id"))?;
                let user = self.users.resolve(shortcut)?;
                Ok(Step::Run(invocation::ssh_copy_id(record, user)))
            }
        }
    }

    /// Plan and carry out a command, printing to `out`.
    /// Only I/O errors on `out` are returned; everything else is reported.
    pub fn dispatch(
        &self,
        command: &Command,
        spawner: &mut dyn Spawner,
        out: &mut dyn Write,
    ) -> io::Result<Outcome> {
        match self.plan(command) {
            Ok(step) => self.execute(step, spawner, out),
            Err(err) => {
                log::debug!("{}", err);
                self.fall_back(&err, out)?;
                Ok(Outcome::Done)
            }
        }
    }

    fn execute(
        &self,
        step: Step<'a>,
        spawner: &mut dyn Spawner,
        out: &mut dyn Write,
    ) -> io::Result<Outcome> {
        match step {
            Step::ListHosts => listing::write_hosts(out, self.hosts)?,
            Step::ShowAlias(record) => listing::write_alias(out, record)?,
            Step::Completions(shell) => {
                generate(shell, &mut Cli::command(), self.prog, out);
            }
            Step::Run(invocation) => return self.run(&invocation, spawner, out),
        }
        Ok(Outcome::Done)
    }

    fn run(
        &self,
        invocation: &Invocation,
        spawner: &mut dyn Spawner,
        out: &mut dyn Write,
    ) -> io::Result<Outcome> {
        log::debug!("running {}", invocation);
        out.flush()?;
        match spawner.spawn(invocation) {
            Ok(0) => Ok(Outcome::Exited(0)),
            Ok(code) => {
                let err = VtError::ChildProcess {
                    program: invocation.program.clone(),
                    reason: format!("exited with status {}", code),
                };
                self.fall_back(&err, out)?;
                Ok(Outcome::Exited(code))
            }
            Err(e) => {
                let err = VtError::ChildProcess {
                    program: invocation.program.clone(),
                    reason: format!("failed to start: {}", e),
                };
                self.fall_back(&err, out)?;
                Ok(Outcome::Done)
            }
        }
    }

    fn fall_back(&self, err: &VtError, out: &mut dyn Write) -> io::Result<()> {
        match err.fallback() {
            Some(Fallback::HostListing) => listing::write_hosts(out, self.hosts),
            Some(Fallback::UserListing) => listing::write_users(out, self.users),
            Some(Fallback::Usage) => {
                if let VtError::ChildProcess { .. } = err {
                    writeln!(out, "error: {}", err)?;
                }
                write!(out, "{}", cli::usage(self.prog))
            }
            None => writeln!(out, "{}", err),
        }
    }
}
