use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::{self, Cli};
use crate::dispatch::{Outcome, Session};
use crate::host_table::loader;
use crate::host_table::model::HostTable;
use crate::listing;
use crate::runner::Spawner;
use crate::users::UserTable;

/// Load the host table for `prog`, printing the reason when it can't be read.
fn load_hosts(
    prog: &str,
    home: Option<&Path>,
    out: &mut dyn Write,
) -> io::Result<Option<HostTable>> {
    let Some(home) = home else {
        writeln!(out, "Could not determine home directory")?;
        return Ok(None);
    };
    let path = loader::config_path(home, prog);
    log::debug!("loading hosts from {}", path.display());
    match HostTable::load(&path) {
        Ok(hosts) => Ok(Some(hosts)),
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(None)
        }
    }
}

/// Arguments clap rejected. As with known commands, `<prog> <command> <alias>`
/// with an unknown alias prints the host listing; anything else gets usage.
fn unrecognized(
    args: &[OsString],
    prog: &str,
    home: Option<&Path>,
    out: &mut dyn Write,
) -> io::Result<Outcome> {
    let Some(hosts) = load_hosts(prog, home, out)? else {
        return Ok(Outcome::Done);
    };
    let alias = args.get(2).map(|a| a.to_string_lossy());
    match alias {
        Some(alias) if hosts.get(&alias).is_none() => listing::write_hosts(out, &hosts)?,
        _ => write!(out, "{}", cli::usage(prog))?,
    }
    Ok(Outcome::Done)
}

/// Everything `main` does after logging is set up: parse `args` (argv[0]
/// included), read the host table under `home` and dispatch.
pub fn run<I, T>(
    args: I,
    home: Option<&Path>,
    spawner: &mut dyn Spawner,
    out: &mut dyn Write,
) -> io::Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let prog = cli::program_name(args.first().cloned());

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", e.render())?;
            return Ok(Outcome::Done);
        }
        Err(e) => {
            log::debug!("{}", e.render());
            return unrecognized(&args, &prog, home, out);
        }
    };

    let users = UserTable::builtin();
    let hosts = match &cli.command {
        Some(command) if !command.needs_hosts() => HostTable::default(),
        _ => match load_hosts(&prog, home, out)? {
            Some(hosts) => hosts,
            None => return Ok(Outcome::Done),
        },
    };

    let Some(command) = cli.command else {
        write!(out, "{}", cli::usage(&prog))?;
        return Ok(Outcome::Done);
    };

    Session::new(&hosts, &users, &prog).dispatch(&command, spawner, out)
}
