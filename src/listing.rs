use std::io::{self, Write};

use crate::host_table::model::{HostRecord, HostTable};
use crate::users::UserTable;

/// Aliases printed per row.
const COLUMNS: usize = 7;

/// Print aliases left-justified to a shared width, `COLUMNS` per row.
fn write_columns(out: &mut dyn Write, aliases: &[&str]) -> io::Result<()> {
    let width = aliases.iter().map(|a| a.len()).max().unwrap_or(0) + 1;
    for (i, alias) in aliases.iter().enumerate() {
        write!(out, "{:<width$}", alias, width = width)?;
        if (i + 1) % COLUMNS == 0 {
            writeln!(out)?;
        }
    }
    if aliases.len() % COLUMNS != 0 {
        writeln!(out)?;
    }
    Ok(())
}

/// Physical aliases, then virtual aliases, each sorted.
pub fn write_hosts(out: &mut dyn Write, hosts: &HostTable) -> io::Result<()> {
    writeln!(out, "Supported phost:")?;
    write_columns(out, &hosts.physical_aliases())?;
    writeln!(out, "\nSupported vhost:")?;
    write_columns(out, &hosts.virtual_aliases())
}

pub fn write_users(out: &mut dyn Write, users: &UserTable) -> io::Result<()> {
    writeln!(out, "Supported user shortcut:")?;
    for (shortcut, user) in users.iter() {
        writeln!(out, "{} {}", shortcut, user)?;
    }
    Ok(())
}

pub fn write_alias(out: &mut dyn Write, record: &HostRecord) -> io::Result<()> {
    writeln!(out, "addr  : {}", record.address)?;
    writeln!(out, "port  : {}", record.port)?;
    writeln!(out, "phost : {}", record.parent_host)?;
    writeln!(out, "domain: {}", record.domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host_table::model::RawHostRecord;

    fn physical(alias: &str) -> RawHostRecord {
        RawHostRecord {
            host: alias.to_string(),
            addr: "10.0.0.1".to_string(),
            port: "22".to_string(),
            domain: String::new(),
            phost: alias.to_string(),
        }
    }

    fn guest(alias: &str, parent: &str) -> RawHostRecord {
        RawHostRecord {
            host: alias.to_string(),
            addr: "10.0.0.1".to_string(),
            port: "2201".to_string(),
            domain: format!("{}-{}", parent, alias),
            phost: parent.to_string(),
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_hosts_listing() {
        let table = HostTable::from_records(vec![
            physical("hb"),
            guest("v2", "ha"),
            physical("ha"),
            guest("v10", "ha"),
        ]);
        let output = render(|out| write_hosts(out, &table));
        assert_eq!(
            output,
            "Supported phost:\nha hb \n\nSupported vhost:\nv10 v2  \n"
        );
    }

    #[test]
    fn test_hosts_listing_wraps_after_seven() {
        let table = HostTable::from_records((1..=8).map(|i| physical(&format!("h{}", i))));
        let output = render(|out| write_hosts(out, &table));
        assert_eq!(
            output,
            "Supported phost:\nh1 h2 h3 h4 h5 h6 h7 \nh8 \n\nSupported vhost:\n"
        );
    }

    #[test]
    fn test_hosts_listing_exact_row_has_no_extra_newline() {
        let table = HostTable::from_records((1..=7).map(|i| physical(&format!("h{}", i))));
        let output = render(|out| write_hosts(out, &table));
        assert!(output.starts_with("Supported phost:\nh1 h2 h3 h4 h5 h6 h7 \n\nSupported vhost:"));
    }

    #[test]
    fn test_empty_table_listing() {
        let output = render(|out| write_hosts(out, &HostTable::default()));
        assert_eq!(output, "Supported phost:\n\nSupported vhost:\n");
    }

    #[test]
    fn test_users_listing() {
        let output = render(|out| write_users(out, &UserTable::builtin()));
        assert_eq!(
            output,
            "Supported user shortcut:\nm mulisu\nr root\nu ubuntu\n"
        );
    }

    #[test]
    fn test_alias_detail_with_empty_domain() {
        let record = HostRecord {
            address: "1.2.3.4".to_string(),
            port: "22".to_string(),
            domain: String::new(),
            parent_host: "h1".to_string(),
        };
        let output = render(|out| write_alias(out, &record));
        assert_eq!(
            output,
            "addr  : 1.2.3.4\nport  : 22\nphost : h1\ndomain: \n"
        );
    }
}
