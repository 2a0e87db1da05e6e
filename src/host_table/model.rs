use std::collections::HashMap;

use serde::Deserialize;

/// One object of the JSON config array, exactly as written on disk.
///
/// ```json
/// { "host":"ha1", "addr":"203.0.113.50", "port":"2222", "domain":"", "phost":"ha1" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawHostRecord {
    pub host: String,
    pub addr: String,
    pub port: String,
    pub domain: String,
    pub phost: String,
}

/// Connection coordinates for an alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostRecord {
    pub address: String,
    pub port: String,
    /// libvirt domain name. Empty for physical hosts.
    pub domain: String,
    /// Alias of the physical host running this entry (itself for physical hosts).
    pub parent_host: String,
}

impl HostRecord {
    /// A record without a domain is a physical machine.
    pub fn is_physical(&self) -> bool {
        self.domain.is_empty()
    }

    pub fn is_virtual(&self) -> bool {
        !self.is_physical()
    }
}

impl From<RawHostRecord> for HostRecord {
    fn from(raw: RawHostRecord) -> Self {
        HostRecord {
            address: raw.addr,
            port: raw.port,
            domain: raw.domain,
            parent_host: raw.phost,
        }
    }
}

/// Stand-in parent for records whose `phost` is not in the table.
static EMPTY: HostRecord = HostRecord {
    address: String::new(),
    port: String::new(),
    domain: String::new(),
    parent_host: String::new(),
};

/// Alias lookup table. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    hosts: HashMap<String, HostRecord>,
}

impl HostTable {
    /// Build the table from config records. A repeated alias replaces the earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawHostRecord>,
    {
        let mut hosts = HashMap::new();
        for raw in records {
            let alias = raw.host.clone();
            if hosts.insert(alias.clone(), HostRecord::from(raw)).is_some() {
                log::debug!("alias '{}' defined more than once, keeping the last entry", alias);
            }
        }
        HostTable { hosts }
    }

    pub fn get(&self, alias: &str) -> Option<&HostRecord> {
        self.hosts.get(alias)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// The physical host backing `record`. A dangling `phost` yields an
    /// empty record so callers carry on with blank address and port.
    pub fn resolve_physical(&self, record: &HostRecord) -> &HostRecord {
        match self.hosts.get(&record.parent_host) {
            Some(parent) => parent,
            None => {
                log::debug!(
                    "parent host '{}' is not in the host table",
                    record.parent_host
                );
                &EMPTY
            }
        }
    }

    /// Sorted aliases of physical hosts.
    pub fn physical_aliases(&self) -> Vec<&str> {
        self.sorted_aliases(HostRecord::is_physical)
    }

    /// Sorted aliases of virtual hosts.
    pub fn virtual_aliases(&self) -> Vec<&str> {
        self.sorted_aliases(HostRecord::is_virtual)
    }

    fn sorted_aliases(&self, keep: fn(&HostRecord) -> bool) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .hosts
            .iter()
            .filter(|(_, record)| keep(record))
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Aliases whose `phost` names an alias that does not exist, sorted.
    pub fn dangling_parents(&self) -> Vec<&str> {
        let mut dangling: Vec<&str> = self
            .hosts
            .iter()
            .filter(|(_, record)| !self.hosts.contains_key(&record.parent_host))
            .map(|(alias, _)| alias.as_str())
            .collect();
        dangling.sort_unstable();
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(host: &str, addr: &str, port: &str, domain: &str, phost: &str) -> RawHostRecord {
        RawHostRecord {
            host: host.to_string(),
            addr: addr.to_string(),
            port: port.to_string(),
            domain: domain.to_string(),
            phost: phost.to_string(),
        }
    }

    fn sample() -> HostTable {
        HostTable::from_records(vec![
            raw("ha1", "203.0.113.50", "2222", "", "ha1"),
            raw("v10000", "203.0.113.50", "22210", "ha1-0-v10000", "ha1"),
            raw("v10001", "203.0.113.50", "22211", "ha1-1-v10001", "ha1"),
            raw("hb2", "203.0.113.60", "22", "", "hb2"),
        ])
    }

    #[test]
    fn test_is_physical_iff_domain_empty() {
        let table = sample();
        assert!(table.get("ha1").unwrap().is_physical());
        assert!(!table.get("v10000").unwrap().is_physical());
        assert!(table.get("v10000").unwrap().is_virtual());
    }

    #[test]
    fn test_duplicate_alias_last_wins() {
        let table = HostTable::from_records(vec![
            raw("h1", "10.0.0.1", "22", "", "h1"),
            raw("h1", "10.0.0.2", "2222", "", "h1"),
        ]);
        assert_eq!(table.len(), 1);
        let h1 = table.get("h1").unwrap();
        assert_eq!(h1.address, "10.0.0.2");
        assert_eq!(h1.port, "2222");
    }

    #[test]
    fn test_listing_partitions_table() {
        let table = sample();
        let physical = table.physical_aliases();
        let virtuals = table.virtual_aliases();
        assert_eq!(physical, vec!["ha1", "hb2"]);
        assert_eq!(virtuals, vec!["v10000", "v10001"]);
        assert_eq!(physical.len() + virtuals.len(), table.len());
        assert!(physical.iter().all(|a| !virtuals.contains(a)));
    }

    #[test]
    fn test_resolve_physical() {
        let table = sample();
        let guest = table.get("v10001").unwrap();
        let parent = table.resolve_physical(guest);
        assert_eq!(parent.address, "203.0.113.50");
        assert_eq!(parent.port, "2222");
    }

    #[test]
    fn test_resolve_physical_of_physical_is_itself() {
        let table = sample();
        let host = table.get("hb2").unwrap();
        assert_eq!(table.resolve_physical(host), host);
    }

    #[test]
    fn test_resolve_physical_dangling_is_empty() {
        let table = HostTable::from_records(vec![raw("v1", "10.0.0.9", "22", "guest", "gone")]);
        let parent = table.resolve_physical(table.get("v1").unwrap());
        assert_eq!(parent, &HostRecord::default());
        assert!(std::ptr::eq(parent, &EMPTY));
        assert!(parent.address.is_empty());
        assert!(parent.port.is_empty());
    }

    #[test]
    fn test_dangling_parents() {
        let table = HostTable::from_records(vec![
            raw("h1", "10.0.0.1", "22", "", "h1"),
            raw("v2", "10.0.0.1", "2202", "g2", "nowhere"),
            raw("v1", "10.0.0.1", "2201", "g1", "h1"),
        ]);
        assert_eq!(table.dangling_parents(), vec!["v2"]);
    }

    #[test]
    fn test_empty_table() {
        let table = HostTable::default();
        assert!(table.is_empty());
        assert!(table.physical_aliases().is_empty());
        assert!(table.get("anything").is_none());
    }
}
