//! Inventory file: which endpoint serves which client role.
//!
//! ```json
//! {
//!   "client.0": "ubuntu@10.0.0.5",
//!   "client.1": { "transport": "ssh", "identity": "ubuntu@10.0.0.6", "ssh_args": ["-i", "/keys/id"] },
//!   "client.2": { "transport": "local" }
//! }
//! ```
//!
//! A bare string is an ssh identity.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use locktest_core::{Inventory, Remote};
use locktest_exec::{LocalRemote, SshOptions, SshRemote};
use locktest_model::ClientSpec;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Identity(String),
    Endpoint(Endpoint),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum Endpoint {
    Ssh {
        identity: String,
        #[serde(default)]
        ssh_args: Vec<String>,
    },
    Local {
        #[serde(default)]
        identity: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InventoryFile(pub BTreeMap<ClientSpec, Entry>);

impl InventoryFile {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("malformed inventory")
    }

    pub fn into_cluster(self, ssh: &SshOptions) -> Inventory {
        let mut inventory = Inventory::new();
        for (spec, entry) in self.0 {
            inventory.insert(spec, remote_for(entry, ssh));
        }
        inventory
    }
}

fn remote_for(entry: Entry, ssh: &SshOptions) -> Arc<dyn Remote> {
    match entry {
        Entry::Identity(identity) => Arc::new(SshRemote::with_options(identity, ssh.clone())),
        Entry::Endpoint(Endpoint::Ssh { identity, ssh_args }) => {
            let mut options = ssh.clone();
            options.extra_args.extend(ssh_args);
            Arc::new(SshRemote::with_options(identity, options))
        }
        Entry::Endpoint(Endpoint::Local { identity }) => {
            let local = LocalRemote::new();
            Arc::new(match identity {
                Some(identity) => local.with_identity(identity),
                None => local,
            })
        }
    }
}

pub fn load(path: &Path) -> anyhow::Result<InventoryFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read inventory {}", path.display()))?;
    InventoryFile::parse(&raw).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use locktest_core::Cluster;

    const SAMPLE: &str = r#"{
        "client.0": "ubuntu@10.0.0.5",
        "client.1": { "transport": "ssh", "identity": "ubuntu@10.0.0.6", "ssh_args": ["-p", "2222"] },
        "client.2": { "transport": "local" },
        "client.3": { "transport": "local", "identity": "ubuntu@127.0.0.1" }
    }"#;

    fn spec(s: &str) -> ClientSpec {
        s.parse().unwrap()
    }

    #[test]
    fn parses_all_entry_forms() {
        let file = InventoryFile::parse(SAMPLE).unwrap();
        assert_eq!(file.0.len(), 4);
        assert_eq!(
            file.0[&spec("client.0")],
            Entry::Identity("ubuntu@10.0.0.5".into())
        );
        assert_eq!(
            file.0[&spec("client.1")],
            Entry::Endpoint(Endpoint::Ssh {
                identity: "ubuntu@10.0.0.6".into(),
                ssh_args: vec!["-p".into(), "2222".into()],
            })
        );
        assert_eq!(
            file.0[&spec("client.2")],
            Entry::Endpoint(Endpoint::Local { identity: None })
        );
    }

    #[test]
    fn builds_cluster_with_identities() {
        let cluster = InventoryFile::parse(SAMPLE)
            .unwrap()
            .into_cluster(&SshOptions::default());
        assert_eq!(cluster.len(), 4);
        assert_eq!(cluster.only(&spec("client.0")).unwrap().address(), "10.0.0.5");
        assert_eq!(cluster.only(&spec("client.1")).unwrap().name(), "ubuntu@10.0.0.6");
        assert_eq!(cluster.only(&spec("client.2")).unwrap().name(), "localhost");
        assert_eq!(cluster.only(&spec("client.3")).unwrap().address(), "127.0.0.1");
    }

    #[test]
    fn rejects_bad_roles_and_transports() {
        assert!(InventoryFile::parse(r#"{"osd.0": "host"}"#).is_err());
        assert!(InventoryFile::parse(r#"{"client.0": {"transport": "telnet"}}"#).is_err());
        assert!(InventoryFile::parse("[]").is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load(&path).unwrap().0.len(), 4);

        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read inventory"));
    }
}
