//! Rule-table port forwarder and the registry of opened mappings.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use waypoint_common::HostAndPort;

use crate::application::ports::PortForwarder;
use crate::domain::ForwardRule;

/// Record of mappings opened so far, keyed by `(node_id, target)`.
///
/// An explicit service object: pass one registry to every resolution that
/// should share mappings.
#[derive(Debug, Default)]
pub struct MappingRegistry {
    mappings: Mutex<HashMap<(String, HostAndPort), HostAndPort>>,
}

impl MappingRegistry {
    /// Look up the recorded external endpoint for `target` on `node_id`.
    pub fn lookup(&self, node_id: &str, target: &HostAndPort) -> Result<Option<HostAndPort>> {
        let mappings = self
            .mappings
            .lock()
            .map_err(|_| anyhow::anyhow!("mapping registry lock poisoned"))?;
        Ok(mappings
            .get(&(node_id.to_string(), target.clone()))
            .cloned())
    }

    /// Record a mapping, returning the endpoint now associated with the key.
    ///
    /// If another caller recorded the same key first, its endpoint wins.
    pub fn record(
        &self,
        node_id: &str,
        target: &HostAndPort,
        external: HostAndPort,
    ) -> Result<HostAndPort> {
        let mut mappings = self
            .mappings
            .lock()
            .map_err(|_| anyhow::anyhow!("mapping registry lock poisoned"))?;
        Ok(mappings
            .entry((node_id.to_string(), target.clone()))
            .or_insert(external)
            .clone())
    }

    /// Number of recorded mappings.
    pub fn len(&self) -> Result<usize> {
        let mappings = self
            .mappings
            .lock()
            .map_err(|_| anyhow::anyhow!("mapping registry lock poisoned"))?;
        Ok(mappings.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Forwarder backed by static rules from the configuration file.
///
/// A node-specific rule takes precedence over a rule without `node_id`.
pub struct RuleTableForwarder<'a> {
    rules: Vec<ForwardRule>,
    registry: &'a MappingRegistry,
}

impl<'a> RuleTableForwarder<'a> {
    #[must_use]
    pub fn new(rules: Vec<ForwardRule>, registry: &'a MappingRegistry) -> Self {
        Self { rules, registry }
    }

    fn find_rule(&self, node_id: &str, target: &HostAndPort) -> Option<&ForwardRule> {
        let matching = |r: &&ForwardRule| r.target == *target;
        self.rules
            .iter()
            .filter(matching)
            .find(|r| r.node_id.as_deref() == Some(node_id))
            .or_else(|| {
                self.rules
                    .iter()
                    .filter(matching)
                    .find(|r| r.node_id.is_none())
            })
    }
}

impl PortForwarder for RuleTableForwarder<'_> {
    async fn open_mapping(&self, node_id: &str, target: &HostAndPort) -> Result<HostAndPort> {
        if let Some(existing) = self.registry.lookup(node_id, target)? {
            tracing::debug!(node_id, %target, %existing, "reusing forwarded mapping");
            return Ok(existing);
        }
        let rule = self
            .find_rule(node_id, target)
            .ok_or_else(|| anyhow::anyhow!("no forwarding rule for {target} on node '{node_id}'"))?;
        self.registry.record(node_id, target, rule.external.clone())
    }
}
