//! Hand-rolled fakes over the sync trait seams.

use crate::catalog::models::{AgentProperties, SourceAgentRecord};
use crate::sync::traits::{AgentFeed, CrmApi, CrmObject};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory CRM keyed by `external_agent_id`, with call counters.
#[derive(Default)]
pub(crate) struct FakeCrm {
    store: Mutex<Vec<(String, AgentProperties)>>,
    next_id: AtomicUsize,
    external_id_searches: AtomicUsize,
    name_vendor_searches: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    /// When set, any operation touching a record with this name fails.
    pub(crate) fail_on_name: Mutex<Option<String>>,
}

impl FakeCrm {
    pub(crate) fn external_id_searches(&self) -> usize {
        self.external_id_searches.load(Ordering::SeqCst)
    }

    pub(crate) fn name_vendor_searches(&self) -> usize {
        self.name_vendor_searches.load(Ordering::SeqCst)
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stored(&self) -> Vec<(String, AgentProperties)> {
        self.store.lock().unwrap().clone()
    }

    fn check_failure(&self, name: &str) -> Result<()> {
        let fail_on = self.fail_on_name.lock().unwrap();
        if fail_on.as_deref() == Some(name) {
            return Err(Error::BackendMessage(format!("injected failure for {name}")));
        }
        Ok(())
    }
}

#[async_trait]
impl CrmApi for FakeCrm {
    async fn search_by_external_id(
        &self,
        _object_type: &str,
        external_id: &str,
    ) -> Result<Option<String>> {
        self.external_id_searches.fetch_add(1, Ordering::SeqCst);
        let store = self.store.lock().unwrap();
        Ok(store
            .iter()
            .find(|(_, p)| p.external_agent_id == external_id)
            .map(|(id, _)| id.clone()))
    }

    async fn search_by_name_vendor(
        &self,
        _object_type: &str,
        name: &str,
        vendor: &str,
    ) -> Result<Option<String>> {
        self.name_vendor_searches.fetch_add(1, Ordering::SeqCst);
        let store = self.store.lock().unwrap();
        Ok(store
            .iter()
            .find(|(_, p)| p.ai_agent_name == name && p.vendor_name == vendor)
            .map(|(id, _)| id.clone()))
    }

    async fn create(&self, _object_type: &str, properties: &AgentProperties) -> Result<CrmObject> {
        self.check_failure(&properties.ai_agent_name)?;
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let id = format!("obj-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.store
            .lock()
            .unwrap()
            .push((id.clone(), properties.clone()));
        Ok(CrmObject {
            id,
            properties: serde_json::to_value(properties).expect("serializable properties"),
        })
    }

    async fn update(
        &self,
        _object_type: &str,
        id: &str,
        properties: &AgentProperties,
    ) -> Result<CrmObject> {
        self.check_failure(&properties.ai_agent_name)?;
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let entry = store
            .iter_mut()
            .find(|(stored_id, _)| stored_id == id)
            .ok_or_else(|| Error::NotFound(format!("object '{id}' not found")))?;
        entry.1 = properties.clone();
        Ok(CrmObject {
            id: id.to_string(),
            properties: serde_json::to_value(properties).expect("serializable properties"),
        })
    }
}

/// Fixed feed content.
pub(crate) struct FakeFeed {
    pub(crate) records: Vec<SourceAgentRecord>,
}

impl FakeFeed {
    pub(crate) fn from_json(body: serde_json::Value) -> Self {
        Self {
            records: crate::catalog::models::parse_feed(body),
        }
    }
}

#[async_trait]
impl AgentFeed for FakeFeed {
    async fn fetch(&self) -> Result<Vec<SourceAgentRecord>> {
        Ok(self.records.clone())
    }
}

/// Feed whose fetch always fails.
pub(crate) struct FailingFeed;

#[async_trait]
impl AgentFeed for FailingFeed {
    async fn fetch(&self) -> Result<Vec<SourceAgentRecord>> {
        Err(Error::http("/agents.json", 502, "bad gateway"))
    }
}
