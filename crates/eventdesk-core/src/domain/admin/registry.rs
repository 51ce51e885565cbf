//! The admin entity registry.
//!
//! Built once at startup and handed to whoever needs it. There is no global
//! table: a registry is a plain value, immutable after `build()`.

use serde::{Deserialize, Serialize};

use super::config::AdminEntityConfig;
use crate::domain::error::DomainError;

/// Menu position for entities registered without an explicit order.
pub const DEFAULT_ORDER: u32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredEntity {
    pub key: String,
    pub href: String,
    pub icon: Option<String>,
    pub order: Option<u32>,
    pub config: AdminEntityConfig,
}

impl RegisteredEntity {
    pub fn effective_order(&self) -> u32 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }

    /// Registered icon, falling back to the config's own icon.
    pub fn effective_icon(&self) -> Option<&str> {
        self.icon.as_deref().or(self.config.icon.as_deref())
    }
}

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub title: String,
    pub href: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminRegistry {
    entries: Vec<RegisteredEntity>,
}

impl AdminRegistry {
    pub fn builder() -> AdminRegistryBuilder {
        AdminRegistryBuilder::default()
    }

    /// Snapshot sorted by menu order. Ties keep registration order.
    pub fn entries(&self) -> Vec<&RegisteredEntity> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.effective_order());
        entries
    }

    pub fn get(&self, key: &str) -> Result<&RegisteredEntity, DomainError> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| DomainError::UnknownEntity(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        self.entries()
            .into_iter()
            .map(|e| MenuItem {
                key: e.key.clone(),
                title: e.config.title.clone(),
                href: e.href.clone(),
                icon: e.effective_icon().map(str::to_string),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct AdminRegistryBuilder {
    entries: Vec<RegisteredEntity>,
}

impl AdminRegistryBuilder {
    /// Register an entity. Re-registering a key overwrites the earlier entry
    /// but keeps its position.
    pub fn register(
        mut self,
        key: impl Into<String>,
        config: AdminEntityConfig,
        href: impl Into<String>,
        icon: Option<&str>,
        order: Option<u32>,
    ) -> Self {
        let entry = RegisteredEntity {
            key: key.into(),
            href: href.into(),
            icon: icon.map(str::to_string),
            order,
            config,
        };
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn build(self) -> AdminRegistry {
        AdminRegistry {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{EntitySchema, Field};

    fn config(title: &str) -> AdminEntityConfig {
        AdminEntityConfig::builder(
            title,
            EntitySchema::new(title).field("name", Field::string("Name")),
        )
        .endpoint(title.to_lowercase())
        .build()
        .unwrap()
    }

    fn keys(registry: &AdminRegistry) -> Vec<&str> {
        registry.entries().iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn sorted_by_order_ascending() {
        let registry = AdminRegistry::builder()
            .register("b", config("B"), "/admin/b", None, Some(3))
            .register("a", config("A"), "/admin/a", None, Some(1))
            .build();
        assert_eq!(keys(&registry), vec!["a", "b"]);
    }

    #[test]
    fn missing_order_sorts_last_and_ties_are_stable() {
        let registry = AdminRegistry::builder()
            .register("none", config("None"), "/admin/none", None, None)
            .register("t1", config("T1"), "/admin/t1", None, Some(3))
            .register("t2", config("T2"), "/admin/t2", None, Some(3))
            .register("late", config("Late"), "/admin/late", None, Some(1000))
            .build();
        assert_eq!(keys(&registry), vec!["t1", "t2", "none", "late"]);
    }

    #[test]
    fn duplicate_key_overwrites_in_place() {
        let registry = AdminRegistry::builder()
            .register("a", config("A"), "/admin/a", None, Some(1))
            .register("b", config("B"), "/admin/b", None, Some(1))
            .register("a", config("Again"), "/admin/again", Some("*"), Some(1))
            .build();
        assert_eq!(registry.len(), 2);
        assert_eq!(keys(&registry), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().href, "/admin/again");
    }

    #[test]
    fn menu_falls_back_to_config_icon() {
        let mut with_icon = config("Docs");
        with_icon.icon = Some("D".into());
        let registry = AdminRegistry::builder()
            .register("docs", with_icon, "/admin/docs", None, None)
            .build();
        let menu = registry.menu();
        assert_eq!(menu[0].icon.as_deref(), Some("D"));
        assert_eq!(menu[0].title, "Docs");
    }

    #[test]
    fn unknown_key() {
        let registry = AdminRegistry::builder().build();
        assert!(matches!(
            registry.get("ghost"),
            Err(DomainError::UnknownEntity(k)) if k == "ghost"
        ));
    }
}
