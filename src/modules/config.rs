//! Config module: read-only access to the `[values]` table of the settings.

use super::AppContext;
use async_trait::async_trait;
use module_framework::{BoxError, Module, ModuleType};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Default)]
pub struct Config {
    values: BTreeMap<String, toml::Value>,
}

impl Config {
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(toml::Value::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(toml::Value::as_integer)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(toml::Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[async_trait]
impl Module for Config {
    type Context = AppContext;

    async fn init(&mut self, ctx: &AppContext) -> Result<(), BoxError> {
        self.values = ctx.settings.values.clone();
        info!(values = self.values.len(), "Config module initialized");
        Ok(())
    }

    fn release(&mut self) -> Result<(), BoxError> {
        self.values.clear();
        Ok(())
    }
}

impl ModuleType for Config {
    const NAME: &'static str = "Config";
    const PRIORITY: Option<i32> = Some(0);
}
