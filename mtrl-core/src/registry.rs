use crate::{env::Env, error::RegistryError};
use anyhow::Result;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

pub trait EnvBuilder: Send + Sync + 'static {
    type Env: Env;

    fn build_env(&self) -> Result<Self::Env>;
}

impl<E: Env, F: Sync + Send + 'static> EnvBuilder for F
where
    F: Fn() -> Result<E>,
{
    type Env = E;

    fn build_env(&self) -> Result<Self::Env> {
        (self)()
    }
}

/// Maps fixed string tags to environment builders so that harness code can
/// instantiate benchmark envs by name.
pub struct EnvRegistry<E: Env> {
    builders: HashMap<String, Arc<dyn EnvBuilder<Env = E>>>,
}

impl<E: Env + 'static> Default for EnvRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Env + 'static> EnvRegistry<E> {
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    pub fn register<B>(&mut self, tag: impl Into<String>, builder: B) -> Result<()>
    where
        B: EnvBuilder<Env = E>,
    {
        let tag = tag.into();
        if self.builders.contains_key(&tag) {
            return Err(RegistryError::DuplicateEnv(tag).into());
        }
        debug!(%tag, "registered environment");
        self.builders.insert(tag, Arc::new(builder));
        Ok(())
    }

    pub fn build(&self, tag: &str) -> Result<E> {
        let builder = self
            .builders
            .get(tag)
            .ok_or_else(|| RegistryError::UnknownEnv(tag.to_string()))?;
        builder.build_env()
    }

    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
