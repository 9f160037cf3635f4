use crate::error::ConfigError;
use crate::server::RequestContext;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A directive resolver: given the current request context, produce the
/// value to inject into the handler's argument set.
pub type DirectiveFn = Arc<dyn Fn(&RequestContext) -> Result<Value> + Send + Sync>;

/// Process-wide mapping from directive name to resolver.
///
/// Names are unique for the process lifetime; a duplicate registration is a
/// [`ConfigError`] at startup. Lookups during serving are unsynchronized
/// reads, which is safe because all registration happens-before the first
/// request is accepted.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    resolvers: HashMap<String, DirectiveFn>,
}

impl DirectiveRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver under a globally unique name.
    pub fn register<F>(&mut self, name: &str, resolver: F) -> Result<(), ConfigError>
    where
        F: Fn(&RequestContext) -> Result<Value> + Send + Sync + 'static,
    {
        if self.resolvers.contains_key(name) {
            return Err(ConfigError::DuplicateDirective(name.to_string()));
        }
        self.resolvers.insert(name.to_string(), Arc::new(resolver));
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Invoke the named resolver for this request.
    ///
    /// An unknown name here is a bug: the binder only infers the directive
    /// source for names it has checked against this registry at registration
    /// time. A resolver error propagates as a server fault, not a
    /// validation error.
    pub fn resolve(&self, name: &str, ctx: &RequestContext) -> Result<Value> {
        let resolver = self
            .resolvers
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("directive '{name}' is not registered"))?;
        debug!(request_id = %ctx.request_id, directive = %name, "Resolving directive");
        resolver(ctx)
    }
}

impl std::fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("DirectiveRegistry")
            .field("names", &names)
            .finish()
    }
}
