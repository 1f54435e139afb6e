//! Host plugin capability and registry.
//!
//! The host engine discovers plugins by name and invokes their methods with
//! positional [`HostValue`] arguments. A plugin validates argument shapes and
//! reports them as [`CallError`]; what the method itself does with failures
//! is up to the plugin.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tally_core::{HostDictionary, HostValue};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned to the host for a plugin call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// No plugin is registered under the requested name.
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    /// The plugin exists but does not answer to `method`.
    #[error("Plugin {plugin} has no method {method}")]
    MethodNotFound { plugin: String, method: String },

    /// Too few or too many positional arguments. `expected` is a count or
    /// a range such as `3 to 4`.
    #[error("{method} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        method: String,
        expected: String,
        actual: usize,
    },

    /// The argument at `index` has the wrong host type.
    #[error("{method}: argument {index} must be {expected}, got {actual}")]
    ArgumentType {
        method: String,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type for plugin calls.
pub type CallResult<T> = Result<T, CallError>;

/// A named capability the host can call into.
pub trait HostPlugin: Send + Sync {
    /// Name the host looks the plugin up by.
    fn name(&self) -> &str;

    /// Method names this plugin answers to.
    fn methods(&self) -> &[&'static str];

    /// Invokes `method` with positional arguments.
    fn call(&self, method: &str, args: &[HostValue]) -> CallResult<HostValue>;
}

/// A shared host plugin trait object.
pub type BoxedPlugin = Arc<dyn HostPlugin>;

// =============================================================================
// Argument Access
// =============================================================================

/// Typed access to positional call arguments.
pub struct Arguments<'a> {
    method: &'a str,
    args: &'a [HostValue],
}

impl<'a> Arguments<'a> {
    /// Wraps `args`, checking that the count lies within `min..=max`.
    pub fn new(method: &'a str, args: &'a [HostValue], min: usize, max: usize) -> CallResult<Self> {
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            };
            return Err(CallError::ArgumentCount {
                method: method.to_string(),
                expected,
                actual: args.len(),
            });
        }
        Ok(Self { method, args })
    }

    fn type_error(&self, index: usize, expected: &'static str) -> CallError {
        CallError::ArgumentType {
            method: self.method.to_string(),
            index,
            expected,
            actual: self.args.get(index).map_or("nothing", HostValue::type_name),
        }
    }

    /// The string at `index`.
    pub fn string(&self, index: usize) -> CallResult<&'a str> {
        self.args
            .get(index)
            .and_then(HostValue::as_str)
            .ok_or_else(|| self.type_error(index, "string"))
    }

    /// The dictionary at `index`. `Nil` is read as an empty dictionary.
    pub fn dictionary(&self, index: usize) -> CallResult<HostDictionary> {
        match self.args.get(index) {
            Some(HostValue::Dictionary(d)) => Ok(d.clone()),
            Some(HostValue::Nil) => Ok(HostDictionary::new()),
            _ => Err(self.type_error(index, "dictionary")),
        }
    }

    /// The bool at `index`, or `default` when absent.
    pub fn bool_or(&self, index: usize, default: bool) -> CallResult<bool> {
        match self.args.get(index) {
            None | Some(HostValue::Nil) => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| self.type_error(index, "bool")),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Name-keyed plugin registry the host queries.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, BoxedPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under its name, replacing any previous one.
    pub fn register(&self, plugin: BoxedPlugin) {
        let name = plugin.name().to_string();
        if self.plugins.write().insert(name.clone(), plugin).is_some() {
            warn!(plugin = %name, "Replaced previously registered plugin");
        } else {
            debug!(plugin = %name, "Registered plugin");
        }
    }

    /// Removes a plugin by name.
    pub fn unregister(&self, name: &str) -> Option<BoxedPlugin> {
        let removed = self.plugins.write().remove(name);
        if removed.is_some() {
            debug!(plugin = %name, "Unregistered plugin");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<BoxedPlugin> {
        self.plugins.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.read().contains_key(name)
    }

    /// Registered plugin names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.plugins.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Looks up `plugin` and calls `method` on it.
    pub fn call(&self, plugin: &str, method: &str, args: &[HostValue]) -> CallResult<HostValue> {
        let target = self
            .get(plugin)
            .ok_or_else(|| CallError::PluginNotFound(plugin.to_string()))?;
        target.call(method, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl HostPlugin for Echo {
        fn name(&self) -> &str {
            "Echo"
        }

        fn methods(&self) -> &[&'static str] {
            &["echo"]
        }

        fn call(&self, method: &str, args: &[HostValue]) -> CallResult<HostValue> {
            match method {
                "echo" => {
                    let args = Arguments::new(method, args, 1, 1)?;
                    Ok(HostValue::from(args.string(0)?))
                }
                _ => Err(CallError::MethodNotFound {
                    plugin: self.name().to_string(),
                    method: method.to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_register_and_call() {
        let registry = PluginRegistry::new();
        registry.register(Arc::new(Echo));

        assert!(registry.contains("Echo"));
        assert_eq!(registry.names(), vec!["Echo".to_string()]);
        assert_eq!(
            registry.call("Echo", "echo", &["hi".into()]),
            Ok(HostValue::from("hi"))
        );
    }

    #[test]
    fn test_unknown_plugin_and_method() {
        let registry = PluginRegistry::new();
        registry.register(Arc::new(Echo));

        assert_eq!(
            registry.call("Nope", "echo", &[]),
            Err(CallError::PluginNotFound("Nope".into()))
        );
        assert!(matches!(
            registry.call("Echo", "shout", &[]),
            Err(CallError::MethodNotFound { .. })
        ));

        assert!(registry.unregister("Echo").is_some());
        assert!(registry.get("Echo").is_none());
    }

    #[test]
    fn test_argument_checks() {
        let args = [HostValue::from(3), HostValue::Nil];
        assert!(matches!(
            Arguments::new("m", &args, 3, 4),
            Err(CallError::ArgumentCount { actual: 2, .. })
        ));

        let parsed = Arguments::new("m", &args, 1, 3).unwrap();
        assert_eq!(
            parsed.string(0),
            Err(CallError::ArgumentType {
                method: "m".into(),
                index: 0,
                expected: "string",
                actual: "int",
            })
        );
        assert_eq!(parsed.dictionary(1), Ok(HostDictionary::new()));
        assert_eq!(parsed.bool_or(1, true), Ok(true));
        assert_eq!(parsed.bool_or(2, false), Ok(false));
        assert!(parsed.bool_or(0, true).is_err());
    }

    #[test]
    fn test_argument_count_message() {
        let err = Arguments::new("initTikTok", &[], 3, 4).err().unwrap();
        assert_eq!(err.to_string(), "initTikTok expects 3 to 4 arguments, got 0");
    }
}
