//! Schema validation with default resolution
//!
//! Walks an untyped [`Value`] tree against the static schema in
//! [`crate::config::schema`], strips unknown keys, fills defaults for the
//! fields of every block that is present and collects every violation in a
//! single pass. The resolved tree is then deserialized into
//! [`KodebaseConfig`].

use crate::config::KodebaseConfig;
use crate::config::schema::{
    DefaultValue, FieldSpec, FieldType, IntegerBound, KODEBASE_CONFIG, ObjectSchema, Presence,
};
use crate::error::{ValidationError, Violation};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

/// Validate an untyped configuration tree and apply defaults
///
/// The input is never mutated; the returned configuration is a new value.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated field when the input
/// does not conform to the schema.
pub fn validate_config(input: &Value) -> Result<KodebaseConfig, ValidationError> {
    let resolved = resolve(&KODEBASE_CONFIG, input)?;

    serde_json::from_value(resolved).map_err(|e| {
        ValidationError::new(vec![Violation::new(
            Vec::new(),
            format!("Resolved configuration does not match the model: {e}"),
        )])
    })
}

/// Resolve an input tree against an object schema
///
/// # Errors
///
/// Returns every violation found, in schema declaration order.
pub fn resolve(schema: &ObjectSchema, input: &Value) -> Result<Value, ValidationError> {
    let mut walker = Walker::default();
    let resolved = walker.object(schema, input);

    if walker.violations.is_empty() {
        return Ok(resolved.unwrap_or(Value::Null));
    }

    debug!(
        "Validation against '{}' found {} violation(s)",
        schema.name,
        walker.violations.len()
    );
    Err(ValidationError::new(walker.violations))
}

impl KodebaseConfig {
    /// Validate an untyped tree into a configuration
    ///
    /// # Errors
    ///
    /// See [`validate_config`].
    #[inline]
    pub fn from_value(input: &Value) -> Result<Self, ValidationError> {
        validate_config(input)
    }

    /// Re-validate this configuration, e.g. after editing a copy by hand
    ///
    /// # Errors
    ///
    /// Returns the violations introduced by the edits (an out-of-range
    /// `max_parallelism`, a malformed `api_url`, ...).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let value = serde_json::to_value(self).map_err(|e| {
            ValidationError::new(vec![Violation::new(Vec::new(), e.to_string())])
        })?;
        validate_config(&value).map(|_| ())
    }

    /// The configuration as an untyped tree
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Recursive schema walker holding the current path and collected violations
#[derive(Default)]
struct Walker {
    path: Vec<String>,
    violations: Vec<Violation>,
}

impl Walker {
    fn report<S: Into<String>>(&mut self, message: S) {
        self.violations
            .push(Violation::new(self.path.clone(), message));
    }

    fn mismatch(&mut self, expected: &str, received: &Value) {
        self.report(format!(
            "Expected {expected}, received {}",
            type_name(received)
        ));
    }

    fn object(&mut self, schema: &ObjectSchema, input: &Value) -> Option<Value> {
        let Some(entries) = input.as_object() else {
            self.mismatch("object", input);
            return None;
        };

        let mut resolved = Map::new();
        for field in schema.fields {
            self.path.push(field.name.to_owned());
            let value = match entries.get(field.name) {
                Some(value) => self.value(field.kind, value),
                None => self.missing(field),
            };
            if let Some(value) = value {
                resolved.insert(field.name.to_owned(), value);
            }
            self.path.pop();
        }

        Some(Value::Object(resolved))
    }

    fn missing(&mut self, field: &FieldSpec) -> Option<Value> {
        match field.presence {
            Presence::Required => {
                self.report("Required");
                None
            }
            Presence::Optional => None,
            Presence::Defaulted(DefaultValue::Block) => match field.kind {
                FieldType::Object(schema) => self.object(schema, &Value::Object(Map::new())),
                _ => {
                    self.report("Block default declared on a non-object field");
                    None
                }
            },
            Presence::Defaulted(default) => Some(literal_default(default)),
        }
    }

    fn value(&mut self, kind: FieldType, input: &Value) -> Option<Value> {
        match kind {
            FieldType::Bool => {
                if input.is_boolean() {
                    return Some(input.clone());
                }
                self.mismatch("boolean", input);
                None
            }
            FieldType::String => {
                if input.is_string() {
                    return Some(input.clone());
                }
                self.mismatch("string", input);
                None
            }
            FieldType::Url => self.url(input),
            FieldType::StringList => self.string_list(input),
            FieldType::Enum(names) => self.literal(names, input),
            FieldType::Integer(bound) => self.integer(bound, input),
            FieldType::Object(schema) => self.object(schema, input),
        }
    }

    fn url(&mut self, input: &Value) -> Option<Value> {
        let Some(text) = input.as_str() else {
            self.mismatch("string", input);
            return None;
        };
        if Url::parse(text).is_err() {
            self.report("Invalid url");
            return None;
        }
        Some(input.clone())
    }

    fn string_list(&mut self, input: &Value) -> Option<Value> {
        let Some(items) = input.as_array() else {
            self.mismatch("array", input);
            return None;
        };

        let mut valid = true;
        for (index, item) in items.iter().enumerate() {
            if !item.is_string() {
                self.path.push(index.to_string());
                self.mismatch("string", item);
                self.path.pop();
                valid = false;
            }
        }

        valid.then(|| input.clone())
    }

    fn literal(&mut self, names: &[&str], input: &Value) -> Option<Value> {
        let expected = names
            .iter()
            .map(|n| format!("'{n}'"))
            .collect::<Vec<_>>()
            .join(" | ");

        match input.as_str() {
            Some(text) if names.contains(&text) => Some(input.clone()),
            Some(text) => {
                self.report(format!(
                    "Invalid enum value. Expected {expected}, received '{text}'"
                ));
                None
            }
            None => {
                self.mismatch(&expected, input);
                None
            }
        }
    }

    fn integer(&mut self, bound: IntegerBound, input: &Value) -> Option<Value> {
        let Value::Number(ref number) = *input else {
            self.mismatch("number", input);
            return None;
        };

        let (whole, exact) = if let Some(n) = number.as_u64() {
            (i128::from(n), true)
        } else if let Some(n) = number.as_i64() {
            (i128::from(n), true)
        } else {
            let float = number.as_f64().unwrap_or(f64::NAN);
            if float.is_finite() && float.fract() == 0.0 {
                (float as i128, true)
            } else {
                (float.floor() as i128, false)
            }
        };

        let mut valid = true;
        if !exact {
            self.report("Expected integer, received float");
            valid = false;
        }

        let in_range = match bound {
            IntegerBound::Positive => whole > 0,
            IntegerBound::AtLeast(min) => whole >= i128::from(min),
        };
        if !in_range {
            self.report(match bound {
                IntegerBound::Positive => "Number must be greater than 0".to_owned(),
                IntegerBound::AtLeast(min) => {
                    format!("Number must be greater than or equal to {min}")
                }
            });
            valid = false;
        }

        if !valid {
            return None;
        }
        if let Ok(n) = u64::try_from(whole) {
            return Some(Value::from(n));
        }
        self.report(format!(
            "Number must be less than or equal to {}",
            u64::MAX
        ));
        None
    }
}

fn literal_default(default: DefaultValue) -> Value {
    match default {
        DefaultValue::Bool(b) => Value::Bool(b),
        DefaultValue::Str(s) => Value::String(s.to_owned()),
        DefaultValue::Int(n) => Value::from(n),
        DefaultValue::StrList(items) => Value::Array(
            items
                .iter()
                .map(|s| Value::String((*s).to_owned()))
                .collect(),
        ),
        DefaultValue::Block => Value::Object(Map::new()),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match *value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::config::schema::{FieldSpec, FieldType};
    use crate::config::types::{
        BranchesConfig, CascadePrConfig, CascadesConfig, CommitsConfig, ConventionalCommitsConfig,
        DirectCommitConfig, HookConfig, HooksConfig, PlatformConfig, PlatformEndpointConfig,
        PostCheckoutConfig, PostMergeConfig, PostMergeStrategy, PrCreationConfig, PreCommitConfig,
        PrePushConfig, ValidationConfig,
    };
    use serde_json::json;

    fn violation_paths(input: &Value) -> Vec<String> {
        validate_config(input).unwrap_err().paths()
    }

    #[test]
    fn empty_object_gets_root_defaults() {
        let config = validate_config(&json!({})).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.artifacts_dir, ".kodebase/artifacts");
        assert!(config.git_ops.is_none());
    }

    #[test]
    fn non_object_input_fails_at_root() {
        for input in [json!(null), json!(42), json!("settings"), json!([1, 2])] {
            let err = validate_config(&input).unwrap_err();
            assert_eq!(err.paths(), vec!["root"]);
        }
        let err = validate_config(&json!(null)).unwrap_err();
        assert_eq!(
            err.violations()[0].message,
            "Expected object, received null"
        );
    }

    #[test]
    fn entered_blocks_are_fully_defaulted() {
        let config = validate_config(&json!({
            "gitOps": {
                "post_merge": {},
                "post_checkout": {},
                "pr_creation": {},
                "cascades": {},
                "validation": {},
                "branches": {},
                "commits": {}
            }
        }))
        .unwrap();
        let git_ops = config.git_ops.unwrap();
        assert_eq!(git_ops.post_merge.unwrap(), PostMergeConfig::default());
        assert_eq!(git_ops.post_checkout.unwrap(), PostCheckoutConfig::default());
        assert_eq!(git_ops.pr_creation.unwrap(), PrCreationConfig::default());
        assert_eq!(git_ops.cascades.unwrap(), CascadesConfig::default());
        assert_eq!(git_ops.validation.unwrap(), ValidationConfig::default());
        assert_eq!(git_ops.branches.unwrap(), BranchesConfig::default());
        assert_eq!(git_ops.commits.unwrap(), CommitsConfig::default());
        assert!(git_ops.hooks.is_none());
        assert!(git_ops.platform.is_none());
    }

    #[test]
    fn nested_block_defaults_match_the_model() {
        let config = validate_config(&json!({
            "gitOps": {
                "post_merge": {"cascade_pr": {}, "direct_commit": {}},
                "hooks": {
                    "post_checkout": {},
                    "post_merge": {},
                    "pre_commit": {},
                    "pre_push": {}
                },
                "platform": {"github": {}, "gitlab": {}, "bitbucket": {}},
                "commits": {"conventional": {}}
            }
        }))
        .unwrap();
        let git_ops = config.git_ops.unwrap();

        let post_merge = git_ops.post_merge.unwrap();
        assert_eq!(post_merge.cascade_pr.unwrap(), CascadePrConfig::default());
        assert_eq!(post_merge.direct_commit.unwrap(), DirectCommitConfig::default());

        let hooks = git_ops.hooks.unwrap();
        assert_eq!(hooks.post_checkout.clone().unwrap(), HookConfig::default());
        assert_eq!(hooks.post_merge.clone().unwrap(), HookConfig::default());
        assert_eq!(hooks.pre_commit.clone().unwrap(), PreCommitConfig::default());
        assert_eq!(hooks.pre_push.clone().unwrap(), PrePushConfig::default());
        assert_eq!(
            HooksConfig {
                post_checkout: None,
                post_merge: None,
                pre_commit: None,
                pre_push: None,
                ..hooks
            },
            HooksConfig::default()
        );

        let platform = git_ops.platform.unwrap();
        assert_eq!(platform.github.clone().unwrap(), PlatformEndpointConfig::github());
        assert_eq!(platform.gitlab.clone().unwrap(), PlatformEndpointConfig::gitlab());
        assert_eq!(platform.bitbucket.clone().unwrap(), PlatformEndpointConfig::bitbucket());
        assert_eq!(
            PlatformConfig {
                github: None,
                gitlab: None,
                bitbucket: None,
                ..platform
            },
            PlatformConfig::default()
        );

        let commits = git_ops.commits.unwrap();
        assert_eq!(
            commits.conventional.unwrap(),
            ConventionalCommitsConfig::default()
        );
    }

    #[test]
    fn post_merge_sub_blocks_stay_absent() {
        let config = validate_config(&json!({"gitOps": {"post_merge": {}}})).unwrap();
        let post_merge = config.git_ops.unwrap().post_merge.unwrap();
        assert_eq!(post_merge.strategy, PostMergeStrategy::CascadePr);
        assert!(post_merge.cascade_pr.is_none());
        assert!(post_merge.direct_commit.is_none());
    }

    #[test]
    fn unknown_keys_are_stripped() {
        let input = json!({
            "future_key": true,
            "gitOps": {"hooks": {"log_level": "debug", "extra": 1}}
        });
        let config = validate_config(&input).unwrap();
        let value = config.to_value();
        assert!(value.get("future_key").is_none());
        assert!(value["gitOps"]["hooks"].get("extra").is_none());
        // input untouched
        assert_eq!(input["future_key"], json!(true));
    }

    #[test]
    fn enum_violation_names_value() {
        let err = validate_config(&json!({"gitOps": {"post_merge": {"strategy": "bogus"}}}))
            .unwrap_err();
        assert_eq!(err.paths(), vec!["gitOps.post_merge.strategy"]);
        assert_eq!(
            err.violations()[0].message,
            "Invalid enum value. Expected 'cascade_pr' | 'direct_commit' | 'manual', received 'bogus'"
        );
    }

    #[test]
    fn no_type_coercion() {
        let paths = violation_paths(&json!({
            "gitOps": {"hooks": {"enabled": "true"}, "cascades": {"max_batch_size": "10"}}
        }));
        assert_eq!(
            paths,
            vec!["gitOps.hooks.enabled", "gitOps.cascades.max_batch_size"]
        );
    }

    #[test]
    fn explicit_null_is_not_absent() {
        let err = validate_config(&json!({"version": null})).unwrap_err();
        assert_eq!(err.paths(), vec!["version"]);
        assert_eq!(
            err.violations()[0].message,
            "Expected string, received null"
        );
    }

    #[test]
    fn integer_bounds() {
        let err = validate_config(&json!({"gitOps": {"cascades": {"batch_delay_seconds": -1}}}))
            .unwrap_err();
        assert_eq!(err.violations()[0].message, "Number must be greater than 0");

        let err = validate_config(&json!({"gitOps": {"cascades": {"max_batch_size": 0}}}))
            .unwrap_err();
        assert_eq!(err.paths(), vec!["gitOps.cascades.max_batch_size"]);

        let err = validate_config(&json!({"gitOps": {"cascades": {"max_parallelism": 0}}}))
            .unwrap_err();
        assert_eq!(
            err.violations()[0].message,
            "Number must be greater than or equal to 1"
        );

        let err = validate_config(&json!({"gitOps": {"cascades": {"max_batch_size": 2.5}}}))
            .unwrap_err();
        assert_eq!(
            err.violations()[0].message,
            "Expected integer, received float"
        );

        let config = validate_config(&json!({"gitOps": {"cascades": {
            "batch_delay_seconds": 1,
            "max_parallelism": 1,
            "max_batch_size": 4.0
        }}}))
        .unwrap();
        let cascades = config.git_ops.unwrap().cascades.unwrap();
        assert_eq!(cascades.batch_delay_seconds, 1);
        assert_eq!(cascades.max_parallelism, 1);
        assert_eq!(cascades.max_batch_size, 4);
    }

    #[test]
    fn integers_beyond_u64_are_reported_at_their_path() {
        let err = validate_config(&json!({"gitOps": {"cascades": {"batch_delay_seconds": 1e30}}}))
            .unwrap_err();
        assert_eq!(err.paths(), vec!["gitOps.cascades.batch_delay_seconds"]);
        assert_eq!(
            err.violations()[0].message,
            "Number must be less than or equal to 18446744073709551615"
        );

        let config = validate_config(&json!({"gitOps": {"cascades": {"max_batch_size": u64::MAX}}}))
            .unwrap();
        assert_eq!(config.git_ops.unwrap().cascades.unwrap().max_batch_size, u64::MAX);
    }

    #[test]
    fn url_fields_must_be_absolute() {
        let paths = violation_paths(&json!({
            "gitOps": {"platform": {
                "github": {"api_url": "not-a-url"},
                "gitlab": {"api_url": "/api/v4"}
            }}
        }));
        assert_eq!(
            paths,
            vec![
                "gitOps.platform.github.api_url",
                "gitOps.platform.gitlab.api_url"
            ]
        );

        let config = validate_config(&json!({
            "gitOps": {"platform": {"type": "gitlab", "gitlab": {"api_url": "https://git.example.com/api/v4"}}}
        }))
        .unwrap();
        let gitlab = config.git_ops.unwrap().platform.unwrap().gitlab.unwrap();
        assert_eq!(gitlab.api_url, "https://git.example.com/api/v4");
        assert_eq!(gitlab.token_env_var, "GITLAB_TOKEN");
    }

    #[test]
    fn list_elements_are_checked_individually() {
        let paths = violation_paths(&json!({
            "gitOps": {"post_merge": {"cascade_pr": {"labels": ["ok", 3, "fine", false]}}}
        }));
        assert_eq!(
            paths,
            vec![
                "gitOps.post_merge.cascade_pr.labels.1",
                "gitOps.post_merge.cascade_pr.labels.3"
            ]
        );
    }

    #[test]
    fn all_violations_are_reported_together() {
        let paths = violation_paths(&json!({
            "version": 2,
            "gitOps": {
                "post_merge": {"strategy": "bogus"},
                "platform": {"type": "svn"},
                "hooks": {"pre_commit": {"non_blocking": "no"}},
                "commits": {"format": "fancy"}
            }
        }));
        assert_eq!(
            paths,
            vec![
                "version",
                "gitOps.post_merge.strategy",
                "gitOps.hooks.pre_commit.non_blocking",
                "gitOps.platform.type",
                "gitOps.commits.format"
            ]
        );
    }

    #[test]
    fn pre_push_keeps_base_hook_fields() {
        let config = validate_config(&json!({
            "gitOps": {"hooks": {"pre_push": {"enabled": false, "script": "./push.sh"}}}
        }))
        .unwrap();
        let pre_push = config.git_ops.unwrap().hooks.unwrap().pre_push.unwrap();
        assert_eq!(pre_push.hook.enabled, Some(false));
        assert_eq!(pre_push.hook.non_blocking, None);
        assert_eq!(pre_push.hook.script.as_deref(), Some("./push.sh"));
        assert!(pre_push.warn_wip_artifacts);
        assert!(!pre_push.warn_non_artifact_branches);
    }

    #[test]
    fn validate_catches_hand_edits() {
        let mut config = validate_config(&json!({"gitOps": {"cascades": {}}})).unwrap();
        config.validate().unwrap();
        if let Some(cascades) = config.git_ops.as_mut().and_then(|g| g.cascades.as_mut()) {
            cascades.max_parallelism = 0;
        }
        assert_eq!(
            config.validate().unwrap_err().paths(),
            vec!["gitOps.cascades.max_parallelism"]
        );
    }

    static WITH_BLOCK_DEFAULT: ObjectSchema = ObjectSchema {
        name: "test",
        fields: &[
            FieldSpec {
                name: "name",
                kind: FieldType::String,
                presence: Presence::Required,
            },
            FieldSpec {
                name: "cascades",
                kind: FieldType::Object(&crate::config::schema::CASCADES),
                presence: Presence::Defaulted(DefaultValue::Block),
            },
        ],
    };

    #[test]
    fn required_fields_and_block_defaults() {
        let err = resolve(&WITH_BLOCK_DEFAULT, &json!({})).unwrap_err();
        assert_eq!(err.paths(), vec!["name"]);
        assert_eq!(err.violations()[0].message, "Required");

        let resolved = resolve(&WITH_BLOCK_DEFAULT, &json!({"name": "x"})).unwrap();
        assert_eq!(resolved["cascades"]["mode"], json!("immediate"));
        assert_eq!(resolved["cascades"]["max_parallelism"], json!(5));
    }
}
