//! Declarative schema for the Kodebase configuration document
//!
//! The schema is a static tree of field descriptors mirroring
//! [`KodebaseConfig`](crate::config::KodebaseConfig). Each descriptor names
//! the field, its type and what happens when the field is missing. The
//! validator walks this tree; nothing here has behavior of its own.

use crate::config::types::{
    AuthStrategy, CascadeMode, CommitFormat, LogLevel, PlatformType, PostMergeStrategy,
};

/// Value type expected for a field
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum FieldType {
    Bool,
    String,
    /// String that must parse as an absolute URL
    Url,
    StringList,
    /// One of a closed set of string literals
    Enum(&'static [&'static str]),
    /// Integer constrained by a lower bound
    Integer(IntegerBound),
    /// Nested block
    Object(&'static ObjectSchema),
}

/// Lower bound of an integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerBound {
    /// Strictly greater than zero
    Positive,
    /// Greater than or equal to the given value
    AtLeast(i64),
}

/// Literal default substituted for a missing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Str(&'static str),
    Int(u64),
    StrList(&'static [&'static str]),
    /// A nested block materialized with its own defaults
    Block,
}

/// What happens when a field is missing from its parent object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Missing is a violation
    Required,
    /// Missing stays missing
    Optional,
    /// Missing is replaced by the default
    Defaulted(DefaultValue),
}

/// One field of an object schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
    pub presence: Presence,
}

/// Ordered field list of an object
#[derive(Debug)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ObjectSchema {
    /// Look up a field descriptor by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// ==================== Descriptor helpers ====================

const fn boolean(name: &'static str, default: bool) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::Bool,
        presence: Presence::Defaulted(DefaultValue::Bool(default)),
    }
}

const fn optional_boolean(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::Bool,
        presence: Presence::Optional,
    }
}

const fn string(name: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::String,
        presence: Presence::Defaulted(DefaultValue::Str(default)),
    }
}

const fn optional_string(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::String,
        presence: Presence::Optional,
    }
}

const fn url(name: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::Url,
        presence: Presence::Defaulted(DefaultValue::Str(default)),
    }
}

const fn string_list(name: &'static str, default: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::StringList,
        presence: Presence::Defaulted(DefaultValue::StrList(default)),
    }
}

const fn literal(
    name: &'static str,
    values: &'static [&'static str],
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::Enum(values),
        presence: Presence::Defaulted(DefaultValue::Str(default)),
    }
}

const fn integer(name: &'static str, bound: IntegerBound, default: u64) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::Integer(bound),
        presence: Presence::Defaulted(DefaultValue::Int(default)),
    }
}

/// Nested block that stays absent unless the input mentions it
const fn block(name: &'static str, schema: &'static ObjectSchema) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldType::Object(schema),
        presence: Presence::Optional,
    }
}

// ==================== Post-merge ====================

pub static CASCADE_PR: ObjectSchema = ObjectSchema {
    name: "cascade_pr",
    fields: &[
        boolean("auto_merge", true),
        boolean("require_checks", true),
        string_list("labels", &["cascade", "automated"]),
        string("branch_prefix", "cascade/"),
        boolean("delete_branch", true),
    ],
};

pub static DIRECT_COMMIT: ObjectSchema = ObjectSchema {
    name: "direct_commit",
    fields: &[
        string("commit_prefix", "chore(cascade): "),
        boolean("push_immediately", true),
    ],
};

pub static POST_MERGE: ObjectSchema = ObjectSchema {
    name: "post_merge",
    fields: &[
        literal("strategy", PostMergeStrategy::NAMES, "cascade_pr"),
        block("cascade_pr", &CASCADE_PR),
        block("direct_commit", &DIRECT_COMMIT),
    ],
};

// ==================== Post-checkout ====================

pub static POST_CHECKOUT: ObjectSchema = ObjectSchema {
    name: "post_checkout",
    fields: &[
        boolean("create_draft_pr", true),
        string("pr_template", "default"),
        boolean("auto_assign", true),
        boolean("auto_add_labels", true),
        boolean("notify_team", false),
    ],
};

// ==================== Hooks ====================

const HOOK_FIELDS: [FieldSpec; 3] = [
    optional_boolean("enabled"),
    optional_boolean("non_blocking"),
    optional_string("script"),
];

pub static HOOK: ObjectSchema = ObjectSchema {
    name: "hook",
    fields: &HOOK_FIELDS,
};

pub static PRE_COMMIT: ObjectSchema = ObjectSchema {
    name: "pre_commit",
    fields: &[
        HOOK_FIELDS[0],
        HOOK_FIELDS[1],
        HOOK_FIELDS[2],
        boolean("validate_schema", true),
        boolean("validate_state_machine", true),
        boolean("validate_dependencies", true),
    ],
};

pub static PRE_PUSH: ObjectSchema = ObjectSchema {
    name: "pre_push",
    fields: &[
        HOOK_FIELDS[0],
        HOOK_FIELDS[1],
        HOOK_FIELDS[2],
        boolean("warn_wip_artifacts", true),
        boolean("warn_non_artifact_branches", false),
    ],
};

pub static HOOKS: ObjectSchema = ObjectSchema {
    name: "hooks",
    fields: &[
        boolean("enabled", true),
        boolean("non_blocking", true),
        boolean("log_errors", true),
        literal("log_level", LogLevel::NAMES, "info"),
        block("post_checkout", &HOOK),
        block("post_merge", &HOOK),
        block("pre_commit", &PRE_COMMIT),
        block("pre_push", &PRE_PUSH),
    ],
};

// ==================== Platform ====================

pub static GITHUB: ObjectSchema = ObjectSchema {
    name: "github",
    fields: &[
        url("api_url", "https://api.github.com"),
        string("token_env_var", "GITHUB_TOKEN"),
    ],
};

pub static GITLAB: ObjectSchema = ObjectSchema {
    name: "gitlab",
    fields: &[
        url("api_url", "https://gitlab.com/api/v4"),
        string("token_env_var", "GITLAB_TOKEN"),
    ],
};

pub static BITBUCKET: ObjectSchema = ObjectSchema {
    name: "bitbucket",
    fields: &[
        url("api_url", "https://api.bitbucket.org/2.0"),
        string("token_env_var", "BITBUCKET_TOKEN"),
    ],
};

pub static PLATFORM: ObjectSchema = ObjectSchema {
    name: "platform",
    fields: &[
        literal("type", PlatformType::NAMES, "github"),
        literal("auth_strategy", AuthStrategy::NAMES, "auto"),
        block("github", &GITHUB),
        block("gitlab", &GITLAB),
        block("bitbucket", &BITBUCKET),
    ],
};

// ==================== PR creation ====================

pub static PR_CREATION: ObjectSchema = ObjectSchema {
    name: "pr_creation",
    fields: &[
        string("title_template", "{artifact_id}: {title}"),
        string(
            "body_template",
            "## Summary\n{summary}\n\n## Acceptance Criteria\n{acceptance_criteria}",
        ),
        boolean("auto_assign", true),
        boolean("auto_add_labels", true),
        boolean("auto_request_reviewers", false),
        string_list("additional_labels", &[]),
        string_list("default_reviewers", &[]),
        boolean("link_milestone", true),
        boolean("add_to_project", false),
        optional_string("project_id"),
    ],
};

// ==================== Cascades ====================

pub static CASCADES: ObjectSchema = ObjectSchema {
    name: "cascades",
    fields: &[
        literal("mode", CascadeMode::NAMES, "immediate"),
        integer("batch_delay_seconds", IntegerBound::Positive, 30),
        integer("max_batch_size", IntegerBound::Positive, 10),
        boolean("parallel_execution", true),
        integer("max_parallelism", IntegerBound::AtLeast(1), 5),
        boolean("dry_run", false),
        boolean("require_confirmation", false),
    ],
};

// ==================== Validation ====================

pub static VALIDATION: ObjectSchema = ObjectSchema {
    name: "validation",
    fields: &[
        boolean("enforce_schema", true),
        boolean("enforce_state_machine", true),
        boolean("enforce_dependencies", true),
        boolean("warn_missing_fields", true),
        boolean("error_on_warnings", false),
        boolean("allow_wip_commits", true),
        boolean("allow_cross_milestone_deps", false),
        boolean("warn_draft_artifacts", true),
        boolean("warn_blocked_artifacts", true),
    ],
};

// ==================== Branches ====================

pub static BRANCHES: ObjectSchema = ObjectSchema {
    name: "branches",
    fields: &[
        string("artifact_branch_format", "{artifact_id}"),
        string("cascade_branch_format", "cascade/{artifact_id}"),
        boolean("delete_after_merge", true),
        boolean("delete_cascade_branches", true),
        boolean("require_pr_for_main", true),
        string_list("allowed_direct_branches", &[]),
    ],
};

// ==================== Commits ====================

pub static CONVENTIONAL_COMMITS: ObjectSchema = ObjectSchema {
    name: "conventional",
    fields: &[
        string("type_prefix", "feat"),
        optional_string("scope"),
        string("breaking_change_marker", "!"),
    ],
};

pub static COMMITS: ObjectSchema = ObjectSchema {
    name: "commits",
    fields: &[
        literal("format", CommitFormat::NAMES, "conventional"),
        block("conventional", &CONVENTIONAL_COMMITS),
        optional_string("custom_template"),
        string("cascade_prefix", "chore(cascade): "),
        string("validation_prefix", "chore(validation): "),
        boolean("add_coauthor", true),
        string("agent_email_format", "cascade@kodebase.ai"),
    ],
};

// ==================== Root ====================

pub static GIT_OPS: ObjectSchema = ObjectSchema {
    name: "gitOps",
    fields: &[
        block("post_merge", &POST_MERGE),
        block("post_checkout", &POST_CHECKOUT),
        block("hooks", &HOOKS),
        block("platform", &PLATFORM),
        block("pr_creation", &PR_CREATION),
        block("cascades", &CASCADES),
        block("validation", &VALIDATION),
        block("branches", &BRANCHES),
        block("commits", &COMMITS),
    ],
};

/// Schema of the whole configuration document
pub static KODEBASE_CONFIG: ObjectSchema = ObjectSchema {
    name: "root",
    fields: &[
        string("version", "1.0"),
        block("gitOps", &GIT_OPS),
        string("artifactsDir", ".kodebase/artifacts"),
    ],
};
