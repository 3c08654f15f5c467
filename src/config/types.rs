//! Typed configuration model
//!
//! Values of these types are only produced by the validator (or copied from a
//! preset), so every defaulted field of a present block already holds its
//! resolved value. Blocks that were absent from the input stay `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed string enum together with its literal names
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $literal:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $literal)] $variant),+
        }

        impl $name {
            /// Every accepted literal, in declaration order
            pub const NAMES: &'static [&'static str] = &[$($literal),+];

            #[must_use]
            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $literal),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum! {
    /// Strategy for handling post-merge cascades
    pub enum PostMergeStrategy {
        CascadePr => "cascade_pr",
        DirectCommit => "direct_commit",
        Manual => "manual",
    }
}

literal_enum! {
    /// Git hosting platform
    pub enum PlatformType {
        Github => "github",
        Gitlab => "gitlab",
        Bitbucket => "bitbucket",
    }
}

literal_enum! {
    /// How credentials for the platform are obtained
    pub enum AuthStrategy {
        Auto => "auto",
        Token => "token",
        Cli => "cli",
    }
}

literal_enum! {
    /// Cascade execution mode
    pub enum CascadeMode {
        Immediate => "immediate",
        Batched => "batched",
        Manual => "manual",
    }
}

literal_enum! {
    /// Commit message format
    pub enum CommitFormat {
        Conventional => "conventional",
        Simple => "simple",
        Custom => "custom",
    }
}

literal_enum! {
    /// Logging level for hook operations
    pub enum LogLevel {
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

/// Root configuration document (`.kodebase/config/settings.yml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KodebaseConfig {
    /// Configuration format version
    pub version: String,

    /// Base directory for artifacts
    #[serde(rename = "artifactsDir")]
    pub artifacts_dir: String,

    /// Git operations settings
    #[serde(rename = "gitOps", default, skip_serializing_if = "Option::is_none")]
    pub git_ops: Option<GitOpsConfig>,
}

/// Git operations settings; every block is independently optional
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GitOpsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_merge: Option<PostMergeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_checkout: Option<PostCheckoutConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HooksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_creation: Option<PrCreationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascades: Option<CascadesConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<BranchesConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commits: Option<CommitsConfig>,
}

// ==================== Post-merge ====================

/// Post-merge behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMergeConfig {
    pub strategy: PostMergeStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade_pr: Option<CascadePrConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_commit: Option<DirectCommitConfig>,
}

impl Default for PostMergeConfig {
    fn default() -> Self {
        Self {
            strategy: PostMergeStrategy::CascadePr,
            cascade_pr: None,
            direct_commit: None,
        }
    }
}

/// Settings for the `cascade_pr` strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePrConfig {
    /// Auto-merge PRs when checks pass
    pub auto_merge: bool,
    pub require_checks: bool,
    pub labels: Vec<String>,
    pub branch_prefix: String,
    pub delete_branch: bool,
}

impl Default for CascadePrConfig {
    fn default() -> Self {
        Self {
            auto_merge: true,
            require_checks: true,
            labels: vec!["cascade".to_owned(), "automated".to_owned()],
            branch_prefix: "cascade/".to_owned(),
            delete_branch: true,
        }
    }
}

/// Settings for the `direct_commit` strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectCommitConfig {
    pub commit_prefix: String,
    pub push_immediately: bool,
}

impl Default for DirectCommitConfig {
    fn default() -> Self {
        Self {
            commit_prefix: "chore(cascade): ".to_owned(),
            push_immediately: true,
        }
    }
}

// ==================== Post-checkout ====================

/// Post-checkout behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCheckoutConfig {
    pub create_draft_pr: bool,
    /// `default`, `minimal`, `detailed` or a custom template path
    pub pr_template: String,
    pub auto_assign: bool,
    pub auto_add_labels: bool,
    pub notify_team: bool,
}

impl Default for PostCheckoutConfig {
    fn default() -> Self {
        Self {
            create_draft_pr: true,
            pr_template: "default".to_owned(),
            auto_assign: true,
            auto_add_labels: true,
            notify_team: false,
        }
    }
}

// ==================== Hooks ====================

/// Fields shared by every individual hook
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HookConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_blocking: Option<bool>,
    /// Custom script to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Pre-commit hook: the base hook fields plus artifact checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreCommitConfig {
    #[serde(flatten)]
    pub hook: HookConfig,
    pub validate_schema: bool,
    pub validate_state_machine: bool,
    pub validate_dependencies: bool,
}

impl Default for PreCommitConfig {
    fn default() -> Self {
        Self {
            hook: HookConfig::default(),
            validate_schema: true,
            validate_state_machine: true,
            validate_dependencies: true,
        }
    }
}

/// Pre-push hook: the base hook fields plus push warnings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrePushConfig {
    #[serde(flatten)]
    pub hook: HookConfig,
    pub warn_wip_artifacts: bool,
    pub warn_non_artifact_branches: bool,
}

impl Default for PrePushConfig {
    fn default() -> Self {
        Self {
            hook: HookConfig::default(),
            warn_wip_artifacts: true,
            warn_non_artifact_branches: false,
        }
    }
}

/// Git hooks master settings and per-hook overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Master switch for all hooks
    pub enabled: bool,
    pub non_blocking: bool,
    pub log_errors: bool,
    pub log_level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_checkout: Option<HookConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_merge: Option<HookConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_commit: Option<PreCommitConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_push: Option<PrePushConfig>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            non_blocking: true,
            log_errors: true,
            log_level: LogLevel::Info,
            post_checkout: None,
            post_merge: None,
            pre_commit: None,
            pre_push: None,
        }
    }
}

// ==================== Platform ====================

/// API endpoint and token variable for one hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEndpointConfig {
    pub api_url: String,
    /// Name of the environment variable holding the token
    pub token_env_var: String,
}

impl PlatformEndpointConfig {
    fn new(api_url: &str, token_env_var: &str) -> Self {
        Self {
            api_url: api_url.to_owned(),
            token_env_var: token_env_var.to_owned(),
        }
    }

    #[must_use]
    pub fn github() -> Self {
        Self::new("https://api.github.com", "GITHUB_TOKEN")
    }

    #[must_use]
    pub fn gitlab() -> Self {
        Self::new("https://gitlab.com/api/v4", "GITLAB_TOKEN")
    }

    #[must_use]
    pub fn bitbucket() -> Self {
        Self::new("https://api.bitbucket.org/2.0", "BITBUCKET_TOKEN")
    }
}

/// Platform selection and per-platform settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(rename = "type")]
    pub platform_type: PlatformType,
    pub auth_strategy: AuthStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<PlatformEndpointConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<PlatformEndpointConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitbucket: Option<PlatformEndpointConfig>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform_type: PlatformType::Github,
            auth_strategy: AuthStrategy::Auto,
            github: None,
            gitlab: None,
            bitbucket: None,
        }
    }
}

// ==================== PR creation ====================

/// PR creation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrCreationConfig {
    pub title_template: String,
    pub body_template: String,
    pub auto_assign: bool,
    pub auto_add_labels: bool,
    pub auto_request_reviewers: bool,
    pub additional_labels: Vec<String>,
    pub default_reviewers: Vec<String>,
    pub link_milestone: bool,
    pub add_to_project: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Default for PrCreationConfig {
    fn default() -> Self {
        Self {
            title_template: "{artifact_id}: {title}".to_owned(),
            body_template:
                "## Summary\n{summary}\n\n## Acceptance Criteria\n{acceptance_criteria}"
                    .to_owned(),
            auto_assign: true,
            auto_add_labels: true,
            auto_request_reviewers: false,
            additional_labels: Vec::new(),
            default_reviewers: Vec::new(),
            link_milestone: true,
            add_to_project: false,
            project_id: None,
        }
    }
}

// ==================== Cascades ====================

/// Cascade execution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadesConfig {
    pub mode: CascadeMode,
    /// Delay before a batch runs (batched mode); always > 0
    pub batch_delay_seconds: u64,
    /// Always > 0
    pub max_batch_size: u64,
    pub parallel_execution: bool,
    /// Always >= 1
    pub max_parallelism: u64,
    pub dry_run: bool,
    pub require_confirmation: bool,
}

impl Default for CascadesConfig {
    fn default() -> Self {
        Self {
            mode: CascadeMode::Immediate,
            batch_delay_seconds: 30,
            max_batch_size: 10,
            parallel_execution: true,
            max_parallelism: 5,
            dry_run: false,
            require_confirmation: false,
        }
    }
}

// ==================== Validation ====================

/// Artifact validation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub enforce_schema: bool,
    pub enforce_state_machine: bool,
    pub enforce_dependencies: bool,
    pub warn_missing_fields: bool,
    pub error_on_warnings: bool,
    pub allow_wip_commits: bool,
    pub allow_cross_milestone_deps: bool,
    pub warn_draft_artifacts: bool,
    pub warn_blocked_artifacts: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_schema: true,
            enforce_state_machine: true,
            enforce_dependencies: true,
            warn_missing_fields: true,
            error_on_warnings: false,
            allow_wip_commits: true,
            allow_cross_milestone_deps: false,
            warn_draft_artifacts: true,
            warn_blocked_artifacts: true,
        }
    }
}

// ==================== Branches ====================

/// Branch naming and cleanup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchesConfig {
    pub artifact_branch_format: String,
    pub cascade_branch_format: String,
    pub delete_after_merge: bool,
    pub delete_cascade_branches: bool,
    pub require_pr_for_main: bool,
    pub allowed_direct_branches: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            artifact_branch_format: "{artifact_id}".to_owned(),
            cascade_branch_format: "cascade/{artifact_id}".to_owned(),
            delete_after_merge: true,
            delete_cascade_branches: true,
            require_pr_for_main: true,
            allowed_direct_branches: Vec::new(),
        }
    }
}

// ==================== Commits ====================

/// Conventional Commits details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalCommitsConfig {
    /// e.g. `feat`, `fix`
    pub type_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub breaking_change_marker: String,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        Self {
            type_prefix: "feat".to_owned(),
            scope: None,
            breaking_change_marker: "!".to_owned(),
        }
    }
}

/// Commit message formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitsConfig {
    pub format: CommitFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conventional: Option<ConventionalCommitsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_template: Option<String>,
    pub cascade_prefix: String,
    pub validation_prefix: String,
    pub add_coauthor: bool,
    pub agent_email_format: String,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        Self {
            format: CommitFormat::Conventional,
            conventional: None,
            custom_template: None,
            cascade_prefix: "chore(cascade): ".to_owned(),
            validation_prefix: "chore(validation): ".to_owned(),
            add_coauthor: true,
            agent_email_format: "cascade@kodebase.ai".to_owned(),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_literals() {
        assert_eq!(PostMergeStrategy::CascadePr.as_str(), "cascade_pr");
        assert_eq!(LogLevel::NAMES, &["debug", "info", "warn", "error"]);
        assert_eq!(
            serde_json::to_value(PlatformType::Bitbucket).unwrap(),
            json!("bitbucket")
        );
    }

    #[test]
    fn pre_commit_flattens_hook_fields() {
        let pre_commit = PreCommitConfig {
            hook: HookConfig {
                enabled: Some(true),
                non_blocking: Some(false),
                script: None,
            },
            ..PreCommitConfig::default()
        };
        let value = serde_json::to_value(&pre_commit).unwrap();
        assert_eq!(
            value,
            json!({
                "enabled": true,
                "non_blocking": false,
                "validate_schema": true,
                "validate_state_machine": true,
                "validate_dependencies": true
            })
        );
        let back: PreCommitConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, pre_commit);
    }

    #[test]
    fn absent_blocks_are_not_serialized() {
        let config = KodebaseConfig {
            version: "1.0".to_owned(),
            artifacts_dir: ".kodebase/artifacts".to_owned(),
            git_ops: Some(GitOpsConfig::default()),
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"version": "1.0", "artifactsDir": ".kodebase/artifacts", "gitOps": {}})
        );
    }
}
