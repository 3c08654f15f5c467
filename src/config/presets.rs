//! Named configuration presets for different team sizes
//!
//! Each preset is stored in its validated form: the values it sets plus the
//! schema defaults for the remaining fields of every block it mentions.

use crate::config::defaults::{DEFAULT_ARTIFACTS_DIR, get_default_config};
use crate::config::types::{
    BranchesConfig, CascadeMode, CascadePrConfig, CascadesConfig, CommitFormat, CommitsConfig,
    ConventionalCommitsConfig, DirectCommitConfig, GitOpsConfig, HookConfig, HooksConfig,
    KodebaseConfig, LogLevel, PlatformConfig, PostCheckoutConfig, PostMergeConfig,
    PostMergeStrategy, PrCreationConfig, PreCommitConfig, PrePushConfig, ValidationConfig,
};
use crate::error::KodebaseError;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Single developer: direct commits, relaxed validation, no PR gate on main
pub static SOLO: LazyLock<KodebaseConfig> = LazyLock::new(|| KodebaseConfig {
    version: "1.0".to_owned(),
    artifacts_dir: DEFAULT_ARTIFACTS_DIR.to_owned(),
    git_ops: Some(GitOpsConfig {
        post_merge: Some(PostMergeConfig {
            strategy: PostMergeStrategy::DirectCommit,
            cascade_pr: None,
            direct_commit: Some(DirectCommitConfig::default()),
        }),
        post_checkout: Some(PostCheckoutConfig {
            create_draft_pr: false,
            auto_assign: false,
            auto_add_labels: false,
            notify_team: false,
            ..PostCheckoutConfig::default()
        }),
        hooks: Some(HooksConfig {
            log_level: LogLevel::Warn,
            ..HooksConfig::default()
        }),
        platform: Some(PlatformConfig::default()),
        pr_creation: None,
        cascades: Some(CascadesConfig {
            mode: CascadeMode::Immediate,
            ..CascadesConfig::default()
        }),
        validation: Some(ValidationConfig {
            enforce_state_machine: false,
            enforce_dependencies: false,
            warn_missing_fields: false,
            allow_wip_commits: true,
            allow_cross_milestone_deps: true,
            ..ValidationConfig::default()
        }),
        branches: Some(BranchesConfig {
            require_pr_for_main: false,
            ..BranchesConfig::default()
        }),
        commits: Some(CommitsConfig {
            format: CommitFormat::Simple,
            add_coauthor: false,
            ..CommitsConfig::default()
        }),
    }),
});

/// Small team: auto-merged cascade PRs, balanced validation, conventional commits
pub static SMALL_TEAM: LazyLock<KodebaseConfig> = LazyLock::new(|| KodebaseConfig {
    version: "1.0".to_owned(),
    artifacts_dir: DEFAULT_ARTIFACTS_DIR.to_owned(),
    git_ops: Some(GitOpsConfig {
        post_merge: Some(PostMergeConfig {
            strategy: PostMergeStrategy::CascadePr,
            cascade_pr: Some(CascadePrConfig::default()),
            direct_commit: None,
        }),
        post_checkout: Some(PostCheckoutConfig::default()),
        hooks: Some(HooksConfig {
            pre_commit: Some(PreCommitConfig {
                hook: HookConfig {
                    enabled: Some(true),
                    ..HookConfig::default()
                },
                validate_dependencies: false,
                ..PreCommitConfig::default()
            }),
            pre_push: Some(PrePushConfig {
                hook: HookConfig {
                    enabled: Some(true),
                    ..HookConfig::default()
                },
                ..PrePushConfig::default()
            }),
            ..HooksConfig::default()
        }),
        platform: Some(PlatformConfig::default()),
        pr_creation: Some(PrCreationConfig::default()),
        cascades: Some(CascadesConfig {
            max_parallelism: 3,
            ..CascadesConfig::default()
        }),
        validation: Some(ValidationConfig {
            enforce_dependencies: false,
            ..ValidationConfig::default()
        }),
        branches: Some(BranchesConfig::default()),
        commits: Some(CommitsConfig {
            conventional: Some(ConventionalCommitsConfig::default()),
            ..CommitsConfig::default()
        }),
    }),
});

/// Enterprise: human-approved cascades, blocking hooks, strict validation
pub static ENTERPRISE: LazyLock<KodebaseConfig> = LazyLock::new(|| {
    let blocking = HookConfig {
        enabled: Some(true),
        non_blocking: Some(false),
        script: None,
    };

    KodebaseConfig {
        version: "1.0".to_owned(),
        artifacts_dir: DEFAULT_ARTIFACTS_DIR.to_owned(),
        git_ops: Some(GitOpsConfig {
            post_merge: Some(PostMergeConfig {
                strategy: PostMergeStrategy::CascadePr,
                cascade_pr: Some(CascadePrConfig {
                    auto_merge: false,
                    labels: vec![
                        "cascade".to_owned(),
                        "automated".to_owned(),
                        "requires-review".to_owned(),
                    ],
                    ..CascadePrConfig::default()
                }),
                direct_commit: None,
            }),
            post_checkout: Some(PostCheckoutConfig {
                notify_team: true,
                ..PostCheckoutConfig::default()
            }),
            hooks: Some(HooksConfig {
                non_blocking: false,
                pre_commit: Some(PreCommitConfig {
                    hook: blocking.clone(),
                    ..PreCommitConfig::default()
                }),
                pre_push: Some(PrePushConfig {
                    hook: blocking,
                    warn_wip_artifacts: true,
                    warn_non_artifact_branches: true,
                }),
                ..HooksConfig::default()
            }),
            platform: Some(PlatformConfig::default()),
            pr_creation: Some(PrCreationConfig {
                auto_request_reviewers: true,
                add_to_project: true,
                ..PrCreationConfig::default()
            }),
            cascades: Some(CascadesConfig {
                mode: CascadeMode::Batched,
                batch_delay_seconds: 60,
                max_batch_size: 10,
                parallel_execution: false,
                max_parallelism: 1,
                dry_run: false,
                require_confirmation: true,
            }),
            validation: Some(ValidationConfig {
                error_on_warnings: true,
                allow_wip_commits: false,
                ..ValidationConfig::default()
            }),
            branches: Some(BranchesConfig::default()),
            commits: Some(CommitsConfig {
                conventional: Some(ConventionalCommitsConfig::default()),
                ..CommitsConfig::default()
            }),
        }),
    }
});

/// Alias of the zero-config baseline
pub static DEFAULT: LazyLock<KodebaseConfig> = LazyLock::new(get_default_config);

/// Preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Solo,
    SmallTeam,
    Enterprise,
    Default,
}

impl Preset {
    /// Every preset, in catalog order
    pub const ALL: [Self; 4] = [Self::Solo, Self::SmallTeam, Self::Enterprise, Self::Default];

    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::SmallTeam => "small_team",
            Self::Enterprise => "enterprise",
            Self::Default => "default",
        }
    }

    /// The shared, immutable preset value
    #[must_use]
    pub fn config(self) -> &'static KodebaseConfig {
        match self {
            Self::Solo => &SOLO,
            Self::SmallTeam => &SMALL_TEAM,
            Self::Enterprise => &ENTERPRISE,
            Self::Default => &DEFAULT,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = KodebaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                KodebaseError::configuration(format!(
                    "Unknown preset '{s}'. Available presets: {}",
                    Self::ALL.map(Self::name).join(", ")
                ))
            })
    }
}

/// All presets keyed by name, in catalog order
#[must_use]
pub fn presets() -> [(&'static str, &'static KodebaseConfig); 4] {
    Preset::ALL.map(|p| (p.name(), p.config()))
}
