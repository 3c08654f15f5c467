//! Zero-config baseline

use crate::config::types::{
    GitOpsConfig, HooksConfig, KodebaseConfig, PlatformConfig, PostCheckoutConfig,
    PostMergeConfig,
};

/// Default configuration file path relative to the project root
pub const DEFAULT_CONFIG_PATH: &str = ".kodebase/config/settings.yml";

/// Default artifacts directory relative to the project root
pub const DEFAULT_ARTIFACTS_DIR: &str = ".kodebase/artifacts";

/// Returns the configuration used when no settings file exists
///
/// Every call builds a new value, so callers may modify their copy freely.
/// The baseline uses the `cascade_pr` merge strategy, draft PRs on checkout,
/// enabled non-blocking hooks and GitHub with automatic authentication.
#[must_use]
pub fn get_default_config() -> KodebaseConfig {
    KodebaseConfig {
        version: "1.0".to_owned(),
        artifacts_dir: DEFAULT_ARTIFACTS_DIR.to_owned(),
        git_ops: Some(GitOpsConfig {
            post_merge: Some(PostMergeConfig::default()),
            post_checkout: Some(PostCheckoutConfig::default()),
            hooks: Some(HooksConfig::default()),
            platform: Some(PlatformConfig::default()),
            ..GitOpsConfig::default()
        }),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::config::types::{AuthStrategy, PlatformType, PostMergeStrategy};

    #[test]
    fn baseline_values() {
        let config = get_default_config();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.artifacts_dir, ".kodebase/artifacts");

        let git_ops = config.git_ops.unwrap();
        assert_eq!(
            git_ops.post_merge.unwrap().strategy,
            PostMergeStrategy::CascadePr
        );
        assert!(git_ops.post_checkout.unwrap().create_draft_pr);
        let hooks = git_ops.hooks.unwrap();
        assert!(hooks.enabled);
        assert!(hooks.non_blocking);
        let platform = git_ops.platform.unwrap();
        assert_eq!(platform.platform_type, PlatformType::Github);
        assert_eq!(platform.auth_strategy, AuthStrategy::Auto);
        assert!(git_ops.cascades.is_none());
    }

    #[test]
    fn each_call_is_independent() {
        let mut first = get_default_config();
        let second = get_default_config();
        assert_eq!(first, second);

        first.artifacts_dir = "elsewhere".to_owned();
        first.git_ops = None;
        assert_eq!(second, get_default_config());
    }
}
