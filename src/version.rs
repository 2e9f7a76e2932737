//! What binary is running: package version plus the git and toolchain facts
//! `build.rs` captured.

use std::fmt;

/// Compile-time facts about this binary.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_branch: &'static str,
    /// "true", "false", or "unknown" when git was unavailable.
    git_state: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub host: &'static str,
    pub rustc: &'static str,
}

const CURRENT: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    git_hash: env!("PROFILE_DIR_GIT_HASH"),
    git_branch: env!("PROFILE_DIR_GIT_BRANCH"),
    git_state: env!("PROFILE_DIR_GIT_DIRTY"),
    built_at: env!("PROFILE_DIR_BUILD_TIMESTAMP"),
    target: env!("PROFILE_DIR_TARGET"),
    profile: env!("PROFILE_DIR_PROFILE"),
    host: env!("PROFILE_DIR_BUILD_HOST"),
    rustc: env!("PROFILE_DIR_RUSTC_VERSION"),
};

impl BuildInfo {
    pub fn git_dirty(&self) -> bool {
        self.git_state == "true"
    }

    /// `<version>-<hash>`, suffixed with `-dirty` for uncommitted builds.
    pub fn full_version(&self) -> String {
        let dirty = if self.git_dirty() { "-dirty" } else { "" };
        format!("{}-{}{}", self.version, self.git_hash, dirty)
    }

    /// Labelled rows for the `version` command, grouped by heading.
    fn sections(&self) -> [(&'static str, Vec<(&'static str, String)>); 3] {
        let hash = if self.git_dirty() {
            format!("{} (dirty)", self.git_hash)
        } else {
            self.git_hash.to_string()
        };
        [
            (
                "Build Information",
                vec![
                    ("Version", self.version.to_string()),
                    ("Git Hash", hash),
                    ("Git Branch", self.git_branch.to_string()),
                    ("Built", self.built_at.to_string()),
                    ("Profile", self.profile.to_string()),
                ],
            ),
            (
                "Target",
                vec![("Triple", self.target.to_string()), ("Host", self.host.to_string())],
            ),
            ("Compiler", vec![("rustc", self.rustc.to_string())]),
        ]
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.full_version())?;
        for (heading, rows) in self.sections() {
            writeln!(f)?;
            writeln!(f, "{}:", heading)?;
            for (label, value) in rows {
                writeln!(f, "  {:<11} {}", format!("{}:", label), value)?;
            }
        }
        Ok(())
    }
}

pub fn build_info() -> BuildInfo {
    CURRENT
}

/// `profile-directory version`
pub fn print_version() {
    print!("{}", build_info());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_this_package() {
        let info = build_info();
        assert_eq!(info.name, "profile-directory");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_full_version_suffix_follows_git_state() {
        let clean = BuildInfo { git_hash: "abc1234", git_state: "false", ..build_info() };
        assert_eq!(clean.full_version(), format!("{}-abc1234", clean.version));

        let dirty = BuildInfo { git_state: "true", ..clean };
        assert!(dirty.full_version().ends_with("-abc1234-dirty"));

        let unknown = BuildInfo { git_state: "unknown", ..clean };
        assert!(!unknown.git_dirty());
    }

    #[test]
    fn test_display_groups_rows() {
        let text = BuildInfo { git_hash: "abc1234", git_state: "true", ..build_info() }.to_string();
        assert!(text.lines().next().unwrap_or_default().starts_with("profile-directory "));
        assert!(text.contains("Build Information:"));
        assert!(text.contains("  Git Hash:   abc1234 (dirty)"));
        assert!(text.contains("Target:"));
        assert!(text.contains("Compiler:"));
    }
}
