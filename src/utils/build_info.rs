/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("SALES_REPORT_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("SALES_REPORT_BUILD_TIMESTAMP").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    /// One-line banner, e.g.
    /// `Sales Report v0.1.0 (abc1234, built 2024-03-01T10:00:00Z)`.
    pub fn banner(&self) -> String {
        format!(
            "Sales Report v{} ({}, built {})",
            self.version, self.git_hash, self.timestamp
        )
    }
}
