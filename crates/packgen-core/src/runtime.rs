//! Node.js and package manager detection

use std::fmt;
use std::process::Command;

/// Package managers in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
}

const PACKAGE_MANAGERS: &[PackageManager] =
    &[PackageManager::Pnpm, PackageManager::Yarn, PackageManager::Npm];

impl PackageManager {
    /// Binary name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    pub fn install_command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm install",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm install",
        }
    }

    /// Command that runs a `package.json` script
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            other => format!("{} {}", other.command(), script),
        }
    }

    /// Parse `npm_config_user_agent`, e.g. `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`
    pub fn from_user_agent(agent: &str) -> Option<Self> {
        let name = agent.split_whitespace().next()?.split('/').next()?;
        PACKAGE_MANAGERS.iter().copied().find(|pm| pm.command() == name)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, binary: &str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => RuntimeInfo {
            name,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
            available: true,
        },
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// The package manager that launched us, else the first one installed, else npm
pub fn detect_package_manager() -> PackageManager {
    if let Some(pm) = std::env::var("npm_config_user_agent")
        .ok()
        .and_then(|agent| PackageManager::from_user_agent(&agent))
    {
        return pm;
    }

    for pm in PACKAGE_MANAGERS {
        if probe(pm.command(), pm.command()).available {
            return *pm;
        }
    }
    // Default to npm if nothing detected (install step will fail with a helpful error)
    PackageManager::Npm
}
