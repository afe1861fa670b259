//! Information about the execution environment.

use serde::Serialize;

use labkit_common::{Error, Result};

use crate::context::{keys, ConfigContext};

/// Read-only view of user, process and host details.
///
/// User details come from the [`ConfigContext`] so they can be overridden
/// like any other property.
#[derive(Debug, Clone, Copy)]
pub struct SystemInfo<'a> {
    ctx: &'a ConfigContext,
}

/// Serializable snapshot of [`SystemInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemSnapshot {
    pub user_name: Option<String>,
    pub user_home: Option<String>,
    pub pwd: Option<String>,
    pub pid: u32,
    pub hostname: Option<String>,
    pub os_name: Option<String>,
    pub os_arch: Option<String>,
}

impl<'a> SystemInfo<'a> {
    pub fn new(ctx: &'a ConfigContext) -> Self {
        Self { ctx }
    }

    /// Name of the current user.
    pub fn user_name(&self) -> Option<&'a str> {
        self.ctx.get(keys::USER_NAME)
    }

    /// Home directory of the current user.
    pub fn user_home(&self) -> Option<&'a str> {
        self.ctx.get(keys::USER_HOME)
    }

    /// Working directory the context was captured in.
    pub fn pwd(&self) -> Option<&'a str> {
        self.ctx.get(keys::USER_DIR)
    }

    /// Id of this process.
    pub fn pid(&self) -> u32 {
        std::process::id()
    }

    /// Host name of the machine.
    pub fn hostname(&self) -> Result<String> {
        hostname::get()?
            .into_string()
            .map_err(|raw| Error::Hostname(format!("not valid UTF-8: {}", raw.to_string_lossy())))
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        let owned = |v: Option<&str>| v.map(str::to_string);
        SystemSnapshot {
            user_name: owned(self.user_name()),
            user_home: owned(self.user_home()),
            pwd: owned(self.pwd()),
            pid: self.pid(),
            hostname: self.hostname().ok(),
            os_name: owned(self.ctx.get(keys::OS_NAME)),
            os_arch: owned(self.ctx.get(keys::OS_ARCH)),
        }
    }
}
