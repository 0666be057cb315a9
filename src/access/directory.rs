use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::AccessSettings;

use super::AccessPlatform;
use super::permission::{GrantRequest, GrantResolver, GrantResponse, Permission};

/// A consent question waiting for the user.
struct Prompt {
    permissions: Vec<Permission>,
    resolver: GrantResolver,
}

/// Desktop access platform guarding a library directory.
///
/// A permission can only be granted while `root` is readable. With prompting
/// enabled the user has to approve it once per launch.
pub struct DirectoryAccess {
    root: PathBuf,
    platform_level: u32,
    prompt_enabled: bool,
    granted: HashSet<Permission>,
    prompt: Option<Prompt>,
}

impl DirectoryAccess {
    pub fn new(root: impl Into<PathBuf>, settings: &AccessSettings) -> Self {
        Self {
            root: root.into(),
            platform_level: settings.platform_level,
            prompt_enabled: settings.prompt,
            granted: HashSet::new(),
            prompt: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Permissions the user is currently being asked about, if any.
    pub fn pending_prompt(&self) -> Option<&[Permission]> {
        self.prompt.as_ref().map(|p| p.permissions.as_slice())
    }

    /// Answer the open prompt. Does nothing when no prompt is open.
    pub fn answer_prompt(&mut self, allow: bool) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        if allow {
            self.granted.extend(prompt.permissions.iter().copied());
        }
        tracing::info!(allow, root = %self.root.display(), "library access prompt answered");
        prompt
            .resolver
            .resolve(GrantResponse::uniform(&prompt.permissions, allow));
    }

    fn root_readable(&self) -> bool {
        std::fs::read_dir(&self.root).is_ok()
    }
}

impl AccessPlatform for DirectoryAccess {
    fn platform_level(&self) -> u32 {
        self.platform_level
    }

    fn is_granted(&self, permission: Permission) -> bool {
        if !self.root_readable() {
            return false;
        }
        !self.prompt_enabled || self.granted.contains(&permission)
    }

    fn request(&mut self, permissions: &[Permission]) -> GrantRequest {
        if !self.root_readable() {
            tracing::warn!(root = %self.root.display(), "library root is not readable");
            return GrantRequest::resolved(GrantResponse::uniform(permissions, false));
        }
        if !self.prompt_enabled {
            return GrantRequest::resolved(GrantResponse::uniform(permissions, true));
        }

        let (request, resolver) = GrantRequest::channel();
        // A newer question replaces an unanswered one; dropping its resolver
        // abandons the old request.
        self.prompt = Some(Prompt {
            permissions: permissions.to_vec(),
            resolver,
        });
        request
    }
}
