//! Permission gate collaborators.
//!
//! `AccessPlatform` is the seam to whatever grants read access to the media
//! library. `DirectoryAccess` is the desktop implementation used at runtime.

mod directory;
mod permission;

pub use directory::DirectoryAccess;
pub use permission::*;

/// The platform side of the permission gate.
pub trait AccessPlatform {
    /// Version level used to choose the required permission.
    fn platform_level(&self) -> u32;

    /// Whether `permission` is currently granted.
    fn is_granted(&self, permission: Permission) -> bool;

    /// Ask for `permissions`. The answer arrives later through the returned request.
    fn request(&mut self, permissions: &[Permission]) -> GrantRequest;

    /// The permissions needed to enumerate media on this platform.
    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::required_for(self.platform_level())]
    }
}
