use crate::policy::utils::available_space;
use crate::upstream::Upstream;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BranchMode {
    ReadWrite,
    ReadOnly,
    NoCreate,
}

/// A directory-backed upstream.
#[derive(Debug)]
pub struct Branch {
    pub path: PathBuf,
    pub mode: BranchMode,
    pub min_free_space: u64,
    name: String,
}

impl Branch {
    pub fn new(path: PathBuf, mode: BranchMode) -> Self {
        Self::with_min_free_space(path, mode, 0)
    }

    pub fn with_min_free_space(path: PathBuf, mode: BranchMode, min_free_space: u64) -> Self {
        let name = path.display().to_string();
        Self {
            path,
            mode,
            min_free_space,
            name,
        }
    }

    pub fn allows_create(&self) -> bool {
        matches!(self.mode, BranchMode::ReadWrite)
    }
}

impl Upstream for Branch {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_no_create(&self) -> bool {
        !self.allows_create()
    }

    fn min_free_space(&self) -> u64 {
        self.min_free_space
    }

    fn free_space(&self) -> io::Result<u64> {
        available_space(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_branch_creation() {
        let temp_dir = TempDir::new().unwrap();
        let branch = Branch::new(temp_dir.path().to_path_buf(), BranchMode::ReadWrite);

        assert!(branch.allows_create());
        assert!(!branch.is_no_create());
        assert_eq!(branch.path, temp_dir.path());
        assert_eq!(branch.min_free_space(), 0);
        assert_eq!(branch.name(), temp_dir.path().display().to_string());
    }

    #[test]
    fn test_readonly_and_nocreate_are_not_creatable() {
        let temp_dir = TempDir::new().unwrap();
        let ro = Branch::new(temp_dir.path().to_path_buf(), BranchMode::ReadOnly);
        let nc = Branch::new(temp_dir.path().to_path_buf(), BranchMode::NoCreate);

        assert!(ro.is_no_create());
        assert!(nc.is_no_create());
    }

    #[test]
    fn test_free_space_reads_real_directory() {
        let temp_dir = TempDir::new().unwrap();
        let branch = Branch::with_min_free_space(temp_dir.path().to_path_buf(), BranchMode::ReadWrite, 1024);

        assert_eq!(branch.min_free_space(), 1024);
        assert!(branch.free_space().is_ok());
    }

    #[test]
    fn test_free_space_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let branch = Branch::new(temp_dir.path().join("does-not-exist"), BranchMode::ReadWrite);

        assert!(branch.free_space().is_err());
    }
}
