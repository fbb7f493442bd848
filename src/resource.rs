use std::{
    collections::BTreeMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use crate::value::ResourceHandle;

pub const STREAM: &str = "stream";

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Unable to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("Unknown resource id {0}")]
    Unknown(u32),
}

struct OpenResource {
    path: PathBuf,
    _file: File,
}

/// Owns every handle it opens and closes them all when dropped
pub struct ResourceTable {
    open: BTreeMap<u32, OpenResource>,
    next_id: u32,
}

impl Default for ResourceTable {
    fn default() -> Self {
        ResourceTable::new()
    }
}

impl ResourceTable {
    pub fn new() -> Self {
        ResourceTable {
            open: BTreeMap::new(),
            next_id: 1,
        }
    }
    /// Open `path` for reading and mint a handle for it
    pub fn open<P>(&mut self, path: P) -> Result<ResourceHandle, ResourceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ResourceError::Open {
            path: path.clone(),
            source,
        })?;
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("opened resource({}) on {}", id, path.display());
        self.open.insert(id, OpenResource { path, _file: file });
        Ok(ResourceHandle {
            id,
            type_name: STREAM,
        })
    }
    pub fn close(&mut self, handle: ResourceHandle) -> Result<(), ResourceError> {
        let resource = self
            .open
            .remove(&handle.id)
            .ok_or(ResourceError::Unknown(handle.id))?;
        log::debug!(
            "closed resource({}) on {}",
            handle.id,
            resource.path.display()
        );
        Ok(())
    }
    pub fn is_open(&self, handle: ResourceHandle) -> bool {
        self.open.contains_key(&handle.id)
    }
    pub fn len(&self) -> usize {
        self.open.len()
    }
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl Drop for ResourceTable {
    fn drop(&mut self) {
        for (id, resource) in std::mem::take(&mut self.open) {
            log::debug!("released resource({}) on {}", id, resource.path.display());
        }
    }
}
