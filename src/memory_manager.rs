use memmap::{Mmap, MmapMut};
use std::fs::{File, OpenOptions};
use std::io::{Error, ErrorKind, Result};
use std::path::Path;

/// A read-only memory mapped file.
pub struct MmapFile {
    mmap: Option<Mmap>,
}

impl MmapFile {
    pub fn from_file(file: &File) -> Result<Self> {
        let mmap = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(file)? })
        };
        Ok(Self { mmap })
    }

    fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}

/// A memory mapped file.
pub struct MmapMutFile {
    file: File,
    mmap: Option<MmapMut>,
}

impl MmapMutFile {
    pub fn from_file(file: File) -> Result<Self> {
        let mut mmapfile = Self { file, mmap: None };
        mmapfile.remap()?;
        Ok(mmapfile)
    }

    fn remap(&mut self) -> Result<()> {
        self.mmap = if self.file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapMut::map_mut(&self.file)? })
        };
        Ok(())
    }

    fn resize(&mut self, new_len: usize) -> Result<()> {
        self.mmap = None;
        self.file.set_len(new_len as u64)?;
        self.remap()
    }

    fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.mmap.as_deref_mut().unwrap_or(&mut [])
    }
}

/// A memory manager to hide the underlying type of the memory buffer.
pub enum MemoryManager {
    /// A memory buffer.
    Mem(Vec<u8>),
    /// A read-only memory mapped buffer.
    Mmap(MmapFile),
    /// A memory mapped buffer.
    MmapMut(MmapMutFile),
    /// A sink.
    Sink,
}

impl MemoryManager {
    pub fn new_mem(size: usize) -> Self {
        MemoryManager::Mem(vec![0; size])
    }

    pub fn new_mmap<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(MemoryManager::Mmap(MmapFile::from_file(&File::open(path)?)?))
    }

    pub fn new_mmap_mut<P: AsRef<Path>>(path: P, size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(size as u64)?;
        Ok(MemoryManager::MmapMut(MmapMutFile::from_file(file)?))
    }

    pub fn new_sink() -> Self {
        MemoryManager::Sink
    }

    pub fn len(&self) -> usize {
        match self {
            MemoryManager::Mem(vec) => vec.len(),
            MemoryManager::Mmap(mmapfile) => mmapfile.as_bytes().len(),
            MemoryManager::MmapMut(mmapfile) => mmapfile.as_bytes().len(),
            MemoryManager::Sink => usize::MAX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        match self {
            MemoryManager::Mem(vec) => vec.resize(new_len, 0),
            MemoryManager::Mmap(_) => return Err(read_only()),
            MemoryManager::MmapMut(mmapfile) => mmapfile.resize(new_len)?,
            MemoryManager::Sink => (),
        }
        Ok(())
    }

    /// Returns the whole buffer; a sink holds no bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MemoryManager::Mem(vec) => vec.as_slice(),
            MemoryManager::Mmap(mmapfile) => mmapfile.as_bytes(),
            MemoryManager::MmapMut(mmapfile) => mmapfile.as_bytes(),
            MemoryManager::Sink => &[],
        }
    }

    /// Copies `src` to `pos`, which must lie within the current length.
    pub fn copy_from_slice(&mut self, pos: usize, src: &[u8]) -> Result<()> {
        let dst = match self {
            MemoryManager::Mem(vec) => vec.as_mut_slice(),
            MemoryManager::Mmap(_) => return Err(read_only()),
            MemoryManager::MmapMut(mmapfile) => mmapfile.as_mut_bytes(),
            MemoryManager::Sink => return Ok(()),
        };
        match pos
            .checked_add(src.len())
            .and_then(|end| dst.get_mut(pos..end))
        {
            Some(dst) => {
                dst.copy_from_slice(src);
                Ok(())
            }
            None => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("write of {} bytes at {} is out of bounds", src.len(), pos),
            )),
        }
    }

    pub fn flush(&self) -> Result<()> {
        match self {
            MemoryManager::MmapMut(MmapMutFile {
                mmap: Some(mmap), ..
            }) => mmap.flush(),
            _ => Ok(()),
        }
    }
}

fn read_only() -> Error {
    Error::new(ErrorKind::PermissionDenied, "read-only memory manager")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mem_len() {
        let mm = MemoryManager::Mem(vec![1, 2, 3, 4, 5]);
        assert_eq!(mm.len(), 5);
    }

    #[test]
    fn test_mem_shrink_expand() {
        let mut mm = MemoryManager::Mem(vec![1, 2, 3, 4, 5, 6]);
        mm.resize(3).unwrap();
        assert_eq!(mm.as_bytes(), [1, 2, 3]);
        mm.resize(6).unwrap();
        assert_eq!(mm.as_bytes(), [1, 2, 3, 0, 0, 0]);
        mm.resize(0).unwrap();
        assert!(mm.is_empty());
    }

    #[test]
    fn test_mem_copy_from_slice() {
        let mut mm = MemoryManager::new_mem(6);
        mm.copy_from_slice(1, &[7, 8]).unwrap();
        assert_eq!(mm.as_bytes(), [0, 7, 8, 0, 0, 0]);
        assert!(mm.copy_from_slice(5, &[1, 2]).is_err());
    }

    fn new_mmap_mut_mm() -> MemoryManager {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&[1, 2, 3, 4, 5, 6]).unwrap();
        MemoryManager::MmapMut(MmapMutFile::from_file(file).unwrap())
    }

    #[test]
    fn test_mmap_mut_shrink_expand() {
        let mut mm = new_mmap_mut_mm();
        assert_eq!(mm.len(), 6);
        mm.resize(3).unwrap();
        assert_eq!(mm.as_bytes(), [1, 2, 3]);
        mm.resize(6).unwrap();
        assert_eq!(mm.as_bytes(), [1, 2, 3, 0, 0, 0]);
        mm.resize(0).unwrap();
        assert!(mm.as_bytes().is_empty());
        mm.resize(3).unwrap();
        mm.copy_from_slice(0, &[9, 9, 9]).unwrap();
        assert_eq!(mm.as_bytes(), [9, 9, 9]);
        mm.flush().unwrap();
    }

    #[test]
    fn test_mmap_read_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[4, 5, 6]).unwrap();
        let mut mm = MemoryManager::new_mmap(file.path()).unwrap();
        assert_eq!(mm.as_bytes(), [4, 5, 6]);
        assert!(mm.copy_from_slice(0, &[1]).is_err());
        assert!(mm.resize(1).is_err());
    }

    #[test]
    fn test_mmap_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mm = MemoryManager::new_mmap(file.path()).unwrap();
        assert!(mm.is_empty());
    }

    #[test]
    fn test_sink() {
        let mut mm = MemoryManager::new_sink();
        assert_eq!(mm.len(), usize::MAX);
        mm.resize(10).unwrap();
        mm.copy_from_slice(100, &[1, 2, 3]).unwrap();
        assert!(mm.as_bytes().is_empty());
    }
}
