//! Package implementation
//!
//! Handles reading and writing DOCX files as ZIP packages. Every member is
//! loaded eagerly into memory; the archive handle is retained only so that
//! individual members can be re-read until the package is closed.

use crate::error::{Error, Result};
use crate::opc::Part;
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::result::ZipError;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// How a member whose bytes cannot be read is handled while opening
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Store the member as empty content and keep going
    #[default]
    Tolerant,
    /// Fail the whole open
    Strict,
}

/// Options controlling how a package is opened
#[derive(Clone, Debug, Default)]
pub struct OpenOptions {
    read_policy: ReadPolicy,
}

impl OpenOptions {
    /// Default options (tolerant member reads)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-member read policy
    pub fn read_policy(mut self, policy: ReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    /// Shorthand for `read_policy(ReadPolicy::Strict)`
    pub fn strict(self) -> Self {
        self.read_policy(ReadPolicy::Strict)
    }

    /// Get the configured read policy
    pub fn policy(&self) -> ReadPolicy {
        self.read_policy
    }
}

/// Any seekable byte source an archive can be read from
trait ArchiveSource: Read + Seek + Send {}

impl<T: Read + Seek + Send> ArchiveSource for T {}

type Archive = ZipArchive<Box<dyn ArchiveSource>>;

/// A DOCX package: member name to byte content
pub struct Package {
    /// Members in archive order
    parts: Vec<Part>,
    /// Member name to position in `parts`
    index: HashMap<String, usize>,
    /// Archive the package was read from, until closed
    archive: Option<Archive>,
}

impl Package {
    /// Create a new empty package
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            index: HashMap::new(),
            archive: None,
        }
    }

    /// Open a package from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &OpenOptions::default())
    }

    /// Open a package from a file path with explicit options
    pub fn open_with<P: AsRef<Path>>(path: P, options: &OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening package {}", path.display());
        let file = File::open(path)?;
        Self::from_reader_with(BufReader::new(file), options)
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &OpenOptions::default())
    }

    /// Open a package from bytes with explicit options
    pub fn from_bytes_with(bytes: &[u8], options: &OpenOptions) -> Result<Self> {
        Self::from_reader_with(Cursor::new(bytes.to_vec()), options)
    }

    /// Open a package from a reader
    pub fn from_reader<R: Read + Seek + Send + 'static>(reader: R) -> Result<Self> {
        Self::from_reader_with(reader, &OpenOptions::default())
    }

    /// Open a package from a reader with explicit options
    pub fn from_reader_with<R: Read + Seek + Send + 'static>(
        reader: R,
        options: &OpenOptions,
    ) -> Result<Self> {
        let source: Box<dyn ArchiveSource> = Box::new(reader);
        let mut archive = ZipArchive::new(source)?;
        let mut package = Self::new();

        package.read_parts(&mut archive, options.policy())?;
        package.archive = Some(archive);

        debug!("Loaded {} members", package.parts.len());
        Ok(package)
    }

    /// Save the package to a file, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        debug!("Saved package to {}", path.as_ref().display());
        Ok(())
    }

    /// Save the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let cursor = Cursor::new(&mut buf);
        self.write_to(cursor)?;
        Ok(buf)
    }

    /// Write the package to a writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for part in &self.parts {
            trace!("Writing member {} ({} bytes)", part.name(), part.data().len());
            zip.start_file(part.name(), options)?;
            zip.write_all(part.data())?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Release the archive handle.
    ///
    /// Members stay available and the package can still be saved. Calling
    /// this more than once is harmless.
    pub fn close(&mut self) {
        if self.archive.take().is_some() {
            debug!("Closed package archive handle");
        }
    }

    /// Whether the archive handle has been released (or never existed)
    pub fn is_closed(&self) -> bool {
        self.archive.is_none()
    }

    /// Get a member's bytes
    pub fn get(&self, name: &str) -> Result<&[u8]> {
        self.part(name)
            .map(Part::data)
            .ok_or_else(|| Error::MemberNotFound(name.to_string()))
    }

    /// Get a member's content as UTF-8 text
    pub fn get_str(&self, name: &str) -> Result<&str> {
        let part = self
            .part(name)
            .ok_or_else(|| Error::MemberNotFound(name.to_string()))?;
        Ok(part.data_as_str()?)
    }

    /// Get a member
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.index.get(name).map(|&i| &self.parts[i])
    }

    /// Check whether a member exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Overwrite or insert a member
    pub fn set(&mut self, name: &str, data: Vec<u8>) {
        match self.index.get(name) {
            Some(&i) => self.parts[i].set_data(data),
            None => {
                let mut part = Part::new(name, Vec::new());
                part.set_data(data);
                self.insert_part(part);
            }
        }
    }

    /// Remove a member
    pub fn remove(&mut self, name: &str) -> Option<Part> {
        let i = self.index.remove(name)?;
        let part = self.parts.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(part)
    }

    /// Re-read a member from the archive the package was opened from,
    /// discarding any in-memory changes to it
    pub fn reload(&mut self, name: &str) -> Result<()> {
        let archive = self.archive.as_mut().ok_or(Error::Closed)?;

        let data = {
            let mut file = match archive.by_name(name) {
                Ok(file) => file,
                Err(ZipError::FileNotFound) => {
                    return Err(Error::MemberNotFound(name.to_string()))
                }
                Err(e) => return Err(e.into()),
            };
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            data
        };

        debug!("Reloaded member {} ({} bytes)", name, data.len());
        self.insert_part(Part::new(name, data));
        Ok(())
    }

    /// Get all member names, in archive order
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(Part::name)
    }

    /// Get all members, in archive order
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the package has no members
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    // === Private methods ===

    fn insert_part(&mut self, part: Part) {
        match self.index.get(part.name()) {
            Some(&i) => self.parts[i] = part,
            None => {
                self.index.insert(part.name().to_string(), self.parts.len());
                self.parts.push(part);
            }
        }
    }

    fn read_parts(&mut self, archive: &mut Archive, policy: ReadPolicy) -> Result<()> {
        for i in 0..archive.len() {
            let name = match archive.name_for_index(i) {
                Some(name) => name.to_string(),
                None => continue,
            };

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let data = match Self::read_member(archive, i) {
                Ok(data) => data,
                Err(e) if policy == ReadPolicy::Tolerant => {
                    warn!("Failed to read member {}: {}; storing empty content", name, e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

            trace!("Read member {} ({} bytes)", name, data.len());
            self.insert_part(Part::new(name, data));
        }

        Ok(())
    }

    fn read_member(archive: &mut Archive, i: usize) -> Result<Vec<u8>> {
        let mut file = archive.by_index(i)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("parts", &self.parts)
            .field("closed", &self.is_closed())
            .finish()
    }
}
