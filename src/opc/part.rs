//! Member representation for document packages

/// A single archive member
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    /// Member name inside the archive (e.g., "word/document.xml")
    name: String,
    /// Member data
    data: Vec<u8>,
    /// Whether this member has been overwritten since it was loaded
    modified: bool,
}

impl Part {
    /// Create a new part
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            modified: false,
        }
    }

    /// Get the member name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get data as UTF-8 string
    pub fn data_as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    /// Set the data
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
        self.modified = true;
    }

    /// Check if the part has been modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
