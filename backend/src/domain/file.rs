//! Stored binary files such as avatars.
//!
//! Files are written once and never modified. The payload is kept verbatim so
//! a download returns exactly the uploaded bytes.

use std::fmt;

use uuid::Uuid;

/// Validation errors for file identifiers and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileValidationError {
    EmptyId,
    InvalidId,
    EmptyFilename,
}

impl fmt::Display for FileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "file id must not be empty"),
            Self::InvalidId => write!(f, "file id must be a valid UUID"),
            Self::EmptyFilename => write!(f, "filename must not be empty"),
        }
    }
}

impl std::error::Error for FileValidationError {}

/// Identifier of a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    /// Parse a file identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, FileValidationError> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(FileValidationError::EmptyId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| FileValidationError::InvalidId)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name used as the download filename hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filename(String);

impl Filename {
    /// Validate a filename. Path separators are stripped so only the final
    /// component survives.
    ///
    /// # Examples
    /// ```
    /// use concierge::domain::Filename;
    ///
    /// let name = Filename::new("C:\\Users\\ada\\me.png").expect("valid filename");
    /// assert_eq!(name.as_ref(), "me.png");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, FileValidationError> {
        let base = name
            .as_ref()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() {
            return Err(FileValidationError::EmptyFilename);
        }
        Ok(Self(base.to_owned()))
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Upload awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Client-supplied name, reduced to its final path component.
    pub filename: Filename,
    /// Raw payload.
    pub data: Vec<u8>,
}

/// A persisted file with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    id: FileId,
    filename: Filename,
    data: Vec<u8>,
}

impl StoredFile {
    /// Assemble a stored file from its parts.
    pub fn new(id: FileId, filename: Filename, data: Vec<u8>) -> Self {
        Self { id, filename, data }
    }

    /// Assign a fresh identifier to an upload.
    pub fn from_upload(upload: FileUpload) -> Self {
        Self::new(FileId::random(), upload.filename, upload.data)
    }

    pub fn id(&self) -> &FileId {
        &self.id
    }

    pub fn filename(&self) -> &Filename {
        &self.filename
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Split into filename and payload for streaming.
    pub fn into_parts(self) -> (Filename, Vec<u8>) {
        (self.filename, self.data)
    }
}
