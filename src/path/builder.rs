use thiserror::Error;

pub const SEPARATOR: char = '/';

/// Longest path a directory change may assemble, in bytes.
pub const PATH_MAX: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path too long: exceeds {limit} bytes")]
    TooLong { limit: usize },
}

/// Bounded buffer for a path under construction.
///
/// Appends that would push the contents past `limit` bytes fail and leave
/// the buffer as it was.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    buf: String,
    limit: usize,
}

impl PathBuilder {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: String::new(),
            limit,
        }
    }

    /// Starts a fresh path at `anchor`.
    pub fn anchored(anchor: &str, limit: usize) -> Result<Self, PathError> {
        let mut builder = Self::new(limit);
        builder.push_str(anchor)?;
        Ok(builder)
    }

    /// Appends `segment`, joined with a single separator. No normalization of
    /// `.` or `..` takes place.
    pub fn push_segment(&mut self, segment: &str) -> Result<(), PathError> {
        let needs_separator = !self.buf.ends_with(SEPARATOR);
        let extra = segment.len() + usize::from(needs_separator);
        self.reserve(extra)?;

        if needs_separator {
            self.buf.push(SEPARATOR);
        }
        self.buf.push_str(segment);
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn push_str(&mut self, s: &str) -> Result<(), PathError> {
        self.reserve(s.len())?;
        self.buf.push_str(s);
        Ok(())
    }

    fn reserve(&self, extra: usize) -> Result<(), PathError> {
        if self.buf.len() + extra > self.limit {
            return Err(PathError::TooLong { limit: self.limit });
        }
        Ok(())
    }
}
