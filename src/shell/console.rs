use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

/// Where the shell's own output goes: notices on one stream, diagnostics on
/// the other.
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Console {
    pub fn stdio() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    /// A console writing into memory, plus handles to read it back as
    /// `(console, stdout, stderr)`.
    pub fn buffered() -> (Self, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let console = Self {
            out: Box::new(out.clone()),
            err: Box::new(err.clone()),
        };
        (console, out, err)
    }

    pub fn print(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    /// Reports a diagnostic. A failing stderr has nowhere left to report to.
    pub fn error(&mut self, err: &dyn Display) {
        let _ = writeln!(self.err, "shale: {}", err);
        let _ = self.err.flush();
    }
}

/// A cloneable in-memory sink.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
