//! Copy feedback for rendered code blocks.
//!
//! The parser keeps no state between calls. Whoever presents the blocks owns
//! a [`CopyTracker`], which remembers which code blocks were copied recently
//! and when that indicator runs out.

use log::{debug, warn};
use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::block::Block;
use crate::config::CopyConfig;
use crate::error::{Error, Result};

/// Destination for copied code.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// A clipboard backed by any writer, e.g. stdout for the CLI.
#[derive(Debug)]
pub struct WriterClipboard<W: Write> {
    writer: W,
}

impl<W: Write> WriterClipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Clipboard for WriterClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// Outcome of a copy request, shown to the user as a transient notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyNotice {
    Copied { block: usize },
    Failed { block: usize, reason: String },
}

/// Caller-owned "copied" indicators, keyed by block index.
#[derive(Debug, Clone)]
pub struct CopyTracker {
    feedback: Duration,
    copied_until: HashMap<usize, Instant>,
}

impl Default for CopyTracker {
    fn default() -> Self {
        Self::from_config(&CopyConfig::default())
    }
}

impl CopyTracker {
    pub fn new(feedback: Duration) -> Self {
        Self {
            feedback,
            copied_until: HashMap::new(),
        }
    }

    pub fn from_config(config: &CopyConfig) -> Self {
        Self::new(config.feedback())
    }

    /// Copy the code of `blocks[index]` to the clipboard.
    ///
    /// On success the block shows as copied until `now + feedback`; copying
    /// again before that restarts the timer. On failure the indicator is left
    /// as it was.
    pub fn copy_block(
        &mut self,
        clipboard: &mut impl Clipboard,
        blocks: &[Block],
        index: usize,
        now: Instant,
    ) -> CopyNotice {
        let result = match blocks.get(index) {
            Some(Block::CodeBlock { content, .. }) => clipboard.write_text(content),
            _ => Err(Error::NotCodeBlock(index)),
        };

        match result {
            Ok(()) => {
                debug!("copied code block {}", index);
                self.copied_until.insert(index, now + self.feedback);
                CopyNotice::Copied { block: index }
            }
            Err(e) => {
                warn!("copy of block {} failed: {}", index, e);
                CopyNotice::Failed {
                    block: index,
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_copied(&self, index: usize, now: Instant) -> bool {
        self.copied_until
            .get(&index)
            .is_some_and(|until| now < *until)
    }

    /// Forget indicators that have run out.
    pub fn expire(&mut self, now: Instant) {
        self.copied_until.retain(|_, until| now < *until);
    }

    pub fn active(&self) -> usize {
        self.copied_until.len()
    }
}
