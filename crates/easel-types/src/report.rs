//! Run outputs: the in-process snapshot and its transport shape.

use crate::{Canvas, Color, SandboxError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The artifact produced by one successful run.
///
/// A snapshot is a copy: later runs on the same session never change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Snapshot {
    pub title: String,
    pub content: String,
    pub canvas: Canvas,
}

impl Snapshot {
    pub fn new(title: String, content: String, canvas: Canvas) -> Self {
        Self {
            title,
            content,
            canvas,
        }
    }

    /// The color at `(x, y)`. Panics when out of range, see [`Canvas::pixel`].
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.canvas.pixel(x, y)
    }

    /// Hex SHA-256 over title, content, dimensions and pixels.
    ///
    /// Two snapshots have the same digest exactly when they are equal.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for text in [&self.title, &self.content] {
            hasher.update((text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        hasher.update((self.canvas.width() as u64).to_le_bytes());
        hasher.update((self.canvas.height() as u64).to_le_bytes());
        for color in self.canvas.pixels() {
            hasher.update(color.packed().to_le_bytes());
        }
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }
}

/// Flat, serializable form of a run outcome for embedding layers.
///
/// On failure only `err` is present; on success every other field is
/// present and `err` is absent. `image` is column-major like [`Canvas`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunReport {
    Failure {
        err: String,
    },
    Success {
        title: String,
        content: String,
        image: Vec<u32>,
        image_width: usize,
        image_height: usize,
    },
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error message, if this report is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { err } => Some(err),
            Self::Success { .. } => None,
        }
    }

    /// Packed color at `(x, y)`; `None` for failures or out-of-range cells.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        match self {
            Self::Success {
                image,
                image_width,
                image_height,
                ..
            } if x < *image_width && y < *image_height => image.get(x * image_height + y).copied(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Snapshot> for RunReport {
    fn from(snapshot: &Snapshot) -> Self {
        Self::Success {
            title: snapshot.title.clone(),
            content: snapshot.content.clone(),
            image: snapshot.canvas.pixels().iter().map(|c| c.packed()).collect(),
            image_width: snapshot.canvas.width(),
            image_height: snapshot.canvas.height(),
        }
    }
}

impl From<&SandboxError> for RunReport {
    fn from(err: &SandboxError) -> Self {
        Self::Failure {
            err: err.to_string(),
        }
    }
}

impl From<&std::result::Result<Snapshot, SandboxError>> for RunReport {
    fn from(result: &std::result::Result<Snapshot, SandboxError>) -> Self {
        match result {
            Ok(snapshot) => snapshot.into(),
            Err(err) => err.into(),
        }
    }
}
