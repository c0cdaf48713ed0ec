use crate::config::NaiveConfig;
use crate::error::Result;
use crate::types::Snippet;

/// Grammar-independent chunking into fixed, overlapping line windows
#[derive(Debug, Clone, Copy)]
pub struct NaiveChunker {
    window: usize,
    step: usize,
}

impl NaiveChunker {
    /// Fails when `overlap >= window`, since the windows would never advance.
    pub fn new(config: NaiveConfig) -> Result<Self> {
        let step = config.step()?;
        Ok(Self {
            window: config.window,
            step,
        })
    }

    /// Windows `[i * step, i * step + window)` over the `\n`-separated lines
    /// of `source`, clamped to the line count.
    #[must_use]
    pub fn chunk(&self, source: &str, file_path: &str) -> Vec<Snippet> {
        let lines: Vec<&str> = source.split('\n').collect();
        let total = lines.len();

        (0..total)
            .step_by(self.step)
            .map(|start| {
                let end = (start + self.window).min(total);
                Snippet::new(
                    lines[start..end].join("\n"),
                    start,
                    end,
                    file_path.to_string(),
                )
            })
            .collect()
    }
}

/// One-shot naive chunking; rejects `overlap >= window` before producing
/// anything.
pub fn naive_chunk(
    source: &str,
    file_path: &str,
    window: usize,
    overlap: usize,
) -> Result<Vec<Snippet>> {
    let chunker = NaiveChunker::new(NaiveConfig { window, overlap })?;
    Ok(chunker.chunk(source, file_path))
}
