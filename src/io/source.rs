//! Waveform Sources
//!
//! `TextWaveformSource` reads exported scope traces: one sample per line,
//! `time amplitude` separated by whitespace or a comma. A single column is
//! read as amplitude with the line index as time. Blank lines and `#`
//! comments are skipped, as is a non-numeric header before the first
//! sample.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::signal::WaveformSample;

/// Anything that can produce a waveform for a file identifier
///
/// `sparse = Some(k)` asks for at most k samples spread over the record.
pub trait WaveformSource: Sync {
    fn load(&self, path: &Path, sparse: Option<usize>) -> Result<WaveformSample, LoadError>;
}

/// Plain-text two-column traces
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWaveformSource;

impl TextWaveformSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse trace text; `path` only labels errors
    pub fn parse(&self, path: &Path, text: &str) -> Result<WaveformSample, LoadError> {
        let mut time = Vec::new();
        let mut amplitude = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|f| !f.is_empty())
                .collect();
            let parsed: Result<Vec<f64>, _> = fields.iter().map(|f| f.parse::<f64>()).collect();

            let values = match parsed {
                Ok(values) => values,
                Err(_) if amplitude.is_empty() => continue,
                Err(e) => {
                    return Err(LoadError::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: e.to_string(),
                    })
                }
            };

            match values.as_slice() {
                [a] => {
                    time.push(amplitude.len() as f64);
                    amplitude.push(*a);
                }
                [t, a] => {
                    time.push(*t);
                    amplitude.push(*a);
                }
                _ => {
                    return Err(LoadError::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: format!("expected 1 or 2 columns, found {}", values.len()),
                    })
                }
            }
        }

        if amplitude.is_empty() {
            return Err(LoadError::Empty);
        }
        WaveformSample::new(time, amplitude)
    }
}

impl WaveformSource for TextWaveformSource {
    fn load(&self, path: &Path, sparse: Option<usize>) -> Result<WaveformSample, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sample = self.parse(path, &text)?;
        Ok(match sparse {
            Some(k) => sample.sparse(k),
            None => sample,
        })
    }
}

/// Files directly under `root` with the given extension, sorted by name
pub fn find_waveform_files(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_parse_two_columns() {
        let text = "# LeCroy export\ntime,amplitude\n0.0, 1.5\n0.1,2.5\n\n0.2 3.5\n";
        let sample = TextWaveformSource::new()
            .parse(Path::new("trace.txt"), text)
            .unwrap();
        assert_eq!(sample.time(), &[0.0, 0.1, 0.2]);
        assert_eq!(sample.amplitude(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_parse_single_column() {
        let sample = TextWaveformSource::new()
            .parse(Path::new("trace.txt"), "4\n5\n6\n")
            .unwrap();
        assert_eq!(sample.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(sample.amplitude(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_parse_errors() {
        let source = TextWaveformSource::new();

        let err = source
            .parse(Path::new("bad.txt"), "0 1\n1 oops\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));

        let err = source.parse(Path::new("wide.txt"), "0 1 2\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));

        let err = source.parse(Path::new("empty.txt"), "# nothing\n").unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_load_with_sparse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot_001.txt");
        let mut file = File::create(&path).unwrap();
        for i in 0..11 {
            writeln!(file, "{} {}", i as f64 * 0.1, i * 10).unwrap();
        }

        let source = TextWaveformSource::new();
        let full = source.load(&path, None).unwrap();
        assert_eq!(full.len(), 11);

        let sparse = source.load(&path, Some(3)).unwrap();
        assert_eq!(sparse.amplitude(), &[0.0, 50.0, 100.0]);

        let missing = source.load(&dir.path().join("missing.txt"), None);
        assert!(matches!(missing, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_find_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.TXT", "notes.md", "c.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let files = find_waveform_files(dir.path(), "txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.txt", "c.txt"]);
    }
}
