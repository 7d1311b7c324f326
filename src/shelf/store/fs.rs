use super::{DataStore, StoredLine};
use crate::error::{Result, ShelfError};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DATA_FILE: &str = "library_data.txt";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).map_err(ShelfError::Io)
            }
            _ => Ok(()),
        }
    }
}

impl DataStore for FileStore {
    fn read_lines(&self) -> Result<Option<Vec<StoredLine>>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file yet");
                return Ok(None);
            }
            Err(e) => return Err(ShelfError::Io(e)),
        };

        let content = content.strip_suffix(b"\n").unwrap_or(&content);
        if content.is_empty() {
            return Ok(Some(Vec::new()));
        }
        Ok(Some(content.split(|b| *b == b'\n').map(StoredLine::decode).collect()))
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = fs::File::create(&self.path).map_err(ShelfError::Io)?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", line).map_err(ShelfError::Io)?;
        }
        writer.flush().map_err(ShelfError::Io)?;

        debug!(path = %self.path.display(), count = lines.len(), "Wrote data file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join(DEFAULT_DATA_FILE));
        assert!(store.read_lines().unwrap().is_none());
    }

    #[test]
    fn writes_one_line_per_entry_with_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_DATA_FILE);
        let mut store = FileStore::new(&path);

        store
            .write_lines(&["1|A|B|0|N/A".to_string(), "2|C|D|1|2024-01-01".to_string()])
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "1|A|B|0|N/A\n2|C|D|1|2024-01-01\n");
        assert_eq!(store.read_lines().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn rewrite_truncates_previous_content() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join(DEFAULT_DATA_FILE));

        store
            .write_lines(&["1|A|B|0|N/A".to_string(), "2|C|D|0|N/A".to_string()])
            .unwrap();
        store.write_lines(&["3|E|F|0|N/A".to_string()]).unwrap();

        assert_eq!(
            store.read_lines().unwrap().unwrap(),
            vec![StoredLine::Text("3|E|F|0|N/A".to_string())]
        );
    }

    #[test]
    fn bad_utf8_only_spoils_its_own_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_DATA_FILE);
        fs::write(&path, b"1|Dune|Frank Herbert|0|N/A\n2|Bad\xff\xfe|X|0|N/A\r\n").unwrap();

        let lines = FileStore::new(&path).read_lines().unwrap().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], StoredLine::Text("1|Dune|Frank Herbert|0|N/A".to_string()));
        assert!(matches!(&lines[1], StoredLine::Undecodable(text) if text.ends_with("|X|0|N/A")));
    }

    #[test]
    fn crlf_and_missing_final_newline_are_tolerated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_DATA_FILE);
        fs::write(&path, "1|A|B|0|N/A\r\n2|C|D|0|N/A").unwrap();

        let lines = FileStore::new(&path).read_lines().unwrap().unwrap();
        assert_eq!(
            lines,
            vec![
                StoredLine::Text("1|A|B|0|N/A".to_string()),
                StoredLine::Text("2|C|D|0|N/A".to_string()),
            ]
        );
    }

    #[test]
    fn empty_file_is_found_but_holds_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_DATA_FILE);
        fs::write(&path, "").unwrap();
        assert_eq!(FileStore::new(&path).read_lines().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn unreadable_data_path_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert!(matches!(store.read_lines(), Err(ShelfError::Io(_))));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("books.txt");
        let mut store = FileStore::new(&path);

        store.write_lines(&["1|A|B|0|N/A".to_string()]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(blocker.join("books.txt"));
        let err = store.write_lines(&[]).unwrap_err();
        assert!(matches!(err, ShelfError::Io(_)));
    }
}
