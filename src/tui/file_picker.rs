//! File selection modal
//!
//! Terminals have no native file dialog, so uploads go through a small
//! directory browser. Only the chosen path is returned; files are never read.

use std::path::{Path, PathBuf};

/// Result of activating a picker row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// Moved into another directory, picker stays open
    Navigated,
    /// A file was chosen
    Selected(PathBuf),
    /// Row does not exist
    Ignored,
}

/// State of the open file picker
#[derive(Debug, Clone)]
pub struct FilePicker {
    dir: PathBuf,
    /// Directories first, then files
    entries: Vec<PathBuf>,
    selected: usize,
    scroll: usize,
}

impl FilePicker {
    /// Open the picker on `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut picker = Self {
            dir: dir.into(),
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
        };
        picker.load_entries();
        picker
    }

    /// Reload the entries of the current directory
    pub fn load_entries(&mut self) {
        self.entries.clear();

        let read = match std::fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", self.dir.display(), e);
                return;
            }
        };

        let (mut dirs, mut files): (Vec<PathBuf>, Vec<PathBuf>) = read
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| !is_hidden(p))
            .partition(|p| p.is_dir());

        dirs.sort_by_key(|p| sort_key(p));
        files.sort_by_key(|p| sort_key(p));

        self.entries = dirs;
        self.entries.append(&mut files);
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Rows shown, including the leading ".." row
    pub fn item_count(&self) -> usize {
        1 + self.entries.len()
    }

    /// Display text for a row
    pub fn label(&self, index: usize) -> Option<String> {
        if index == 0 {
            return Some("..".to_string());
        }
        let path = self.entries.get(index - 1)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if path.is_dir() {
            Some(format!("{name}/"))
        } else {
            Some(name)
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.item_count() {
            self.selected += 1;
        }
    }

    /// Keep the selected row inside a window of `visible_height` rows
    pub fn ensure_visible(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible_height {
            self.scroll = self.selected + 1 - visible_height;
        }
    }

    /// Activate the selected row
    pub fn confirm(&mut self) -> PickerAction {
        self.activate(self.selected)
    }

    /// Activate a row: ".." goes up, directories are entered, files are chosen
    pub fn activate(&mut self, index: usize) -> PickerAction {
        if index == 0 {
            if let Some(parent) = self.dir.parent() {
                let parent = parent.to_path_buf();
                self.navigate(parent);
            }
            return PickerAction::Navigated;
        }

        let Some(path) = self.entries.get(index - 1).cloned() else {
            return PickerAction::Ignored;
        };
        if path.is_dir() {
            self.navigate(path);
            PickerAction::Navigated
        } else {
            PickerAction::Selected(path)
        }
    }

    fn navigate(&mut self, dir: PathBuf) {
        tracing::debug!(dir = %dir.display(), "File picker navigated");
        self.dir = dir;
        self.selected = 0;
        self.scroll = 0;
        self.load_entries();
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(true)
}

fn sort_key(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("Zeta")).unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join("contract.pdf"), b"%PDF").unwrap();
        fs::write(tmp.path().join("Brief.docx"), b"").unwrap();
        fs::write(tmp.path().join(".env"), b"SECRET=1").unwrap();
        fs::write(tmp.path().join("alpha").join("nested.txt"), b"").unwrap();
        tmp
    }

    #[test]
    fn test_entries_sorted_dirs_first_hidden_skipped() {
        let tmp = fixture();
        let picker = FilePicker::open(tmp.path());

        let labels: Vec<String> = (0..picker.item_count())
            .filter_map(|i| picker.label(i))
            .collect();
        assert_eq!(labels, ["..", "alpha/", "Zeta/", "Brief.docx", "contract.pdf"]);
    }

    #[test]
    fn test_activate_file_selects_it() {
        let tmp = fixture();
        let mut picker = FilePicker::open(tmp.path());
        assert_eq!(
            picker.activate(4),
            PickerAction::Selected(tmp.path().join("contract.pdf"))
        );
        assert_eq!(picker.activate(99), PickerAction::Ignored);
    }

    #[test]
    fn test_navigate_into_and_out_of_dir() {
        let tmp = fixture();
        let mut picker = FilePicker::open(tmp.path());

        picker.select_next();
        assert_eq!(picker.confirm(), PickerAction::Navigated);
        assert_eq!(picker.dir(), tmp.path().join("alpha"));
        assert_eq!(picker.selected(), 0);
        assert_eq!(picker.label(1).as_deref(), Some("nested.txt"));

        assert_eq!(picker.activate(0), PickerAction::Navigated);
        assert_eq!(picker.dir(), tmp.path());
    }

    #[test]
    fn test_selection_bounds_and_scroll() {
        let tmp = fixture();
        let mut picker = FilePicker::open(tmp.path());

        picker.select_prev();
        assert_eq!(picker.selected(), 0);

        for _ in 0..10 {
            picker.select_next();
        }
        assert_eq!(picker.selected(), 4);

        picker.ensure_visible(2);
        assert_eq!(picker.scroll(), 3);

        for _ in 0..4 {
            picker.select_prev();
        }
        picker.ensure_visible(2);
        assert_eq!(picker.scroll(), 0);
    }

    #[test]
    fn test_unreadable_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let picker = FilePicker::open(tmp.path().join("missing"));
        assert!(picker.entries().is_empty());
        assert_eq!(picker.item_count(), 1);
    }
}
