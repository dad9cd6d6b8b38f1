use crate::error::{AppError, Result};
use crate::fs::listing::{self, DirectoryEntry, DirectoryListing};
use crate::fs::path;
use crate::fs::volume::Volume;

/// Number of listing rows visible at once.
pub const VISIBLE_WINDOW: usize = 20;

/// Browser state for one directory: its listing, selection and scroll window.
///
/// Every state change goes through a successful listing first; a failed
/// navigation leaves all four fields as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_path: String,
    listing: DirectoryListing,
    selected_index: usize,
    scroll_offset: usize,
}

impl NavigationState {
    /// Open `dir` on `volume` with the selection at the top.
    pub fn open(volume: &Volume, dir: &str) -> Result<Self> {
        let current_path = volume.normalize(dir)?;
        let listing = listing::list(volume, &current_path)?;
        Ok(Self {
            current_path,
            listing,
            selected_index: 0,
            scroll_offset: 0,
        })
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn listing(&self) -> &DirectoryListing {
        &self.listing
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The entry under the cursor, if the listing is not empty.
    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.listing.get(self.selected_index)
    }

    /// Virtual path of the entry under the cursor.
    pub fn selected_path(&self) -> Result<Option<String>> {
        self.selected_entry()
            .map(|entry| path::join(&self.current_path, &entry.name))
            .transpose()
    }

    /// Entries inside the scroll window, with their absolute indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &DirectoryEntry)> {
        self.listing
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(VISIBLE_WINDOW)
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        let len = self.listing.len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
        self.update_scroll();
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
        self.update_scroll();
    }

    /// Descend into the selected directory.
    pub fn enter_directory(&mut self, volume: &Volume) -> Result<()> {
        let entry = self
            .selected_entry()
            .ok_or_else(|| AppError::NotADirectory(self.current_path.clone()))?;
        let target = path::join(&self.current_path, &entry.name)?;
        if !entry.is_dir {
            return Err(AppError::NotADirectory(target));
        }

        let listing = listing::list(volume, &target)?;
        tracing::debug!(from = %self.current_path, to = %target, "entered directory");
        self.install(target, listing);
        Ok(())
    }

    /// Go up to the parent directory.
    pub fn go_back(&mut self, volume: &Volume) -> Result<()> {
        let parent = path::parent(&self.current_path)?;
        let listing = listing::list(volume, &parent)?;
        tracing::debug!(from = %self.current_path, to = %parent, "went back");
        self.install(parent, listing);
        Ok(())
    }

    /// Re-list the current directory, keeping the selection where possible.
    pub fn reload(&mut self, volume: &Volume) -> Result<()> {
        let listing = listing::list(volume, &self.current_path)?;
        self.listing = listing;

        let len = self.listing.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
        self.scroll_offset = self.scroll_offset.min(self.selected_index);
        self.update_scroll();
        Ok(())
    }

    fn install(&mut self, path: String, listing: DirectoryListing) {
        self.current_path = path;
        self.listing = listing;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Keep the selected row inside the visible window.
    fn update_scroll(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + VISIBLE_WINDOW {
            self.scroll_offset = self.selected_index - VISIBLE_WINDOW + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::volume::DEFAULT_DEVICE_PREFIX;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: usize) -> (TempDir, Volume, NavigationState) {
        let tmp = TempDir::new().unwrap();
        for i in 0..files {
            fs::write(tmp.path().join(format!("file_{:02}.txt", i)), "x").unwrap();
        }
        let vol = Volume::mount(tmp.path(), DEFAULT_DEVICE_PREFIX).unwrap();
        let nav = NavigationState::open(&vol, "/").unwrap();
        (tmp, vol, nav)
    }

    fn assert_invariants(nav: &NavigationState) {
        let len = nav.listing().len();
        if len == 0 {
            assert_eq!(nav.selected_index(), 0);
        } else {
            assert!(nav.selected_index() < len);
        }
        assert!(nav.scroll_offset() <= nav.selected_index());
        assert!(nav.selected_index() < nav.scroll_offset() + VISIBLE_WINDOW);
    }

    fn index_of(nav: &NavigationState, name: &str) -> usize {
        nav.listing().iter().position(|e| e.name == name).unwrap()
    }

    #[test]
    fn select_next_moves_down() {
        let (_tmp, _vol, mut nav) = setup(3);
        nav.select_next();
        assert_eq!(nav.selected_index(), 1);
    }

    #[test]
    fn select_next_clamps_at_end() {
        let (_tmp, _vol, mut nav) = setup(3);
        for _ in 0..10 {
            nav.select_next();
        }
        assert_eq!(nav.selected_index(), 2);
    }

    #[test]
    fn select_prev_clamps_at_start() {
        let (_tmp, _vol, mut nav) = setup(3);
        nav.select_prev();
        nav.select_prev();
        assert_eq!(nav.selected_index(), 0);
        assert_eq!(nav.scroll_offset(), 0);
    }

    #[test]
    fn selection_on_empty_listing_stays_at_zero() {
        let (_tmp, _vol, mut nav) = setup(0);
        nav.select_next();
        nav.select_prev();
        assert_eq!(nav.selected_index(), 0);
        assert!(nav.selected_entry().is_none());
        assert_eq!(nav.selected_path().unwrap(), None);
    }

    #[test]
    fn scroll_follows_selection_down_and_up() {
        let (_tmp, _vol, mut nav) = setup(45);
        for _ in 0..VISIBLE_WINDOW {
            nav.select_next();
            assert_invariants(&nav);
        }
        assert_eq!(nav.selected_index(), 20);
        assert_eq!(nav.scroll_offset(), 1);

        for _ in 0..30 {
            nav.select_next();
            assert_invariants(&nav);
        }
        assert_eq!(nav.selected_index(), 44);
        assert_eq!(nav.scroll_offset(), 25);

        for _ in 0..25 {
            nav.select_prev();
            assert_invariants(&nav);
        }
        assert_eq!(nav.selected_index(), 19);
        assert_eq!(nav.scroll_offset(), 19);
    }

    #[test]
    fn invariants_hold_under_mixed_sequences() {
        let (_tmp, _vol, mut nav) = setup(27);
        let pattern = [1, 1, 1, -1, 1, 1, 1, 1, -1, -1];
        for step in 0..200 {
            if pattern[step % pattern.len()] > 0 {
                nav.select_next();
            } else {
                nav.select_prev();
            }
            assert_invariants(&nav);
        }
    }

    #[test]
    fn visible_window_is_twenty_rows() {
        let (_tmp, _vol, mut nav) = setup(30);
        for _ in 0..25 {
            nav.select_next();
        }
        let rows: Vec<usize> = nav.visible().map(|(i, _)| i).collect();
        assert_eq!(rows.len(), VISIBLE_WINDOW);
        assert_eq!(rows[0], nav.scroll_offset());
        assert!(rows.contains(&nav.selected_index()));
    }

    #[test]
    fn enter_directory_resets_selection() {
        let (tmp, vol, _) = setup(25);
        fs::create_dir(tmp.path().join("zz_dir")).unwrap();
        fs::write(tmp.path().join("zz_dir").join("inner.txt"), "i").unwrap();
        let mut nav = NavigationState::open(&vol, "/").unwrap();
        for _ in 0..index_of(&nav, "zz_dir") {
            nav.select_next();
        }

        nav.enter_directory(&vol).unwrap();
        assert_eq!(nav.current_path(), "/zz_dir");
        assert_eq!(nav.listing().len(), 1);
        assert_eq!(nav.selected_index(), 0);
        assert_eq!(nav.scroll_offset(), 0);
    }

    #[test]
    fn enter_directory_on_file_changes_nothing() {
        let (_tmp, vol, mut nav) = setup(3);
        nav.select_next();
        let before = nav.clone();
        assert!(matches!(
            nav.enter_directory(&vol),
            Err(AppError::NotADirectory(_))
        ));
        assert_eq!(nav, before);
    }

    #[test]
    fn enter_vanished_directory_changes_nothing() {
        let (tmp, vol, _) = setup(0);
        fs::create_dir(tmp.path().join("gone")).unwrap();
        let mut nav = NavigationState::open(&vol, "/").unwrap();
        fs::remove_dir(tmp.path().join("gone")).unwrap();
        let before = nav.clone();

        assert!(matches!(nav.enter_directory(&vol), Err(AppError::NotFound(_))));
        assert_eq!(nav, before);
    }

    #[test]
    fn go_back_returns_to_parent() {
        let (tmp, vol, _) = setup(2);
        fs::create_dir_all(tmp.path().join("a").join("b")).unwrap();
        let mut nav = NavigationState::open(&vol, "sdmc:/a/b").unwrap();
        assert_eq!(nav.current_path(), "/a/b");

        nav.go_back(&vol).unwrap();
        assert_eq!(nav.current_path(), "/a");
        nav.go_back(&vol).unwrap();
        assert_eq!(nav.current_path(), "/");
        assert_eq!(nav.listing().len(), 3);
        assert_eq!(nav.selected_index(), 0);
    }

    #[test]
    fn go_back_at_root_changes_nothing() {
        let (_tmp, vol, mut nav) = setup(5);
        nav.select_next();
        nav.select_next();
        let before = nav.clone();

        assert!(matches!(nav.go_back(&vol), Err(AppError::AtRoot)));
        assert_eq!(nav, before);
    }

    #[test]
    fn reload_picks_up_new_entries() {
        let (tmp, vol, mut nav) = setup(2);
        fs::write(tmp.path().join("new.txt"), "n").unwrap();
        nav.reload(&vol).unwrap();
        assert_eq!(nav.listing().len(), 3);
    }

    #[test]
    fn reload_clamps_selection_after_shrink() {
        let (tmp, vol, mut nav) = setup(30);
        for _ in 0..29 {
            nav.select_next();
        }
        for i in 0..25 {
            fs::remove_file(tmp.path().join(format!("file_{:02}.txt", i))).unwrap();
        }

        nav.reload(&vol).unwrap();
        assert_eq!(nav.listing().len(), 5);
        assert_eq!(nav.selected_index(), 4);
        assert_invariants(&nav);
    }

    #[test]
    fn reload_of_emptied_directory_resets_to_zero() {
        let (tmp, vol, mut nav) = setup(3);
        nav.select_next();
        for i in 0..3 {
            fs::remove_file(tmp.path().join(format!("file_{:02}.txt", i))).unwrap();
        }
        nav.reload(&vol).unwrap();
        assert_eq!(nav.selected_index(), 0);
        assert_eq!(nav.scroll_offset(), 0);
    }

    #[test]
    fn selected_path_joins_current_directory() {
        let (tmp, vol, _) = setup(0);
        fs::create_dir(tmp.path().join("dir")).unwrap();
        fs::write(tmp.path().join("dir").join("only.txt"), "o").unwrap();
        let nav = NavigationState::open(&vol, "/dir").unwrap();
        assert_eq!(nav.selected_path().unwrap().as_deref(), Some("/dir/only.txt"));
    }
}
