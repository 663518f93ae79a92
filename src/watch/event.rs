// src/watch/event.rs

//! Adapter from `notify` events to [`ChangeEvent`]s.
//!
//! Everything backend-specific about event shapes stays in this file; the
//! dispatcher only ever sees the fixed `ChangeKind` set.

use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};

use crate::types::{ChangeEvent, ChangeKind};

/// Translate one `notify` event into zero or more change events.
///
/// - access notifications are dropped;
/// - for renames only the destination path is reported, as `Moved`;
/// - directory-ness comes from the event kind when the backend knows it,
///   otherwise from the filesystem.
pub fn adapt(event: &Event) -> Vec<ChangeEvent> {
    match event.kind {
        EventKind::Create(kind) => event
            .paths
            .iter()
            .map(|p| change(ChangeKind::Created, p, create_is_dir(kind, p)))
            .collect(),

        EventKind::Remove(kind) => event
            .paths
            .iter()
            .map(|p| change(ChangeKind::Deleted, p, kind == RemoveKind::Folder))
            .collect(),

        EventKind::Modify(ModifyKind::Name(mode)) => adapt_rename(mode, event),

        EventKind::Modify(_) | EventKind::Any => event
            .paths
            .iter()
            .map(|p| change(ChangeKind::Modified, p, p.is_dir()))
            .collect(),

        EventKind::Access(_) | EventKind::Other => Vec::new(),
    }
}

fn adapt_rename(mode: RenameMode, event: &Event) -> Vec<ChangeEvent> {
    match mode {
        RenameMode::To => event
            .paths
            .iter()
            .map(|p| change(ChangeKind::Moved, p, p.is_dir()))
            .collect(),
        // inotify pairs every `Both` with a separate `To` for the new path.
        RenameMode::Both | RenameMode::From => Vec::new(),
        // FSEvents reports both halves as `Any`; only the half that still
        // exists is the destination.
        RenameMode::Any | RenameMode::Other => event
            .paths
            .iter()
            .filter(|p| p.exists())
            .map(|p| change(ChangeKind::Moved, p, p.is_dir()))
            .collect(),
    }
}

fn create_is_dir(kind: CreateKind, path: &Path) -> bool {
    match kind {
        CreateKind::Folder => true,
        CreateKind::File => false,
        CreateKind::Any | CreateKind::Other => path.is_dir(),
    }
}

fn change(kind: ChangeKind, path: &Path, is_directory: bool) -> ChangeEvent {
    ChangeEvent {
        kind,
        path: path.to_path_buf(),
        is_directory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, DataChange};
    use std::path::PathBuf;

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut ev = Event::new(kind);
        for p in paths {
            ev = ev.add_path(PathBuf::from(p));
        }
        ev
    }

    #[test]
    fn create_file() {
        let out = adapt(&event(EventKind::Create(CreateKind::File), &["/srv/app/a.py"]));
        assert_eq!(out, vec![ChangeEvent::new(ChangeKind::Created, "/srv/app/a.py")]);
    }

    #[test]
    fn create_folder_is_directory() {
        let out = adapt(&event(EventKind::Create(CreateKind::Folder), &["/srv/app/pkg"]));
        assert_eq!(out, vec![ChangeEvent::directory(ChangeKind::Created, "/srv/app/pkg")]);
    }

    #[test]
    fn data_change_is_modified() {
        let out = adapt(&event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/srv/app/a.py"],
        ));
        assert_eq!(out[0].kind, ChangeKind::Modified);
    }

    #[test]
    fn remove_is_deleted() {
        let out = adapt(&event(EventKind::Remove(RemoveKind::File), &["/srv/app/a.py"]));
        assert_eq!(out, vec![ChangeEvent::new(ChangeKind::Deleted, "/srv/app/a.py")]);
    }

    #[test]
    fn rename_reports_only_new_path() {
        let from = adapt(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            &["/srv/app/old.py"],
        ));
        let both = adapt(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/srv/app/old.py", "/srv/app/new.py"],
        ));
        let to = adapt(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            &["/srv/app/new.py"],
        ));

        assert!(from.is_empty());
        assert!(both.is_empty());
        assert_eq!(to, vec![ChangeEvent::new(ChangeKind::Moved, "/srv/app/new.py")]);
    }

    #[test]
    fn rename_any_keeps_the_half_that_exists() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.py");
        let new = dir.path().join("new.py");
        std::fs::write(&new, "print()\n").unwrap();

        let ev = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Any)))
            .add_path(old)
            .add_path(new.clone());

        assert_eq!(adapt(&ev), vec![ChangeEvent::new(ChangeKind::Moved, new)]);
    }

    #[test]
    fn access_is_dropped() {
        let out = adapt(&event(EventKind::Access(AccessKind::Read), &["/srv/app/a.py"]));
        assert!(out.is_empty());
    }
}
