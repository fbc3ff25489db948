use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use usvg::fontdb::Database;

/// Lazily loaded font database, shared by handle.
///
/// The first caller loads system fonts plus any extra directories; callers
/// racing that first load block on it and all receive the same database.
#[derive(Debug, Default)]
pub struct FontCache {
    extra_dirs: Vec<PathBuf>,
    skip_system: bool,
    db: OnceLock<Arc<Database>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// System fonts plus every font under `dirs`.
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            extra_dirs: dirs,
            ..Self::default()
        }
    }

    /// Only fonts under `dirs`; no system lookup.
    pub fn isolated(dirs: Vec<PathBuf>) -> Self {
        Self {
            extra_dirs: dirs,
            skip_system: true,
            db: OnceLock::new(),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn is_loaded(&self) -> bool {
        self.db.get().is_some()
    }

    pub fn database(&self) -> Arc<Database> {
        self.db.get_or_init(|| Arc::new(self.load())).clone()
    }

    fn load(&self) -> Database {
        let mut db = Database::new();
        if !self.skip_system {
            db.load_system_fonts();
        }
        for dir in &self.extra_dirs {
            db.load_fonts_dir(dir);
        }
        log::debug!("font cache loaded {} faces", db.len());
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn loads_once_and_shares_the_result() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FontCache::isolated(vec![dir.path().to_path_buf()]).shared();
        assert!(!cache.is_loaded());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.database())
            })
            .collect();
        let dbs: Vec<Arc<Database>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(cache.is_loaded());
        for db in &dbs {
            assert!(Arc::ptr_eq(db, &dbs[0]));
        }
        assert_eq!(dbs[0].len(), 0);
    }
}
