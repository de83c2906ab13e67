//! Process-wide cached dataset loading.

use crate::errors::Result;
use crate::input::{self, Dataset};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<Dataset>>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Dataset>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load the dataset at `path`, reading the file at most once per process.
///
/// Repeated calls with the same path return the dataset loaded the first
/// time, without touching the file again. Failed loads are not cached, so
/// a path that was missing can be retried.
pub fn load(path: &Path) -> Result<Arc<Dataset>> {
    let mut cache = cache().lock().expect("loader cache is never poisoned");
    if let Some(dataset) = cache.get(path) {
        debug!(target: "laureates", "already loaded: {}", path.display());
        return Ok(Arc::clone(dataset));
    }
    info!(target: "laureates", "read: {}", path.display());
    let dataset = Arc::new(input::read_dataset(path)?);
    cache.insert(path.to_owned(), Arc::clone(&dataset));
    Ok(dataset)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::DataUnavailable;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("laureates-{}-{name}", std::process::id()))
    }

    #[test]
    fn load_is_idempotent() {
        let path = scratch("idempotent.csv");
        fs::write(
            &path,
            "year,category,gender,bornCountryCode\n1903,Physics,female,PL\n",
        )
        .unwrap();
        let first = load(&path).unwrap();
        let second = load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.records, second.records);
        fs::remove_file(&path).unwrap();
        // still served from the cache after the file is gone
        let third = load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let path = scratch("late.csv");
        let e = load(&path).unwrap_err();
        assert!(e.downcast_ref::<DataUnavailable>().is_some());
        fs::write(
            &path,
            "year,category,gender,bornCountryCode\n1921,Physics,male,DE\n",
        )
        .unwrap();
        let dataset = load(&path).unwrap();
        assert_eq!(dataset.len(), 1);
        fs::remove_file(&path).unwrap();
    }
}
