//! Shared and ambient context handed to units
//!
//! `SharedData` memoizes the one dataset all units may consume: loaded
//! at most once per process, handed out as the same `Arc` afterwards.
//! `AmbientCanvas` replaces the legacy process-global "last drawn
//! figure" state with a recorder scoped to a single load or producer
//! call.

use std::sync::{Arc, Mutex, PoisonError};

use vizdeck_core::{Dataset, UnitError, UnitOutput};

/// Scoped recorder for figures drawn without being returned.
///
/// One canvas exists per unit load and one per producer invocation;
/// the contract resolver reads it as the last-resort fallback.
#[derive(Debug, Default)]
pub struct AmbientCanvas {
    current: Option<UnitOutput>,
}

impl AmbientCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a figure as the current ambient state, replacing any
    /// previous one.
    pub fn record(&mut self, output: UnitOutput) {
        self.current = Some(output);
    }

    pub fn take(&mut self) -> Option<UnitOutput> {
        self.current.take()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// External collaborator that produces the shared dataset.
pub trait DataSource: Send + Sync {
    fn load(&self) -> Result<Dataset, UnitError>;
}

impl<F> DataSource for F
where
    F: Fn() -> Result<Dataset, UnitError> + Send + Sync,
{
    fn load(&self) -> Result<Dataset, UnitError> {
        self()
    }
}

/// At-most-once memoized shared dataset.
///
/// The underlying source runs under the cell lock, so concurrent first
/// requests cannot trigger duplicate loads. A failed load is not cached
/// and is retried on the next request.
pub struct SharedData {
    source: Box<dyn DataSource>,
    cell: Mutex<Option<Arc<Dataset>>>,
}

impl SharedData {
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cell: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Result<Arc<Dataset>, UnitError> {
        let mut cell = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(data) = cell.as_ref() {
            return Ok(Arc::clone(data));
        }
        let data = Arc::new(self.source.load()?);
        *cell = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Whether the dataset has been loaded already.
    pub fn is_loaded(&self) -> bool {
        self.cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vizdeck_core::{CellValue, InteractiveSpec};

    fn tiny_dataset() -> Dataset {
        Dataset::from_columns(vec![("x".into(), vec![CellValue::Number(1.0)])]).unwrap()
    }

    #[test]
    fn test_canvas_records_and_takes() {
        let mut canvas = AmbientCanvas::new();
        assert!(canvas.is_empty());
        canvas.record(UnitOutput::Interactive(InteractiveSpec::new()));
        assert!(!canvas.is_empty());
        assert!(canvas.take().is_some());
        assert!(canvas.take().is_none());
    }

    #[test]
    fn test_shared_data_loads_at_most_once() {
        static LOADS: AtomicUsize = AtomicUsize::new(0);
        let shared = SharedData::new(|| {
            LOADS.fetch_add(1, Ordering::SeqCst);
            Ok::<Dataset, UnitError>(tiny_dataset())
        });

        let a = shared.get().unwrap();
        let b = shared.get().unwrap();
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_shared_data_failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let shared = SharedData::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(UnitError::DataUnavailable("file missing".into()))
            } else {
                Ok(tiny_dataset())
            }
        });

        assert!(shared.get().is_err());
        assert!(!shared.is_loaded());
        assert!(shared.get().is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shared_data_single_flight_under_threads() {
        static LOADS: AtomicUsize = AtomicUsize::new(0);
        let shared = Arc::new(SharedData::new(|| {
            LOADS.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(10));
            Ok::<Dataset, UnitError>(tiny_dataset())
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || shared.get().map(|_| ()))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    }
}
