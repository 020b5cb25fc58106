//! Best score persistence
//!
//! A single monotonic integer in LocalStorage. Load failures fall back to 0
//! and save failures are swallowed: the best score is a convenience, never a
//! correctness requirement.

/// Session best score with its storage hook
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gate_glider_best_score";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Fold in a finished run's score; true if the best improved
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load from LocalStorage (WASM only); any failure yields 0
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return Self::default();
        };

        if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(value) => {
                    log::info!("Loaded best score {value}");
                    return Self { value };
                }
                Err(err) => log::warn!("Stored best score unreadable: {err}"),
            }
        }

        Self::default()
    }

    /// Save to LocalStorage (WASM only); best effort
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage
                .set_item(Self::STORAGE_KEY, &self.value.to_string())
                .is_err()
            {
                log::warn!("Failed to save best score");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_monotonic() {
        let mut best = BestScore::default();
        assert!(best.record(3));
        assert!(!best.record(2));
        assert!(!best.record(3));
        assert!(best.record(5));
        assert_eq!(best.value, 5);
    }
}
