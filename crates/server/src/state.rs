use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::SqlitePool;
use workoutvibes_core::accounts::Accounts;
use workoutvibes_core::analysis::FoodAnalyzer;
use workoutvibes_core::charts::DietCharts;
use workoutvibes_core::config::AppConfig;
use workoutvibes_core::detector::Detector;
use workoutvibes_core::membership::Memberships;
use workoutvibes_core::shop::Shop;

pub struct AppState {
    pub accounts: Accounts,
    pub shop: Shop,
    pub memberships: Memberships,
    pub charts: DietCharts,
    pub analyzer: Arc<FoodAnalyzer>,
    pub config: AppConfig,
    rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Arc<Self> {
        let analyzer = FoodAnalyzer::new(
            Detector::new(&config.detector),
            config.detector.nutrition_variation,
        );
        Arc::new(Self {
            accounts: Accounts::new(pool.clone(), config.auth.pbkdf2_rounds),
            shop: Shop::new(pool.clone()),
            memberships: Memberships::new(pool.clone()),
            charts: DietCharts::new(pool),
            analyzer: Arc::new(analyzer),
            rng: Mutex::new(seeded_rng(config.detector.seed)),
            config,
        })
    }

    /// A fresh generator for one request, drawn from the shared one so a
    /// configured seed makes a sequence of requests reproducible.
    pub fn request_rng(&self) -> StdRng {
        let mut shared = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        StdRng::seed_from_u64(shared.random())
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
