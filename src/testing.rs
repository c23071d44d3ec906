//! Catálogo falso para tests
//!
//! Permite controlar qué devuelve el catálogo, simular caídas y retener
//! un fetch en vuelo.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::clients::{CatalogClient, CatalogError, CatalogMake};

pub fn make(id: i64, name: &str) -> CatalogMake {
    CatalogMake {
        id,
        name: name.to_string(),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    makes: Mutex<Vec<CatalogMake>>,
    failing: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
    calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(makes: Vec<CatalogMake>) -> Self {
        Self {
            makes: Mutex::new(makes),
            ..Default::default()
        }
    }

    pub fn set_makes(&self, makes: Vec<CatalogMake>) {
        *self.makes.lock().unwrap() = makes;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// El próximo fetch espera hasta que se notifique el `Notify` devuelto
    pub fn hold_next_fetch(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn list_car_makes(&self) -> Result<Vec<CatalogMake>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Status(503));
        }
        Ok(self.makes.lock().unwrap().clone())
    }
}
