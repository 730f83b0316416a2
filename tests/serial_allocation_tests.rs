//! Pruebas de integración del protocolo de asignación de seriales
//!
//! Ejercitan el allocator contra un almacén en memoria que se comporta como
//! la tabla de viajes: los seriales confirmados son visibles para las
//! lecturas y validaciones siguientes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use fleet_manager::services::serial_service::{
    AllocatedSerial, SerialAllocator, SerialStore, DEFAULT_MAX_ATTEMPTS,
};
use fleet_manager::utils::errors::AppError;
use fleet_manager::utils::validation::validate_trip_serial;

/// Tabla de viajes en memoria: serial → id del viaje dueño
#[derive(Clone, Default)]
struct InMemoryTrips {
    rows: Arc<Mutex<HashMap<String, Uuid>>>,
}

impl InMemoryTrips {
    fn new() -> Self {
        Self::default()
    }

    /// Confirmar un viaje; falla si el serial ya está tomado, como lo haría
    /// una restricción de unicidad en la base de datos.
    fn try_commit(&self, serial: &str, trip_id: Uuid) -> bool {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(serial) {
            return false;
        }
        rows.insert(serial.to_string(), trip_id);
        true
    }

    fn serials(&self) -> Vec<String> {
        self.rows.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl SerialStore for InMemoryTrips {
    async fn list_serials_with_prefix(
        &self,
        _company_id: Uuid,
        prefix: &str,
    ) -> Result<Vec<String>, AppError> {
        let mut matching: Vec<String> = self
            .rows
            .lock()
            .unwrap()
            .keys()
            .filter(|s| s.starts_with(prefix))
            .cloned()
            .collect();
        matching.sort();
        matching.reverse();
        Ok(matching)
    }

    async fn serial_exists(
        &self,
        _company_id: Uuid,
        serial: &str,
        exclude_trip_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let rows = self.rows.lock().unwrap();
        match rows.get(serial) {
            Some(owner) => Ok(exclude_trip_id != Some(*owner)),
            None => Ok(false),
        }
    }
}

fn allocator(store: InMemoryTrips) -> SerialAllocator<InMemoryTrips> {
    SerialAllocator::with_limits(store, DEFAULT_MAX_ATTEMPTS, Duration::from_millis(0))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn sequential_trips_get_increasing_serials() {
    let trips = InMemoryTrips::new();
    let alloc = allocator(trips.clone());
    let company = Uuid::new_v4();
    let start = date(2025, 9, 18);

    for expected in ["T25-1234-0001", "T25-1234-0002", "T25-1234-0003"] {
        let serial = alloc
            .allocate(company, "CG04AB1234", start, None)
            .await
            .unwrap();
        assert_eq!(serial.as_str(), expected);
        assert!(!serial.is_fallback());
        assert!(trips.try_commit(serial.as_str(), Uuid::new_v4()));
    }
}

#[tokio::test]
async fn each_vehicle_and_year_has_its_own_sequence() {
    let trips = InMemoryTrips::new();
    let alloc = allocator(trips.clone());
    let company = Uuid::new_v4();

    let first = alloc
        .allocate(company, "CG04AB1234", date(2025, 9, 18), None)
        .await
        .unwrap();
    trips.try_commit(first.as_str(), Uuid::new_v4());

    // Otro vehículo el mismo año empieza en 0001
    let other_vehicle = alloc
        .allocate(company, "MH12XY9999", date(2025, 9, 18), None)
        .await
        .unwrap();
    assert_eq!(other_vehicle.as_str(), "T25-9999-0001");
    trips.try_commit(other_vehicle.as_str(), Uuid::new_v4());

    // El mismo vehículo al año siguiente reinicia la secuencia
    let next_year = alloc
        .allocate(company, "CG04AB1234", date(2026, 1, 5), None)
        .await
        .unwrap();
    assert_eq!(next_year.as_str(), "T26-1234-0001");
}

#[tokio::test]
async fn commit_conflicts_resolve_with_reallocation() {
    // Varias sesiones crean viajes para el mismo vehículo y año. Si dos
    // proponen el mismo candidato, la restricción de unicidad rechaza al
    // segundo y la sesión vuelve a pasar por el allocator, que ya observa
    // el serial confirmado.
    let trips = InMemoryTrips::new();
    let company = Uuid::new_v4();
    let start = date(2025, 9, 18);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let trips = trips.clone();
        handles.push(tokio::spawn(async move {
            let alloc = allocator(trips.clone());
            loop {
                let serial = alloc
                    .allocate(company, "CG04AB1234", start, None)
                    .await
                    .unwrap();
                if trips.try_commit(serial.as_str(), Uuid::new_v4()) {
                    return serial;
                }
            }
        }));
    }

    let mut serials = Vec::new();
    for handle in handles {
        serials.push(handle.await.unwrap());
    }

    let committed = trips.serials();
    assert_eq!(committed.len(), 8, "todos los seriales deben ser únicos");
    for serial in &serials {
        assert!(validate_trip_serial(serial.as_str()).is_ok());
        assert!(serial.as_str().starts_with("T25-1234-"));
    }
}

#[tokio::test]
async fn validation_collision_is_never_committed_twice() {
    // El candidato aparece entre la lectura y la validación: el allocator
    // debe saltarlo, nunca devolverlo.
    struct LateCollisionStore {
        inner: InMemoryTrips,
        collide_once: Mutex<bool>,
    }

    #[async_trait]
    impl SerialStore for LateCollisionStore {
        async fn list_serials_with_prefix(
            &self,
            company_id: Uuid,
            prefix: &str,
        ) -> Result<Vec<String>, AppError> {
            self.inner.list_serials_with_prefix(company_id, prefix).await
        }

        async fn serial_exists(
            &self,
            company_id: Uuid,
            serial: &str,
            exclude_trip_id: Option<Uuid>,
        ) -> Result<bool, AppError> {
            {
                let mut collide = self.collide_once.lock().unwrap();
                if *collide {
                    *collide = false;
                    self.inner.try_commit(serial, Uuid::new_v4());
                    return Ok(true);
                }
            }
            self.inner.serial_exists(company_id, serial, exclude_trip_id).await
        }
    }

    let inner = InMemoryTrips::new();
    inner.try_commit("T25-1234-0001", Uuid::new_v4());

    let store = LateCollisionStore {
        inner: inner.clone(),
        collide_once: Mutex::new(true),
    };
    let alloc = SerialAllocator::with_limits(store, DEFAULT_MAX_ATTEMPTS, Duration::from_millis(0));

    let serial = alloc
        .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
        .await
        .unwrap();

    // 0002 fue tomado por la otra sesión durante la validación
    assert_ne!(serial.as_str(), "T25-1234-0002");
    assert_eq!(serial.as_str(), "T25-1234-0003");
    assert!(!serial.is_fallback());
}

#[tokio::test]
async fn editing_a_trip_revalidates_excluding_itself() {
    let trips = InMemoryTrips::new();
    let own_trip = Uuid::new_v4();
    trips.try_commit("T25-1234-0001", own_trip);

    // El serial del propio viaje no cuenta como colisión en una edición
    let taken = trips
        .serial_exists(Uuid::new_v4(), "T25-1234-0001", Some(own_trip))
        .await
        .unwrap();
    assert!(!taken);

    // Para cualquier otro viaje sí
    let taken = trips
        .serial_exists(Uuid::new_v4(), "T25-1234-0001", Some(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(taken);
}

#[tokio::test]
async fn exhausted_retries_degrade_to_tagged_fallback() {
    struct AlwaysTaken;

    #[async_trait]
    impl SerialStore for AlwaysTaken {
        async fn list_serials_with_prefix(
            &self,
            _company_id: Uuid,
            _prefix: &str,
        ) -> Result<Vec<String>, AppError> {
            Ok(Vec::new())
        }

        async fn serial_exists(
            &self,
            _company_id: Uuid,
            _serial: &str,
            _exclude_trip_id: Option<Uuid>,
        ) -> Result<bool, AppError> {
            Ok(true)
        }
    }

    let alloc = SerialAllocator::with_limits(AlwaysTaken, 3, Duration::from_millis(0));
    let serial = alloc
        .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
        .await
        .unwrap();

    assert!(serial.is_fallback());
    assert!(matches!(serial, AllocatedSerial::FallbackTimestamped(_)));
    // El fallback conserva el formato y el prefijo del serial
    assert!(validate_trip_serial(serial.as_str()).is_ok());
    assert!(serial.as_str().starts_with("T25-1234-"));
}
