//! Asignación de seriales de viaje
//!
//! Este módulo implementa el protocolo de asignación de seriales únicos
//! `T{YY}-{VVVV}-{SSSS}`:
//!
//! - `YY`: año de inicio del viaje en dos dígitos.
//! - `VVVV`: últimos cuatro dígitos numéricos de la matrícula del vehículo.
//! - `SSSS`: secuencia de cuatro dígitos, única por empresa dentro del
//!   prefijo vehículo+año.
//!
//! El diseño es de concurrencia optimista: se lee el máximo observado, se
//! propone un candidato y se re-valida contra el almacén justo antes de
//! confirmar. Dos sesiones que crean viajes para el mismo vehículo/año casi
//! al mismo tiempo pueden observar el mismo máximo; el validador detecta la
//! colisión y el orquestador reintenta con un número mayor, hasta un límite
//! acotado. Si todos los intentos colisionan, se genera un serial con sufijo
//! derivado de timestamp para garantizar progreso, marcado como fallback.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Intentos máximos antes de recurrir al serial de fallback
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Pausa entre intentos para reducir la probabilidad de contención
pub const DEFAULT_RETRY_DELAY_MS: u64 = 100;

/// Serial asignado, etiquetado según la vía que lo produjo.
///
/// La variante se expone al caller (y se persiste como flag en el viaje)
/// para poder monitorear la frecuencia de colisiones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocatedSerial {
    /// Serial secuencial normal
    Sequential(String),
    /// Serial de emergencia con sufijo derivado de timestamp
    FallbackTimestamped(String),
}

impl AllocatedSerial {
    pub fn as_str(&self) -> &str {
        match self {
            AllocatedSerial::Sequential(s) => s,
            AllocatedSerial::FallbackTimestamped(s) => s,
        }
    }

    pub fn into_inner(self) -> String {
        match self {
            AllocatedSerial::Sequential(s) => s,
            AllocatedSerial::FallbackTimestamped(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AllocatedSerial::FallbackTimestamped(_))
    }
}

/// Acceso al almacén de seriales persistidos.
///
/// El lector y el validador DEBEN usar el mismo predicado de alcance:
/// ambos métodos reciben `company_id` y operan solo sobre los viajes de esa
/// empresa. Un desajuste de alcance entre lectura y validación sería un bug
/// de corrección, no de rendimiento.
#[async_trait]
pub trait SerialStore: Send + Sync {
    /// Listar seriales existentes que comparten el prefijo, en orden
    /// descendente. Una sola lectura; los errores de acceso a datos se
    /// propagan sin reintentos.
    async fn list_serials_with_prefix(
        &self,
        company_id: Uuid,
        prefix: &str,
    ) -> Result<Vec<String>, AppError>;

    /// Verificar si otro viaje ya tiene exactamente este serial.
    /// `exclude_trip_id` permite excluir el propio viaje en ediciones.
    async fn serial_exists(
        &self,
        company_id: Uuid,
        serial: &str,
        exclude_trip_id: Option<Uuid>,
    ) -> Result<bool, AppError>;
}

/// Calcular el prefijo `T{YY}-{VVVV}` de un serial.
///
/// Se toman los últimos cuatro dígitos numéricos de la matrícula; si la
/// matrícula tiene menos de cuatro dígitos se rellena con ceros a la
/// izquierda (una matrícula sin dígitos degrada a `0000`).
pub fn serial_prefix(license_plate: &str, start_date: NaiveDate) -> String {
    let year = start_date.year() % 100;
    let digits: String = license_plate.chars().filter(|c| c.is_ascii_digit()).collect();
    let last_four = if digits.len() > 4 {
        &digits[digits.len() - 4..]
    } else {
        digits.as_str()
    };
    format!("T{:02}-{:0>4}", year, last_four)
}

/// Extraer el número de secuencia de un serial que comparte el prefijo.
///
/// Sufijos malformados (longitud distinta de cuatro o con caracteres no
/// numéricos) se ignoran por completo: se tratan como ausentes, nunca como
/// cero.
fn parse_sequence(serial: &str, prefix: &str) -> Option<u32> {
    let suffix = serial.strip_prefix(prefix)?.strip_prefix('-')?;
    if suffix.len() == 4 && suffix.bytes().all(|b| b.is_ascii_digit()) {
        suffix.parse().ok()
    } else {
        None
    }
}

/// Calcular la secuencia candidata para el intento `attempt`.
///
/// Con el conjunto de seriales observados: `max + 1 + attempt`, saltando
/// hacia adelante cualquier valor ya presente en el conjunto (los reintentos
/// fuera de orden no deben volver a proponer un número ya tomado). Con el
/// conjunto vacío la secuencia es `1 + attempt`.
pub fn next_sequence(existing: &[String], prefix: &str, attempt: u32) -> u32 {
    let taken: BTreeSet<u32> = existing
        .iter()
        .filter_map(|s| parse_sequence(s, prefix))
        .collect();

    let max = taken.iter().next_back().copied().unwrap_or(0);
    let mut candidate = max + 1 + attempt;
    while taken.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

/// Orquestador de asignación de seriales.
///
/// Máquina de estados: `Attempting(k=0) → Validating → { Committed |
/// Attempting(k+1) }`, acotada por `max_attempts`. Los intentos son
/// estrictamente secuenciales: cada validación debe completarse antes de
/// calcular el siguiente candidato, porque el reintento existe precisamente
/// para reaccionar a colisiones recién observadas.
pub struct SerialAllocator<S: SerialStore> {
    store: S,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<S: SerialStore> SerialAllocator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    pub fn with_limits(store: S, max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    /// Asignar un serial único para un viaje nuevo (o re-validar en una
    /// edición, excluyendo el propio viaje).
    ///
    /// Solo la vía de fallback "falla suave" (degrada el formato); cualquier
    /// error de acceso a datos se propaga sin reintentos al caller, que debe
    /// abortar la creación del viaje.
    pub async fn allocate(
        &self,
        company_id: Uuid,
        license_plate: &str,
        start_date: NaiveDate,
        exclude_trip_id: Option<Uuid>,
    ) -> Result<AllocatedSerial, AppError> {
        let prefix = serial_prefix(license_plate, start_date);

        for attempt in 0..self.max_attempts {
            let existing = self
                .store
                .list_serials_with_prefix(company_id, &prefix)
                .await?;

            let sequence = next_sequence(&existing, &prefix, attempt);
            let candidate = format!("{}-{:04}", prefix, sequence);

            let taken = self
                .store
                .serial_exists(company_id, &candidate, exclude_trip_id)
                .await?;

            if !taken {
                debug!("✅ Serial asignado: {} (intento {})", candidate, attempt);
                return Ok(AllocatedSerial::Sequential(candidate));
            }

            warn!(
                "⚠️ Colisión de serial {} en intento {}/{}",
                candidate,
                attempt + 1,
                self.max_attempts
            );

            if attempt + 1 < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        // Todos los intentos colisionaron: sufijo derivado de timestamp.
        // Se sacrifica la legibilidad secuencial para garantizar avance.
        let suffix = (Utc::now().timestamp_millis() % 10_000) as u32;
        let serial = format!("{}-{:04}", prefix, suffix);
        warn!(
            "🆘 Intentos agotados para prefijo {}, usando serial de fallback {}",
            prefix, serial
        );
        Ok(AllocatedSerial::FallbackTimestamped(serial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Almacén en memoria para pruebas
    struct StubStore {
        serials: Mutex<Vec<String>>,
        always_taken: bool,
        exists_calls: AtomicU32,
    }

    impl StubStore {
        fn with_serials(serials: &[&str]) -> Self {
            Self {
                serials: Mutex::new(serials.iter().map(|s| s.to_string()).collect()),
                always_taken: false,
                exists_calls: AtomicU32::new(0),
            }
        }

        fn always_colliding() -> Self {
            Self {
                serials: Mutex::new(Vec::new()),
                always_taken: true,
                exists_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl SerialStore for StubStore {
        async fn list_serials_with_prefix(
            &self,
            _company_id: Uuid,
            prefix: &str,
        ) -> Result<Vec<String>, AppError> {
            let mut matching: Vec<String> = self
                .serials
                .lock()
                .unwrap()
                .iter()
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
            _exclude_trip_id: Option<Uuid>,
        ) -> Result<bool, AppError> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            if self.always_taken {
                return Ok(true);
            }
            Ok(self.serials.lock().unwrap().iter().any(|s| s == serial))
        }
    }

    fn allocator(store: StubStore) -> SerialAllocator<StubStore> {
        // Sin pausa entre intentos para que las pruebas no duerman
        SerialAllocator::with_limits(store, DEFAULT_MAX_ATTEMPTS, Duration::from_millis(0))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_serial_prefix_from_registration() {
        assert_eq!(serial_prefix("CG04AB1234", date(2025, 9, 18)), "T25-1234");
        assert_eq!(serial_prefix("AB-123-CD", date(2025, 1, 1)), "T25-0123");
        assert_eq!(serial_prefix("SINDIGITOS", date(2024, 6, 1)), "T24-0000");
        assert_eq!(serial_prefix("XX98765432", date(2031, 12, 31)), "T31-5432");
    }

    #[test]
    fn test_serial_prefix_deterministic() {
        let a = serial_prefix("CG04AB1234", date(2025, 1, 1));
        let b = serial_prefix("CG04AB1234", date(2025, 12, 31));
        assert_eq!(a, b);
    }

    #[test]
    fn test_next_sequence_empty_set() {
        assert_eq!(next_sequence(&[], "T25-1234", 0), 1);
        assert_eq!(next_sequence(&[], "T25-1234", 2), 3);
    }

    #[test]
    fn test_next_sequence_after_max() {
        let existing = vec![
            "T25-1234-0007".to_string(),
            "T25-1234-0003".to_string(),
            "T25-1234-0001".to_string(),
        ];
        assert_eq!(next_sequence(&existing, "T25-1234", 0), 8);
    }

    #[test]
    fn test_next_sequence_ignores_malformed_suffixes() {
        // Sufijos malformados se tratan como ausentes, no como cero
        let existing = vec![
            "T25-1234-XXXX".to_string(),
            "T25-1234-12".to_string(),
            "T25-1234-0002".to_string(),
        ];
        assert_eq!(next_sequence(&existing, "T25-1234", 0), 3);

        let only_garbage = vec!["T25-1234-ABCD".to_string()];
        assert_eq!(next_sequence(&only_garbage, "T25-1234", 0), 1);
    }

    #[test]
    fn test_next_sequence_never_proposes_observed_value() {
        let existing = vec![
            "T25-1234-0005".to_string(),
            "T25-1234-0007".to_string(),
        ];
        for attempt in 0..5 {
            let seq = next_sequence(&existing, "T25-1234", attempt);
            assert!(seq > 7, "secuencia {} no supera el máximo observado", seq);
        }

        let existing = vec![
            "T25-1234-0003".to_string(),
            "T25-1234-0005".to_string(),
        ];
        // max=5, intento 0 → 6 aunque haya huecos por debajo
        assert_eq!(next_sequence(&existing, "T25-1234", 0), 6);
    }

    #[tokio::test]
    async fn test_first_trip_gets_sequence_0001() {
        let alloc = allocator(StubStore::with_serials(&[]));
        let serial = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await
            .unwrap();
        assert_eq!(serial, AllocatedSerial::Sequential("T25-1234-0001".to_string()));
        assert!(!serial.is_fallback());
    }

    #[tokio::test]
    async fn test_second_trip_gets_next_sequence() {
        let alloc = allocator(StubStore::with_serials(&["T25-1234-0001"]));
        let serial = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await
            .unwrap();
        assert_eq!(serial.as_str(), "T25-1234-0002");
    }

    #[tokio::test]
    async fn test_other_prefixes_do_not_interfere() {
        let alloc = allocator(StubStore::with_serials(&[
            "T24-1234-0009",
            "T25-9999-0005",
            "T25-1234-0002",
        ]));
        let serial = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await
            .unwrap();
        assert_eq!(serial.as_str(), "T25-1234-0003");
    }

    #[tokio::test]
    async fn test_collision_retries_with_higher_sequence() {
        // El candidato 0002 ya existe pero no aparece en la lectura inicial
        // (otra sesión lo confirmó entre la lectura y la validación).
        struct RacingStore {
            exists_calls: AtomicU32,
        }

        #[async_trait]
        impl SerialStore for RacingStore {
            async fn list_serials_with_prefix(
                &self,
                _company_id: Uuid,
                _prefix: &str,
            ) -> Result<Vec<String>, AppError> {
                Ok(vec!["T25-1234-0001".to_string()])
            }

            async fn serial_exists(
                &self,
                _company_id: Uuid,
                serial: &str,
                _exclude_trip_id: Option<Uuid>,
            ) -> Result<bool, AppError> {
                self.exists_calls.fetch_add(1, Ordering::SeqCst);
                // 0002 fue tomado por otra sesión
                Ok(serial == "T25-1234-0002")
            }
        }

        let alloc = SerialAllocator::with_limits(
            RacingStore { exists_calls: AtomicU32::new(0) },
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(0),
        );
        let serial = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await
            .unwrap();

        // Nunca debe repetir 0002
        assert_ne!(serial.as_str(), "T25-1234-0002");
        assert_eq!(serial.as_str(), "T25-1234-0003");
        assert!(!serial.is_fallback());
    }

    #[tokio::test]
    async fn test_bounded_retry_falls_back_to_timestamp() {
        let store = StubStore::always_colliding();
        let alloc = allocator(store);
        let serial = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await
            .unwrap();

        assert!(serial.is_fallback());
        // El fallback conserva la forma del serial
        assert!(crate::utils::validation::validate_trip_serial(serial.as_str()).is_ok());
        assert!(serial.as_str().starts_with("T25-1234-"));
    }

    #[tokio::test]
    async fn test_bounded_retry_validates_exactly_max_attempts_times() {
        let alloc = SerialAllocator::with_limits(
            StubStore::always_colliding(),
            3,
            Duration::from_millis(0),
        );
        let serial = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await
            .unwrap();

        assert!(serial.is_fallback());
        assert_eq!(alloc.store.exists_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_data_access_error_propagates_without_retry() {
        struct FailingStore {
            list_calls: AtomicU32,
        }

        #[async_trait]
        impl SerialStore for FailingStore {
            async fn list_serials_with_prefix(
                &self,
                _company_id: Uuid,
                _prefix: &str,
            ) -> Result<Vec<String>, AppError> {
                self.list_calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::DatabaseError("connection refused".to_string()))
            }

            async fn serial_exists(
                &self,
                _company_id: Uuid,
                _serial: &str,
                _exclude_trip_id: Option<Uuid>,
            ) -> Result<bool, AppError> {
                unreachable!("la validación no debe ejecutarse si la lectura falla")
            }
        }

        let alloc = SerialAllocator::with_limits(
            FailingStore { list_calls: AtomicU32::new(0) },
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(0),
        );
        let result = alloc
            .allocate(Uuid::new_v4(), "CG04AB1234", date(2025, 9, 18), None)
            .await;

        assert!(result.is_err());
        assert_eq!(alloc.store.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generated_serials_match_format() {
        for plate in ["CG04AB1234", "AB1C", "NODIGITS"] {
            let alloc = allocator(StubStore::with_serials(&[]));
            let serial = alloc
                .allocate(Uuid::new_v4(), plate, date(2025, 9, 18), None)
                .await
                .unwrap();
            assert!(
                crate::utils::validation::validate_trip_serial(serial.as_str()).is_ok(),
                "serial con formato inválido: {}",
                serial.as_str()
            );
        }
    }
}
