//! Auto-asignación de almacén
//!
//! Este módulo selecciona el almacén para un viaje nuevo aplicando las
//! reglas configuradas por la empresa. Una regla aplica si el destino del
//! viaje contiene su palabra clave y, cuando la regla fija un tipo de carga,
//! este coincide. Gana la regla aplicable de mayor prioridad.

use uuid::Uuid;

use crate::models::warehouse::WarehouseRule;

/// Seleccionar el almacén para un destino y tipo de carga dados.
///
/// Devuelve `None` cuando ninguna regla aplica: el viaje queda sin almacén
/// asignado y el operador puede fijarlo manualmente.
pub fn select_warehouse(
    rules: &[WarehouseRule],
    destination: &str,
    cargo_type: Option<&str>,
) -> Option<Uuid> {
    let destination = destination.to_lowercase();

    rules
        .iter()
        .filter(|rule| {
            destination.contains(&rule.destination_keyword.to_lowercase())
        })
        .filter(|rule| match (&rule.cargo_type, cargo_type) {
            (None, _) => true,
            (Some(required), Some(given)) => required.eq_ignore_ascii_case(given),
            (Some(_), None) => false,
        })
        .max_by_key(|rule| rule.priority)
        .map(|rule| rule.warehouse_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rule(keyword: &str, cargo: Option<&str>, priority: i32, warehouse_id: Uuid) -> WarehouseRule {
        WarehouseRule {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            warehouse_id,
            destination_keyword: keyword.to_string(),
            cargo_type: cargo.map(|c| c.to_string()),
            priority,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_destination_keyword_case_insensitive() {
        let w1 = Uuid::new_v4();
        let rules = vec![rule("lyon", None, 1, w1)];

        assert_eq!(select_warehouse(&rules, "Dépôt LYON Sud", None), Some(w1));
        assert_eq!(select_warehouse(&rules, "Marseille", None), None);
    }

    #[test]
    fn test_higher_priority_wins() {
        let general = Uuid::new_v4();
        let specific = Uuid::new_v4();
        let rules = vec![
            rule("lyon", None, 1, general),
            rule("lyon sud", None, 5, specific),
        ];

        assert_eq!(select_warehouse(&rules, "Lyon Sud", None), Some(specific));
        assert_eq!(select_warehouse(&rules, "Lyon Nord", None), Some(general));
    }

    #[test]
    fn test_cargo_type_restriction() {
        let cold = Uuid::new_v4();
        let dry = Uuid::new_v4();
        let rules = vec![
            rule("paris", Some("refrigerated"), 5, cold),
            rule("paris", None, 1, dry),
        ];

        assert_eq!(select_warehouse(&rules, "Paris 12e", Some("refrigerated")), Some(cold));
        // Sin tipo de carga la regla específica no aplica
        assert_eq!(select_warehouse(&rules, "Paris 12e", None), Some(dry));
        assert_eq!(select_warehouse(&rules, "Paris 12e", Some("dry")), Some(dry));
    }

    #[test]
    fn test_no_rules_returns_none() {
        assert_eq!(select_warehouse(&[], "Lyon", None), None);
    }
}
