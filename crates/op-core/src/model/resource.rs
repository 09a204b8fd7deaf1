use serde_json::Value;

use super::ValidationErrors;

/// Interfaz explícita que un recurso expone a las capacidades.
///
/// Todos los métodos tienen un default neutro: un recurso que no implementa
/// nada no recibe parámetros copiados y se considera válido.
pub trait Resource {
    /// Asigna `value` al atributo `name` si el recurso lo expone como mutable.
    /// Devuelve `true` si lo asignó.
    fn assign(&mut self, _name: &str, _value: &Value) -> bool {
        false
    }

    /// Validación propia del recurso, usada cuando no hay contrato
    /// configurado. `None` significa que no tiene.
    fn validate(&self) -> Option<bool> {
        None
    }

    fn errors(&self) -> ValidationErrors {
        ValidationErrors::new()
    }
}

impl Resource for () {}

/// Un objeto JSON acepta asignaciones sólo sobre claves ya existentes.
impl Resource for Value {
    fn assign(&mut self, name: &str, value: &Value) -> bool {
        match self {
            Value::Object(map) => match map.get_mut(name) {
                Some(slot) => {
                    *slot = value.clone();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_objects_only_accept_known_attributes() {
        let mut res = json!({"title": "old"});
        assert!(res.assign("title", &json!("new")));
        assert!(!res.assign("admin", &json!(true)));
        assert_eq!(res, json!({"title": "new"}));
    }
}
