//! Request types for the Compensation Engine API.
//!
//! These are the wire shapes accepted by both calculator endpoints and by
//! the tool server. Field names follow the Spanish names clients send;
//! numbers may arrive as JSON numbers or numeric strings.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};
use crate::models::{AggravatingFactors, ContingencyType, IncapacityInput, SeveranceInput};

/// Date format accepted on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO-8601 calendar date, naming `field` on failure.
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
        EngineError::invalid_input(
            field,
            format!("'{}' is not a valid YYYY-MM-DD date: {}", value, err),
        )
    })
}

/// A JSON arguments object read one field at a time, so that a failure is
/// reported against the field it came from.
struct Fields(Map<String, Value>);

impl Fields {
    fn new(arguments: Value) -> EngineResult<Self> {
        let kind = match arguments {
            Value::Object(fields) => return Ok(Self(fields)),
            Value::Null => return Ok(Self(Map::new())),
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
        };
        Err(EngineError::invalid_input(
            "arguments",
            format!("expected an object, got {}", kind),
        ))
    }

    /// Reads an optional field; `null` counts as absent.
    fn optional<T: DeserializeOwned>(&mut self, name: &str) -> EngineResult<Option<T>> {
        match self.0.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(&value)
                .map(Some)
                .map_err(|err| EngineError::invalid_input(name, err.to_string())),
        }
    }

    fn required<T: DeserializeOwned>(&mut self, name: &str) -> EngineResult<T> {
        self.optional(name)?
            .ok_or_else(|| EngineError::invalid_input(name, format!("missing field `{}`", name)))
    }

    /// Reads an object whose members all have defaults. A member that fails
    /// is reported as `name.member`.
    fn defaulted<T: DeserializeOwned + Default>(&mut self, name: &str) -> EngineResult<T> {
        let value = match self.0.remove(name) {
            None | Some(Value::Null) => return Ok(T::default()),
            Some(value) => value,
        };
        T::deserialize(&value).map_err(|err| {
            let field = failing_member::<T>(&value)
                .map_or_else(|| name.to_string(), |member| format!("{}.{}", name, member));
            EngineError::invalid_input(field, err.to_string())
        })
    }
}

/// Returns the first member of an object that fails to deserialize as `T`
/// on its own.
fn failing_member<T: DeserializeOwned>(value: &Value) -> Option<&str> {
    value.as_object()?.iter().find_map(|(member, entry)| {
        let alone = Value::Object(Map::from_iter([(member.clone(), entry.clone())]));
        T::deserialize(&alone).is_err().then_some(member.as_str())
    })
}

/// Request body for `POST /calculate/incapacidad` and the
/// `calcular_incapacidad` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncapacityRequest {
    /// Monthly base income (IBM).
    #[serde(rename = "ingresoBase")]
    pub base_income: Decimal,
    /// Disability percentage, 0 to 100.
    #[serde(rename = "porcentajeIncapacidad")]
    pub disability_percentage: Decimal,
    /// Age in years at the time of the contingency.
    #[serde(rename = "edad")]
    pub age: Decimal,
    /// Contingency type, e.g. `accidente_trabajo`.
    #[serde(rename = "tipoContingencia")]
    pub contingency_type: String,
    /// Date the disability became permanent (PMI); selects the statutory
    /// amounts in force on that date.
    #[serde(rename = "fechaPMI", default, skip_serializing_if = "Option::is_none")]
    pub pmi_date: Option<String>,
}

impl IncapacityRequest {
    /// Parses the optional PMI date.
    pub fn pmi_date(&self) -> EngineResult<Option<NaiveDate>> {
        self.pmi_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_date("fechaPMI", value))
            .transpose()
    }
}

/// Reads tool arguments, naming the offending field on failure.
impl TryFrom<Value> for IncapacityRequest {
    type Error = EngineError;

    fn try_from(arguments: Value) -> Result<Self, Self::Error> {
        let mut fields = Fields::new(arguments)?;
        Ok(IncapacityRequest {
            base_income: fields.required("ingresoBase")?,
            disability_percentage: fields.required("porcentajeIncapacidad")?,
            age: fields.required("edad")?,
            contingency_type: fields.required("tipoContingencia")?,
            pmi_date: fields.optional("fechaPMI")?,
        })
    }
}

impl TryFrom<IncapacityRequest> for IncapacityInput {
    type Error = EngineError;

    fn try_from(req: IncapacityRequest) -> Result<Self, Self::Error> {
        Ok(IncapacityInput {
            base_income: req.base_income,
            disability_percentage: req.disability_percentage,
            age: req.age,
            contingency_type: ContingencyType::from_str(req.contingency_type.trim())?,
        })
    }
}

/// Request body for `POST /calculate/indemnizacion` and the
/// `calcular_indemnizacion` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveranceRequest {
    /// Best normal and habitual monthly salary.
    #[serde(rename = "salario")]
    pub salary: Decimal,
    /// Hiring date, `YYYY-MM-DD`.
    #[serde(rename = "fechaIngreso")]
    pub start_date: String,
    /// Termination date, `YYYY-MM-DD`.
    #[serde(rename = "fechaEgreso")]
    pub end_date: String,
    /// Whether the employer gave notice.
    #[serde(rename = "preaviso")]
    pub notice_given: bool,
    /// Aggravating-factor flags; all default to false, including when the
    /// whole object is `null`.
    #[serde(
        rename = "agravantes",
        default,
        deserialize_with = "crate::models::null_as_default"
    )]
    pub aggravating_factors: AggravatingFactors,
}

/// Reads tool arguments, naming the offending field on failure.
impl TryFrom<Value> for SeveranceRequest {
    type Error = EngineError;

    fn try_from(arguments: Value) -> Result<Self, Self::Error> {
        let mut fields = Fields::new(arguments)?;
        Ok(SeveranceRequest {
            salary: fields.required("salario")?,
            start_date: fields.required("fechaIngreso")?,
            end_date: fields.required("fechaEgreso")?,
            notice_given: fields.required("preaviso")?,
            aggravating_factors: fields.defaulted("agravantes")?,
        })
    }
}

impl TryFrom<SeveranceRequest> for SeveranceInput {
    type Error = EngineError;

    fn try_from(req: SeveranceRequest) -> Result<Self, Self::Error> {
        Ok(SeveranceInput {
            salary: req.salary,
            start_date: parse_date("fechaIngreso", &req.start_date)?,
            end_date: parse_date("fechaEgreso", &req.end_date)?,
            notice_given: req.notice_given,
            aggravating_factors: req.aggravating_factors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_incapacity_request_accepts_numbers_and_strings() {
        let json = r#"{
            "ingresoBase": 500000,
            "porcentajeIncapacidad": "40",
            "edad": 35,
            "tipoContingencia": "accidente_trabajo"
        }"#;
        let req: IncapacityRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.base_income, dec("500000"));
        assert_eq!(req.disability_percentage, dec("40"));
        assert!(req.pmi_date.is_none());

        let input = IncapacityInput::try_from(req).unwrap();
        assert_eq!(input.contingency_type, ContingencyType::WorkAccident);
    }

    #[test]
    fn test_incapacity_request_rejects_unknown_contingency() {
        let req = IncapacityRequest {
            base_income: dec("1000"),
            disability_percentage: dec("10"),
            age: dec("30"),
            contingency_type: "inundacion".to_string(),
            pmi_date: None,
        };

        match IncapacityInput::try_from(req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "tipoContingencia"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_pmi_date_parsing() {
        let mut req = IncapacityRequest {
            base_income: dec("1000"),
            disability_percentage: dec("10"),
            age: dec("30"),
            contingency_type: "otro".to_string(),
            pmi_date: Some("2024-10-01".to_string()),
        };
        assert_eq!(
            req.pmi_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 1)
        );

        req.pmi_date = Some("".to_string());
        assert_eq!(req.pmi_date().unwrap(), None);

        req.pmi_date = Some("01/10/2024".to_string());
        match req.pmi_date() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "fechaPMI"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_severance_request_defaults_aggravating_flags() {
        let json = r#"{
            "salario": 500000,
            "fechaIngreso": "2020-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": false
        }"#;
        let req: SeveranceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.aggravating_factors, AggravatingFactors::default());

        let input = SeveranceInput::try_from(req).unwrap();
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(input.end_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(!input.notice_given);
    }

    #[test]
    fn test_severance_request_accepts_null_aggravating_factors() {
        let json = r#"{
            "salario": 500000,
            "fechaIngreso": "2020-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": false,
            "agravantes": null
        }"#;
        let req: SeveranceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.aggravating_factors, AggravatingFactors::default());
    }

    #[test]
    fn test_severance_request_accepts_null_flags() {
        let json = r#"{
            "salario": 500000,
            "fechaIngreso": "2020-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": false,
            "agravantes": { "matrimonio": null, "certificadosArt80": true }
        }"#;
        let req: SeveranceRequest = serde_json::from_str(json).unwrap();
        assert!(!req.aggravating_factors.marriage);
        assert!(req.aggravating_factors.certificates_art80);
    }

    #[test]
    fn test_severance_request_names_bad_date_field() {
        let req = SeveranceRequest {
            salary: dec("500000"),
            start_date: "2020-01-01".to_string(),
            end_date: "not-a-date".to_string(),
            notice_given: true,
            aggravating_factors: AggravatingFactors::default(),
        };

        match SeveranceInput::try_from(req) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "fechaEgreso");
                assert!(message.contains("not-a-date"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    fn field_of(err: EngineError) -> String {
        match err {
            EngineError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_arguments_name_the_missing_field() {
        let err = SeveranceRequest::try_from(serde_json::json!({
            "salario": 500000,
            "fechaIngreso": "2023-01-01",
            "preaviso": true
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid input 'fechaEgreso': missing field `fechaEgreso`");
    }

    #[test]
    fn test_arguments_name_the_mistyped_field() {
        let err = IncapacityRequest::try_from(serde_json::json!({
            "ingresoBase": 500000,
            "porcentajeIncapacidad": 70,
            "edad": [50],
            "tipoContingencia": "otro"
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "edad");

        let err = SeveranceRequest::try_from(serde_json::json!({
            "salario": 500000,
            "fechaIngreso": "2023-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": "no"
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "preaviso");
    }

    #[test]
    fn test_arguments_name_the_mistyped_flag() {
        let err = SeveranceRequest::try_from(serde_json::json!({
            "salario": 500000,
            "fechaIngreso": "2023-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": true,
            "agravantes": { "electo": true, "matrimonio": "si" }
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "agravantes.matrimonio");
    }

    #[test]
    fn test_arguments_accept_null_aggravating_factors() {
        let req = SeveranceRequest::try_from(serde_json::json!({
            "salario": 500000,
            "fechaIngreso": "2023-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": true,
            "agravantes": null
        }))
        .unwrap();
        assert_eq!(req.aggravating_factors, AggravatingFactors::default());

        let req = SeveranceRequest::try_from(serde_json::json!({
            "salario": 500000,
            "fechaIngreso": "2023-01-01",
            "fechaEgreso": "2025-01-01",
            "preaviso": true,
            "agravantes": { "matrimonio": null, "electo": true }
        }))
        .unwrap();
        assert!(!req.aggravating_factors.marriage);
        assert!(req.aggravating_factors.elected_official);
    }

    #[test]
    fn test_non_object_arguments_are_rejected() {
        let err = IncapacityRequest::try_from(serde_json::json!("hola")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input 'arguments': expected an object, got a string"
        );
    }

    #[test]
    fn test_missing_field_is_reported_by_serde() {
        let err = serde_json::from_str::<SeveranceRequest>(r#"{"salario": 1}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `fechaIngreso`"));
    }
}
