//! JSON codec for the two persisted blobs.
//!
//! Encoding writes the canonical shape. Decoding is lenient: whatever was stored is
//! normalized here, once, into fully populated domain values so nothing downstream
//! has to second-guess a field.

use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::warn;

use crate::currency::parse_decimal;
use crate::domain::{within_amount_limit, DayOfMonth, Inputs, ItemId, ItemKind, RecurringItem};
use crate::errors::Result;

pub const UNNAMED_ITEM: &str = "Unbekannter Posten";

pub fn encode_items(items: &[RecurringItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

pub fn encode_inputs(inputs: &Inputs) -> Result<String> {
    Ok(serde_json::to_string(inputs)?)
}

/// Decodes the items blob. Fails only when the blob is not JSON at all; individual
/// records that cannot be repaired are skipped.
pub fn decode_items(data: &str) -> Result<Vec<RecurringItem>> {
    let value: Value = serde_json::from_str(data)?;
    let records = match value {
        Value::Array(records) => records,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!(kind = json_kind(&other), "items blob is not a list, treating as empty");
            return Ok(Vec::new());
        }
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let Some(fields) = record.as_object() else {
            warn!(index, "skipping item record that is not an object");
            continue;
        };
        if let Some(mut item) = normalize_item(index, fields) {
            if !seen.insert(item.id.clone()) {
                warn!(index, id = %item.id, "duplicate item id, assigning a new one");
                item.id = ItemId::generate();
                seen.insert(item.id.clone());
            }
            items.push(item);
        }
    }
    Ok(items)
}

/// Decodes the inputs blob. Missing or non-numeric fields become zero.
pub fn decode_inputs(data: &str) -> Result<Inputs> {
    let value: Value = serde_json::from_str(data)?;
    let Some(fields) = value.as_object() else {
        warn!(kind = json_kind(&value), "inputs blob is not an object, using zeros");
        return Ok(Inputs::default());
    };
    Ok(Inputs {
        kontostand: money_field(fields, "kontostand"),
        bargeld: money_field(fields, "bargeld"),
        bekomme: money_field(fields, "bekomme"),
    })
}

fn normalize_item(index: usize, fields: &Map<String, Value>) -> Option<RecurringItem> {
    let Some(day_of_month) = fields.get("dayOfMonth").and_then(day_from_value) else {
        warn!(index, "skipping item record without a usable dayOfMonth");
        return None;
    };
    let Some(kind) = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(|raw| ItemKind::from_str(raw).ok())
    else {
        warn!(index, "skipping item record without a usable type");
        return None;
    };

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => ItemId::from(id.as_str()),
        Some(Value::Number(id)) => ItemId::from(id.to_string()),
        _ => ItemId::generate(),
    };
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED_ITEM)
        .to_string();

    let mut amount = money_field(fields, "amount");
    if amount.is_sign_negative() && !amount.is_zero() {
        warn!(index, %amount, "negative item amount, treating as 0");
        amount = Decimal::ZERO;
    }

    Some(RecurringItem {
        id,
        name,
        amount,
        day_of_month,
        kind,
        active: fields.get("active").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn money_field(fields: &Map<String, Value>, key: &str) -> Decimal {
    match fields.get(key) {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(value) => match decimal_from_value(value) {
            Some(amount) if within_amount_limit(amount) => amount,
            Some(amount) => {
                warn!(field = key, %amount, "amount out of range, treating as 0");
                Decimal::ZERO
            }
            None => {
                warn!(field = key, "non-numeric amount, treating as 0");
                Decimal::ZERO
            }
        },
    }
}

// JSON numbers may be written in exponent form (`7e28`); strings follow user input rules.
fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let raw = number.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .ok()
        }
        Value::String(raw) => parse_decimal(raw),
        _ => None,
    }
}

fn day_from_value(value: &Value) -> Option<DayOfMonth> {
    let day = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?,
        Value::String(raw) => raw.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Some(DayOfMonth::clamped(day))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_well_formed_blob() {
        let data = r#"[
            {"id":"seed_0_1","name":"Kindergeld","amount":255,"dayOfMonth":15,"type":"income","active":true},
            {"id":"seed_1_1","name":"GEZ","amount":9.2,"dayOfMonth":1,"type":"expense","active":false}
        ]"#;
        let items = decode_items(data).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "seed_0_1");
        assert_eq!(items[0].amount, dec!(255));
        assert_eq!(items[1].amount, dec!(9.2));
        assert!(!items[1].active);
    }

    #[test]
    fn repairs_missing_and_malformed_fields() {
        let data = r#"[
            {"dayOfMonth":"12","type":"expense"},
            {"id":"n1","name":"  ","amount":"22,50","dayOfMonth":44,"type":"expense","active":true},
            {"id":"n2","name":"Neg","amount":-5,"dayOfMonth":3,"type":"income","active":true},
            {"id":"n3","name":"Text","amount":"viel","dayOfMonth":7.9,"type":"income","active":true}
        ]"#;
        let items = decode_items(data).unwrap();
        assert_eq!(items.len(), 4);

        assert_eq!(items[0].name, UNNAMED_ITEM);
        assert_eq!(items[0].amount, Decimal::ZERO);
        assert_eq!(items[0].day_of_month.get(), 12);
        assert!(!items[0].active);
        assert!(!items[0].id.as_str().is_empty());

        assert_eq!(items[1].name, UNNAMED_ITEM);
        assert_eq!(items[1].amount, dec!(22.50));
        assert_eq!(items[1].day_of_month.get(), 31);

        assert_eq!(items[2].amount, Decimal::ZERO);
        assert_eq!(items[3].amount, Decimal::ZERO);
        assert_eq!(items[3].day_of_month.get(), 7);
    }

    #[test]
    fn skips_records_without_day_or_type() {
        let data = r#"[
            {"id":"a","name":"No day","amount":1,"type":"expense","active":true},
            {"id":"b","name":"Bad type","amount":1,"dayOfMonth":3,"type":"transfer","active":true},
            "garbage",
            {"id":"c","name":"Ok","amount":1,"dayOfMonth":3,"type":"expense","active":true}
        ]"#;
        let items = decode_items(data).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_str(), "c");
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let data = r#"[
            {"id":"dup","name":"A","amount":1,"dayOfMonth":3,"type":"expense","active":true},
            {"id":"dup","name":"B","amount":2,"dayOfMonth":4,"type":"expense","active":true}
        ]"#;
        let items = decode_items(data).unwrap();
        assert_eq!(items[0].id.as_str(), "dup");
        assert_ne!(items[1].id.as_str(), "dup");
    }

    #[test]
    fn non_list_items_blob_is_empty_but_invalid_json_errors() {
        assert!(decode_items("{}").unwrap().is_empty());
        assert!(decode_items("null").unwrap().is_empty());
        assert!(decode_items("{not json").is_err());
    }

    #[test]
    fn inputs_default_missing_fields_to_zero() {
        let inputs = decode_inputs(r#"{"kontostand":-12.5,"bargeld":"40,10"}"#).unwrap();
        assert_eq!(inputs, Inputs::new(dec!(-12.5), dec!(40.10), Decimal::ZERO));
        assert_eq!(decode_inputs("[]").unwrap(), Inputs::default());
    }

    #[test]
    fn out_of_range_amounts_are_repaired_to_zero() {
        let data = r#"[
            {"id":"big","name":"Big","amount":7e28,"dayOfMonth":20,"type":"income","active":true},
            {"id":"huge","name":"Huge","amount":1e40,"dayOfMonth":21,"type":"income","active":true},
            {"id":"text","name":"Text","amount":"2000000000000000","dayOfMonth":22,"type":"expense","active":true},
            {"id":"ok","name":"Ok","amount":1.5e3,"dayOfMonth":23,"type":"expense","active":true}
        ]"#;
        let items = decode_items(data).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].amount, Decimal::ZERO);
        assert_eq!(items[1].amount, Decimal::ZERO);
        assert_eq!(items[2].amount, Decimal::ZERO);
        assert_eq!(items[3].amount, dec!(1500));

        let inputs = decode_inputs(r#"{"kontostand":7e28,"bargeld":-7e28,"bekomme":1e15}"#).unwrap();
        assert_eq!(inputs, Inputs::new(Decimal::ZERO, Decimal::ZERO, crate::domain::MAX_AMOUNT));
    }

    #[test]
    fn encoded_blobs_decode_to_the_same_values() {
        let items = crate::domain::default_items();
        let decoded = decode_items(&encode_items(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);

        let inputs = Inputs::new(dec!(1000), dec!(50.25), dec!(-3));
        assert_eq!(decode_inputs(&encode_inputs(&inputs).unwrap()).unwrap(), inputs);
    }
}
