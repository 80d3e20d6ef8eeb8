//! INR → invoice currency conversion and derived amounts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tradedocs_core::{format2, round2, sanitized_f64, value_text};

use crate::currency::Currency;

/// Amounts as entered, in INR.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceAmounts {
    pub total: f64,
    pub advance: f64,
    pub received: f64,
}

/// Amounts in the invoice currency, each rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedAmounts {
    pub total: f64,
    pub advance: f64,
    pub receivable: f64,
    pub received: f64,
    pub balance: f64,
}

impl ReferenceAmounts {
    /// Read the three amount fields leniently; missing ones are zero.
    pub fn from_values(total: Option<&Value>, advance: Option<&Value>, received: Option<&Value>) -> Self {
        let read = |v: Option<&Value>| v.map(sanitized_f64).unwrap_or(0.0);
        Self {
            total: read(total),
            advance: read(advance),
            received: read(received),
        }
    }

    /// Convert, then derive receivable and balance from the converted values.
    pub fn convert(self, currency: &Currency) -> ConvertedAmounts {
        let divisor = currency.divisor();
        let total = round2(self.total / divisor);
        let advance = round2(self.advance / divisor);
        let received = round2(self.received / divisor);
        let receivable = round2(total - advance);
        ConvertedAmounts {
            total,
            advance,
            receivable,
            received,
            balance: round2(receivable - received),
        }
    }
}

/// Stored invoice line. Rates and totals are kept as two-decimal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub line_no: Value,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    /// Quantity exactly as entered.
    #[serde(default)]
    pub quantity: String,
    pub unit_rate: String,
    pub total: String,
}

impl LineItem {
    fn convert(raw: &Map<String, Value>, divisor: f64) -> Self {
        let get = |key: &str| raw.get(key).unwrap_or(&Value::Null);

        let quantity = sanitized_f64(get("quantity"));
        let unit_rate = round2(sanitized_f64(get("unitRate")) / divisor);
        let reference_total = sanitized_f64(get("total"));
        let total = if reference_total != 0.0 {
            round2(reference_total / divisor)
        } else {
            round2(quantity * unit_rate)
        };

        Self {
            line_no: get("lineNo").clone(),
            part_number: value_text(get("partNumber")),
            description: value_text(get("description")),
            quantity: value_text(get("quantity")),
            unit_rate: format2(unit_rate),
            total: format2(total),
        }
    }
}

/// Convert every object in `raw`; anything else is skipped.
pub fn convert_line_items(raw: &Value, currency: &Currency) -> Vec<LineItem> {
    let divisor = currency.divisor();
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| LineItem::convert(item, divisor))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn currency(code: &str) -> Currency {
        Currency::parse(code).unwrap()
    }

    #[test]
    fn converts_reference_totals() {
        let usd = ReferenceAmounts { total: 900.0, ..Default::default() }.convert(&currency("USD"));
        assert_eq!(usd.total, 10.0);
        let dinar = ReferenceAmounts { total: 286.0, ..Default::default() }.convert(&currency("DINAR"));
        assert_eq!(dinar.total, 1.0);
    }

    #[test]
    fn half_cent_conversions_round_to_even() {
        let usd = ReferenceAmounts { total: 11.25, advance: 33.75, received: 0.0 }
            .convert(&currency("USD"));
        assert_eq!(usd.total, 0.12);
        assert_eq!(usd.advance, 0.38);
        assert_eq!(usd.receivable, -0.26);

        let items = convert_line_items(
            &json!([{"quantity": 1, "unitRate": "11.25", "total": "33.75"}]),
            &currency("USD"),
        );
        assert_eq!(items[0].unit_rate, "0.12");
        assert_eq!(items[0].total, "0.38");
    }

    #[test]
    fn derives_receivable_and_balance_after_conversion() {
        let amounts = ReferenceAmounts::from_values(
            Some(&json!("9,000")),
            Some(&json!(1800)),
            Some(&json!("₹ 2700.00")),
        )
        .convert(&currency("USD"));
        assert_eq!(
            amounts,
            ConvertedAmounts {
                total: 100.0,
                advance: 20.0,
                receivable: 80.0,
                received: 30.0,
                balance: 50.0,
            }
        );
    }

    #[test]
    fn missing_and_garbage_amounts_are_zero() {
        let amounts = ReferenceAmounts::from_values(None, Some(&json!("n/a")), Some(&json!(null)))
            .convert(&currency("INR"));
        assert_eq!(amounts, ConvertedAmounts::default());
    }

    #[test]
    fn line_total_prefers_the_entered_total() {
        let items = convert_line_items(
            &json!([
                {"lineNo": 1, "partNumber": "P-1", "description": "Valve", "quantity": "3", "unitRate": "900", "total": "1800"},
                {"lineNo": 2, "quantity": 3, "unitRate": "900", "total": ""},
                "not a line"
            ]),
            &currency("USD"),
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].unit_rate, "10.00");
        assert_eq!(items[0].total, "20.00");
        assert_eq!(items[0].part_number, "P-1");
        assert_eq!(items[0].quantity, "3");
        assert_eq!(items[1].total, "30.00");
        assert_eq!(items[1].quantity, "3");
        assert_eq!(items[1].description, "");
        assert_eq!(items[1].line_no, json!(2));
    }

    #[test]
    fn non_list_line_items_are_empty() {
        assert!(convert_line_items(&json!({"lineNo": 1}), &currency("USD")).is_empty());
        assert!(convert_line_items(&Value::Null, &currency("USD")).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn converted_amounts_are_rounded_to_cents(
            total in 0.0f64..1.0e7,
            advance in 0.0f64..1.0e6,
            received in 0.0f64..1.0e6,
        ) {
            let out = ReferenceAmounts { total, advance, received }.convert(&currency("USD"));
            for v in [out.total, out.advance, out.receivable, out.received, out.balance] {
                prop_assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
            }
            prop_assert!((out.receivable - (out.total - out.advance)).abs() < 0.0051);
        }
    }
}
