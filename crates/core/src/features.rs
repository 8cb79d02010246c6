//! FeatureVector - The seven scalar inputs of the scoring formula

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Names of the scoring features, in weight-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureName {
    PayHist,
    Utilization,
    SavingsRate,
    CashflowVar,
    HistoryLen,
    SipRegularity,
    MandatePunctual,
}

/// Fixed-shape feature record.
///
/// Every field is nominally in `[0, 1]`. Missing fields decode as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureVector {
    pub pay_hist: f64,
    pub utilization: f64,
    pub savings_rate: f64,
    pub cashflow_var: f64,
    pub history_len: f64,
    pub sip_regularity: f64,
    pub mandate_punctual: f64,
}

impl FeatureVector {
    /// Read one feature by name
    pub fn get(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::PayHist => self.pay_hist,
            FeatureName::Utilization => self.utilization,
            FeatureName::SavingsRate => self.savings_rate,
            FeatureName::CashflowVar => self.cashflow_var,
            FeatureName::HistoryLen => self.history_len,
            FeatureName::SipRegularity => self.sip_regularity,
            FeatureName::MandatePunctual => self.mandate_punctual,
        }
    }

    /// Set one feature by name
    pub fn set(&mut self, name: FeatureName, value: f64) {
        let slot = match name {
            FeatureName::PayHist => &mut self.pay_hist,
            FeatureName::Utilization => &mut self.utilization,
            FeatureName::SavingsRate => &mut self.savings_rate,
            FeatureName::CashflowVar => &mut self.cashflow_var,
            FeatureName::HistoryLen => &mut self.history_len,
            FeatureName::SipRegularity => &mut self.sip_regularity,
            FeatureName::MandatePunctual => &mut self.mandate_punctual,
        };
        *slot = value;
    }

    /// Decode from an open JSON mapping.
    ///
    /// Unknown keys are ignored. Missing, `null`, or non-numeric values become
    /// `0.0`; numeric strings such as `"0.4"` are accepted. Returns the vector
    /// together with the names that had to be substituted.
    pub fn from_json_lenient(value: &Value) -> (Self, Vec<FeatureName>) {
        use strum::IntoEnumIterator;

        let mut vector = Self::default();
        let mut substituted = Vec::new();

        for name in FeatureName::iter() {
            let parsed = value.get(name.as_ref()).and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                _ => None,
            });

            match parsed.filter(|v| v.is_finite()) {
                Some(v) => vector.set(name, v),
                None => substituted.push(name),
            }
        }

        (vector, substituted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_feature_name_order() {
        let names: Vec<String> = FeatureName::iter().map(|n| n.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "pay_hist",
                "utilization",
                "savings_rate",
                "cashflow_var",
                "history_len",
                "sip_regularity",
                "mandate_punctual",
            ]
        );
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let vector: FeatureVector = serde_json::from_value(json!({ "pay_hist": 0.8 })).unwrap();
        assert_eq!(vector.pay_hist, 0.8);
        assert_eq!(vector.utilization, 0.0);
        assert_eq!(vector.mandate_punctual, 0.0);
    }

    #[test]
    fn test_lenient_decoding() {
        let value = json!({
            "pay_hist": 0.8,
            "utilization": "0.3",
            "savings_rate": "lots",
            "cashflow_var": null,
            "history_len": 0.6,
            "extra": 42,
        });
        let (vector, substituted) = FeatureVector::from_json_lenient(&value);

        assert_eq!(vector.pay_hist, 0.8);
        assert_eq!(vector.utilization, 0.3);
        assert_eq!(vector.savings_rate, 0.0);
        assert_eq!(vector.history_len, 0.6);
        assert_eq!(
            substituted,
            vec![
                FeatureName::SavingsRate,
                FeatureName::CashflowVar,
                FeatureName::SipRegularity,
                FeatureName::MandatePunctual,
            ]
        );
    }

    #[test]
    fn test_get_set_by_name() {
        let mut vector = FeatureVector::default();
        for (i, name) in FeatureName::iter().enumerate() {
            vector.set(name, i as f64);
        }
        assert_eq!(vector.get(FeatureName::PayHist), 0.0);
        assert_eq!(vector.get(FeatureName::MandatePunctual), 6.0);
        assert_eq!(vector.cashflow_var, 3.0);
    }
}
