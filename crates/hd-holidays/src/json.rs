//! Loading rules from JSON rule data.
//!
//! The accepted shape is
//!
//! ```json
//! {
//!   "id": "us-thanksgiving",
//!   "name": "Thanksgiving",
//!   "type": "nth-weekday",
//!   "rule": { "month": 11, "weekday": 4, "nth": 4 },
//!   "observedRule": { "type": "substitute", "weekends": [0, 6], "direction": "forward" },
//!   "duration": 1,
//!   "regions": ["US"],
//!   "active": true
//! }
//! ```
//!
//! Unknown `type`, lunar `calendar`, or observed `type` tags fail immediately
//! with their dedicated error.  Every other problem (missing or ill-typed
//! fields, out-of-range values) is collected and reported together as
//! [`Error::InvalidRule`].  Custom rules carry code and cannot be loaded.

use crate::rule::{Direction, HolidayRule, ObservedRule, ObservedType, RuleKind, RuleType};
use crate::validation;
use hd_core::errors::{Error, Result};
use hd_time::{LunarCalendar, WeekendSet};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Parse a JSON array of rules.
pub fn rules_from_json(json: &str) -> Result<Vec<HolidayRule>> {
    let value: Value = serde_json::from_str(json).map_err(|e| Error::InvalidArgument(e.to_string()))?;
    match value {
        Value::Array(items) => items.iter().map(rule_from_value).collect(),
        _ => Err(Error::InvalidArgument("expected a JSON array of rules".into())),
    }
}

impl HolidayRule {
    /// Parse a single rule from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidArgument(e.to_string()))?;
        rule_from_value(&value)
    }
}

/// Build a rule from an already-parsed JSON value.
pub fn rule_from_value(value: &Value) -> Result<HolidayRule> {
    let Some(obj) = value.as_object() else {
        return Err(Error::InvalidRule {
            rule: String::new(),
            violations: vec!["rule must be a JSON object".into()],
        });
    };
    let mut violations = Vec::new();

    let name = match obj.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            violations.push("name must be a string".to_string());
            String::new()
        }
    };
    let id = optional_str(obj, "id", "", &mut violations);

    let rule_type = match obj.get("type") {
        Some(Value::String(tag)) => Some(tag.parse::<RuleType>()?),
        None | Some(Value::Null) => {
            violations.push("type is required".to_string());
            None
        }
        Some(_) => {
            violations.push("type must be a string".to_string());
            None
        }
    };

    let kind = match (rule_type, obj.get("rule")) {
        (None, _) => None,
        (Some(RuleType::Custom), _) => {
            violations.push("custom rules cannot be loaded from data".to_string());
            None
        }
        (Some(_), None | Some(Value::Null)) => {
            violations.push("rule payload is required".to_string());
            None
        }
        (Some(t), Some(Value::Object(payload))) => parse_payload(t, payload, &mut violations)?,
        (Some(_), Some(_)) => {
            violations.push("rule payload must be an object".to_string());
            None
        }
    };

    let observed = match obj.get("observedRule") {
        None | Some(Value::Null) => None,
        Some(Value::Object(o)) => parse_observed(o, &mut violations)?,
        Some(_) => {
            violations.push("observedRule must be an object".to_string());
            None
        }
    };

    let duration = optional_int::<u32>(obj, "duration", "", &mut violations).unwrap_or(1);
    let active = match obj.get("active") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            violations.push("active must be a boolean".to_string());
            true
        }
    };
    let regions = match obj.get("regions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    violations.push("regions must contain only strings".to_string());
                    None
                }
            })
            .collect(),
        Some(_) => {
            violations.push("regions must be an array".to_string());
            Vec::new()
        }
    };

    let Some(kind) = kind else {
        violations.extend(validation::common_violations(&name, id.as_deref(), duration));
        return Err(Error::InvalidRule {
            rule: name,
            violations,
        });
    };
    let mut rule = HolidayRule::new(name, kind);
    rule.id = id;
    rule.observed = observed;
    rule.duration = duration;
    rule.regions = regions;
    rule.active = active;

    violations.extend(validation::violations(&rule));
    if violations.is_empty() {
        Ok(rule)
    } else {
        Err(Error::InvalidRule {
            rule: rule.name,
            violations,
        })
    }
}

fn parse_payload(rule_type: RuleType, p: &Object, v: &mut Vec<String>) -> Result<Option<RuleKind>> {
    let kind = match rule_type {
        RuleType::Fixed => {
            let month = required_int(p, "month", v);
            let day = required_int(p, "day", v);
            month.zip(day).map(|(month, day)| RuleKind::Fixed { month, day })
        }
        RuleType::NthWeekday => {
            let month = required_int(p, "month", v);
            let weekday = required_int(p, "weekday", v);
            let nth = required_int(p, "nth", v);
            match (month, weekday, nth) {
                (Some(month), Some(weekday), Some(nth)) => Some(RuleKind::NthWeekday { month, weekday, nth }),
                _ => None,
            }
        }
        RuleType::Relative => {
            let relative_to = match p.get("relativeTo") {
                Some(Value::String(s)) => Some(s.clone()),
                None | Some(Value::Null) => {
                    v.push("rule.relativeTo is required".to_string());
                    None
                }
                Some(_) => {
                    v.push("rule.relativeTo must be a string".to_string());
                    None
                }
            };
            let offset_days = optional_int::<i32>(p, "offsetDays", "rule.", v).unwrap_or(0);
            relative_to.map(|relative_to| RuleKind::Relative {
                relative_to,
                offset_days,
            })
        }
        RuleType::Lunar => {
            let calendar = match p.get("calendar") {
                Some(Value::String(s)) => Some(s.parse::<LunarCalendar>()?),
                None | Some(Value::Null) => {
                    v.push("rule.calendar is required".to_string());
                    None
                }
                Some(_) => {
                    v.push("rule.calendar must be a string".to_string());
                    None
                }
            };
            let month = required_int(p, "month", v);
            let day = required_int(p, "day", v);
            match (calendar, month, day) {
                (Some(calendar), Some(month), Some(day)) => Some(RuleKind::Lunar { calendar, month, day }),
                _ => None,
            }
        }
        RuleType::EasterBased => {
            let offset_days = optional_int::<i32>(p, "offsetDays", "rule.", v).unwrap_or(0);
            let orthodox = match p.get("orthodox") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(b)) => *b,
                Some(_) => {
                    v.push("rule.orthodox must be a boolean".to_string());
                    false
                }
            };
            Some(RuleKind::EasterBased { offset_days, orthodox })
        }
        RuleType::Custom => None,
    };
    Ok(kind)
}

fn parse_observed(o: &Object, v: &mut Vec<String>) -> Result<Option<ObservedRule>> {
    let kind = match o.get("type") {
        Some(Value::String(s)) => s.parse::<ObservedType>()?,
        _ => {
            v.push("observedRule.type is required".to_string());
            return Ok(None);
        }
    };
    let mut observed = ObservedRule::new(kind);
    match o.get("weekends") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            let indices: Option<Vec<u8>> = items
                .iter()
                .map(|i| i.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect();
            match indices.map(|ix| WeekendSet::from_indices(&ix)) {
                Some(Ok(set)) => observed.weekends = set,
                Some(Err(e)) => v.push(format!("observedRule.weekends: {e}")),
                None => v.push("observedRule.weekends must contain weekday indices".to_string()),
            }
        }
        Some(_) => v.push("observedRule.weekends must be an array".to_string()),
    }
    match o.get("direction").and_then(Value::as_str) {
        None => {}
        Some("forward") => observed.direction = Direction::Forward,
        Some("backward") => observed.direction = Direction::Backward,
        Some(other) => v.push(format!("observedRule.direction '{other}' must be forward or backward")),
    }
    Ok(Some(observed))
}

fn required_int<T: TryFrom<i64>>(obj: &Object, key: &str, v: &mut Vec<String>) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            v.push(format!("rule.{key} is required"));
            None
        }
        Some(value) => int_value(value, key, "rule.", v),
    }
}

fn optional_int<T: TryFrom<i64>>(obj: &Object, key: &str, prefix: &str, v: &mut Vec<String>) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => int_value(value, key, prefix, v),
    }
}

fn int_value<T: TryFrom<i64>>(value: &Value, key: &str, prefix: &str, v: &mut Vec<String>) -> Option<T> {
    match value.as_i64().map(T::try_from) {
        Some(Ok(n)) => Some(n),
        Some(Err(_)) => {
            v.push(format!("{prefix}{key} {value} is out of range"));
            None
        }
        None => {
            v.push(format!("{prefix}{key} must be an integer"));
            None
        }
    }
}

fn optional_str(obj: &Object, key: &str, prefix: &str, v: &mut Vec<String>) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            v.push(format!("{prefix}{key} must be a string"));
            None
        }
    }
}
