//! Bookable workspace facility (meeting room, desk pool, court, ...).
//!
//! The record nests three sub-objects: the fee, the payment policy and the
//! daily slot configuration. In drafts and filters they are addressed with
//! dotted keys (`fee.amount`, `slot.opens`, ...).

use crate::core::validation::{FieldSpec, Rule, validate_field};
use crate::errors::{AppError, AppResult};
use crate::models::record::{
    Draft, Editable, Record, RecordId, default_label, parse_flag, parse_value, text,
};
use crate::utils::formatting::{format_amount, yes_no};
use crate::utils::time::{self, format_time, minutes_between};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeUnit {
    Hour,
    Slot,
    Day,
}

impl FeeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeUnit::Hour => "hour",
            FeeUnit::Slot => "slot",
            FeeUnit::Day => "day",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "hour" => Some(FeeUnit::Hour),
            "slot" => Some(FeeUnit::Slot),
            "day" => Some(FeeUnit::Day),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Online,
    Offline,
    Both,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Online => "online",
            PaymentMode::Offline => "offline",
            PaymentMode::Both => "both",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "online" => Some(PaymentMode::Online),
            "offline" => Some(PaymentMode::Offline),
            "both" => Some(PaymentMode::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: f64,
    pub unit: FeeUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub mode: PaymentMode,
    /// Share of the fee paid when booking, 0..=100.
    pub advance_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
    pub minutes: u32,
}

impl SlotConfig {
    /// Number of whole slots between opening and closing time.
    pub fn slots_per_day(&self) -> u32 {
        if self.minutes == 0 {
            return 0;
        }
        let span = minutes_between(self.opens, self.closes);
        if span <= 0 {
            0
        } else {
            (span as u32) / self.minutes
        }
    }

    /// Start times of every slot of the day.
    pub fn slot_starts(&self) -> Vec<NaiveTime> {
        let step = chrono::Duration::minutes(i64::from(self.minutes));
        (0..self.slots_per_day())
            .map(|i| self.opens + step * i as i32)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub fee: Fee,
    pub payment: Payment,
    pub slot: SlotConfig,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "name",
        "Name",
        &[Rule::Required, Rule::MinLen(3), Rule::MaxLen(60)],
    ),
    FieldSpec::new("location", "Location", &[Rule::Required, Rule::MaxLen(80)]),
    FieldSpec::new(
        "capacity",
        "Capacity",
        &[
            Rule::Required,
            Rule::Unsigned,
            Rule::Range {
                min: 1.0,
                max: 10_000.0,
            },
        ],
    ),
    FieldSpec::new(
        "fee.amount",
        "Fee amount",
        &[
            Rule::Required,
            Rule::Numeric,
            Rule::Range {
                min: 0.0,
                max: 1.0e7,
            },
        ],
    ),
    FieldSpec::new(
        "fee.unit",
        "Fee unit",
        &[Rule::Required, Rule::OneOf(&["hour", "slot", "day"])],
    ),
    FieldSpec::new(
        "payment.mode",
        "Payment mode",
        &[Rule::Required, Rule::OneOf(&["online", "offline", "both"])],
    ),
    FieldSpec::new(
        "payment.advance_percent",
        "Advance percent",
        &[
            Rule::Required,
            Rule::Unsigned,
            Rule::Range {
                min: 0.0,
                max: 100.0,
            },
        ],
    ),
    FieldSpec::new("slot.opens", "Opening time", &[Rule::Required, Rule::Time]),
    FieldSpec::new("slot.closes", "Closing time", &[Rule::Required, Rule::Time]),
    FieldSpec::new(
        "slot.minutes",
        "Slot length",
        &[
            Rule::Required,
            Rule::Unsigned,
            Rule::Range {
                min: 5.0,
                max: 1440.0,
            },
        ],
    ),
    FieldSpec::new("active", "Active", &[Rule::Bool]),
];

impl Record for Facility {
    const KIND: &'static str = "facility";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "location",
            "capacity",
            "fee.amount",
            "fee.unit",
            "payment.mode",
            "payment.advance_percent",
            "slot.opens",
            "slot.closes",
            "slot.minutes",
            "active",
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        let v = match name {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "location" => self.location.clone(),
            "capacity" => self.capacity.to_string(),
            "fee.amount" => format_amount(self.fee.amount),
            "fee.unit" => self.fee.unit.as_str().to_string(),
            "payment.mode" => self.payment.mode.as_str().to_string(),
            "payment.advance_percent" => self.payment.advance_percent.to_string(),
            "slot.opens" => format_time(&self.slot.opens),
            "slot.closes" => format_time(&self.slot.closes),
            "slot.minutes" => self.slot.minutes.to_string(),
            "active" => yes_no(self.active),
            _ => return None,
        };
        Some(v)
    }

    fn label(name: &str) -> String {
        match name {
            "payment.advance_percent" => "Advance %".into(),
            "slot.minutes" => "Slot min".into(),
            other => default_label(other),
        }
    }
}

fn parse_time_field(draft: &Draft, key: &str) -> AppResult<NaiveTime> {
    let raw = text(draft, key);
    time::parse_time(&raw).ok_or(AppError::InvalidField {
        field: key.to_string(),
        value: raw,
    })
}

fn invalid(key: &str, draft: &Draft) -> AppError {
    AppError::InvalidField {
        field: key.to_string(),
        value: text(draft, key),
    }
}

impl Editable for Facility {
    fn form_fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_draft(draft: &Draft, base: Option<&Self>) -> AppResult<Self> {
        let unit =
            FeeUnit::from_code(&text(draft, "fee.unit")).ok_or_else(|| invalid("fee.unit", draft))?;
        let mode = PaymentMode::from_code(&text(draft, "payment.mode"))
            .ok_or_else(|| invalid("payment.mode", draft))?;

        Ok(Self {
            id: base.map(|b| b.id).unwrap_or_default(),
            name: text(draft, "name"),
            location: text(draft, "location"),
            capacity: parse_value(draft, "capacity")?,
            fee: Fee {
                amount: parse_value(draft, "fee.amount")?,
                unit,
            },
            payment: Payment {
                mode,
                advance_percent: parse_value(draft, "payment.advance_percent")?,
            },
            slot: SlotConfig {
                opens: parse_time_field(draft, "slot.opens")?,
                closes: parse_time_field(draft, "slot.closes")?,
                minutes: parse_value(draft, "slot.minutes")?,
            },
            active: parse_flag(draft, "active", true)?,
        })
    }
}

/// Partial update merged into a stored facility; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
    pub fee_amount: Option<f64>,
    pub fee_unit: Option<FeeUnit>,
    pub payment_mode: Option<PaymentMode>,
    pub advance_percent: Option<u8>,
    pub opens: Option<NaiveTime>,
    pub closes: Option<NaiveTime>,
    pub slot_minutes: Option<u32>,
    pub active: Option<bool>,
}

impl FacilityPatch {
    /// Patch that overwrites every field with the values of `f`.
    pub fn full(f: &Facility) -> Self {
        Self {
            name: Some(f.name.clone()),
            location: Some(f.location.clone()),
            capacity: Some(f.capacity),
            fee_amount: Some(f.fee.amount),
            fee_unit: Some(f.fee.unit),
            payment_mode: Some(f.payment.mode),
            advance_percent: Some(f.payment.advance_percent),
            opens: Some(f.slot.opens),
            closes: Some(f.slot.closes),
            slot_minutes: Some(f.slot.minutes),
            active: Some(f.active),
        }
    }

    /// Single-field patch from a draft key and raw text, validated with the
    /// same rules as the facility form.
    pub fn from_field(field: &str, value: &str) -> AppResult<Self> {
        let spec = FIELDS
            .iter()
            .find(|s| s.name == field)
            .ok_or_else(|| AppError::UnknownField {
                kind: Facility::KIND,
                field: field.to_string(),
            })?;

        let value = value.trim();
        if let Some(msg) = validate_field(spec, value) {
            let mut errors = crate::core::validation::FieldErrors::new();
            errors.insert(field, msg);
            return Err(AppError::Validation(errors));
        }

        let mut draft = Draft::new();
        draft.insert(field.to_string(), value.to_string());

        let mut patch = Self::default();
        match field {
            "name" => patch.name = Some(value.to_string()),
            "location" => patch.location = Some(value.to_string()),
            "capacity" => patch.capacity = Some(parse_value(&draft, field)?),
            "fee.amount" => patch.fee_amount = Some(parse_value(&draft, field)?),
            "fee.unit" => patch.fee_unit = FeeUnit::from_code(value),
            "payment.mode" => patch.payment_mode = PaymentMode::from_code(value),
            "payment.advance_percent" => patch.advance_percent = Some(parse_value(&draft, field)?),
            "slot.opens" => patch.opens = Some(parse_time_field(&draft, field)?),
            "slot.closes" => patch.closes = Some(parse_time_field(&draft, field)?),
            "slot.minutes" => patch.slot_minutes = Some(parse_value(&draft, field)?),
            "active" => patch.active = Some(parse_flag(&draft, field, true)?),
            _ => {}
        }
        Ok(patch)
    }

    pub fn apply(&self, f: &mut Facility) {
        if let Some(v) = &self.name {
            f.name = v.clone();
        }
        if let Some(v) = &self.location {
            f.location = v.clone();
        }
        if let Some(v) = self.capacity {
            f.capacity = v;
        }
        if let Some(v) = self.fee_amount {
            f.fee.amount = v;
        }
        if let Some(v) = self.fee_unit {
            f.fee.unit = v;
        }
        if let Some(v) = self.payment_mode {
            f.payment.mode = v;
        }
        if let Some(v) = self.advance_percent {
            f.payment.advance_percent = v;
        }
        if let Some(v) = self.opens {
            f.slot.opens = v;
        }
        if let Some(v) = self.closes {
            f.slot.closes = v;
        }
        if let Some(v) = self.slot_minutes {
            f.slot.minutes = v;
        }
        if let Some(v) = self.active {
            f.active = v;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample(name: &str) -> Facility {
        Facility {
            id: 0,
            name: name.to_string(),
            location: "Floor 2".to_string(),
            capacity: 8,
            fee: Fee {
                amount: 25.0,
                unit: FeeUnit::Hour,
            },
            payment: Payment {
                mode: PaymentMode::Online,
                advance_percent: 50,
            },
            slot: SlotConfig {
                opens: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                closes: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                minutes: 45,
            },
            active: true,
        }
    }

    #[test]
    fn slots_per_day_counts_whole_slots() {
        let f = sample("Room A");
        assert_eq!(f.slot.slots_per_day(), 4);
        let starts: Vec<String> = f.slot.slot_starts().iter().map(format_time).collect();
        assert_eq!(starts, ["09:00", "09:45", "10:30", "11:15"]);
    }

    #[test]
    fn closing_before_opening_yields_no_slots() {
        let mut f = sample("Room A");
        f.slot.closes = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(f.slot.slots_per_day(), 0);
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut f = sample("Room A");
        let patch = FacilityPatch::from_field("slot.opens", "08:00").unwrap();
        patch.apply(&mut f);
        assert_eq!(format_time(&f.slot.opens), "08:00");
        assert_eq!(f.name, "Room A");
        assert_eq!(f.capacity, 8);
    }

    #[test]
    fn patch_rejects_invalid_value() {
        let err = FacilityPatch::from_field("payment.advance_percent", "150").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = FacilityPatch::from_field("colour", "red").unwrap_err();
        assert!(matches!(err, AppError::UnknownField { .. }));
    }

    #[test]
    fn patch_rejects_signed_counts() {
        for (field, value) in [("payment.advance_percent", "-0"), ("capacity", "+4")] {
            let err = FacilityPatch::from_field(field, value).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref e) if e.get(field).is_some()));
        }
    }

    #[test]
    fn nested_fields_are_addressed_with_dotted_keys() {
        let f = sample("Room A");
        assert_eq!(f.field("fee.unit").as_deref(), Some("hour"));
        assert_eq!(f.field("slot.closes").as_deref(), Some("12:00"));
        assert_eq!(f.field("fee"), None);
    }
}
