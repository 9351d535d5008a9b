// Turns screener form input into the payload sent to `/screener/run`
use serde::{Deserialize, Serialize};
use shared::models::{RangeFilter, RawNumber, RawRange};
use shared::utils::pkr_format;
use tracing::debug;

use super::fields::RangeField;
use super::sort::SortKey;

pub const DEFAULT_LIMIT: u32 = 50;
pub const DEFAULT_MAX_LIMIT: u32 = 500;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenerDefaults {
    pub default_sort: SortKey,
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for ScreenerDefaults {
    fn default() -> Self {
        ScreenerDefaults {
            default_sort: SortKey::default(),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Screener form state as the UI holds it: every bound is optional text or a
/// number, market cap is typed in millions and "" means "All".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawScreenerFilters {
    pub price: RawRange,
    pub change_pct: RawRange,
    pub market_cap: RawRange,
    pub pe_ratio: RawRange,
    pub div_yield: RawRange,
    pub volume: RawRange,
    pub sector_code: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<RawNumber>,
}

impl RawScreenerFilters {
    pub fn range(&self, field: RangeField) -> &RawRange {
        match field {
            RangeField::Price => &self.price,
            RangeField::ChangePct => &self.change_pct,
            RangeField::MarketCap => &self.market_cap,
            RangeField::PeRatio => &self.pe_ratio,
            RangeField::DivYield => &self.div_yield,
            RangeField::Volume => &self.volume,
        }
    }

    pub fn range_mut(&mut self, field: RangeField) -> &mut RawRange {
        match field {
            RangeField::Price => &mut self.price,
            RangeField::ChangePct => &mut self.change_pct,
            RangeField::MarketCap => &mut self.market_cap,
            RangeField::PeRatio => &mut self.pe_ratio,
            RangeField::DivYield => &mut self.div_yield,
            RangeField::Volume => &mut self.volume,
        }
    }
}

/// Canonical screener query: base units only, unapplied filters absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenerPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub div_yield: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_code: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for ScreenerPayload {
    fn default() -> Self {
        ScreenerPayload {
            price: None,
            change_pct: None,
            market_cap: None,
            pe_ratio: None,
            div_yield: None,
            volume: None,
            sector_code: None,
            sort: SortKey::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ScreenerPayload {
    fn range_slot(&self, field: RangeField) -> &Option<RangeFilter> {
        match field {
            RangeField::Price => &self.price,
            RangeField::ChangePct => &self.change_pct,
            RangeField::MarketCap => &self.market_cap,
            RangeField::PeRatio => &self.pe_ratio,
            RangeField::DivYield => &self.div_yield,
            RangeField::Volume => &self.volume,
        }
    }

    fn range_slot_mut(&mut self, field: RangeField) -> &mut Option<RangeFilter> {
        match field {
            RangeField::Price => &mut self.price,
            RangeField::ChangePct => &mut self.change_pct,
            RangeField::MarketCap => &mut self.market_cap,
            RangeField::PeRatio => &mut self.pe_ratio,
            RangeField::DivYield => &mut self.div_yield,
            RangeField::Volume => &mut self.volume,
        }
    }
}

/// Anything that can be turned into a canonical `ScreenerPayload`.
///
/// Raw form input gets unit conversion; an existing payload is already in
/// base units and is only re-canonicalized, so normalizing twice is a no-op.
pub trait Normalize {
    fn normalize_with(&self, defaults: &ScreenerDefaults) -> ScreenerPayload;

    fn normalize(&self) -> ScreenerPayload {
        self.normalize_with(&ScreenerDefaults::default())
    }
}

impl Normalize for RawScreenerFilters {
    fn normalize_with(&self, defaults: &ScreenerDefaults) -> ScreenerPayload {
        let mut payload = ScreenerPayload {
            sector_code: non_empty(self.sector_code.as_deref()),
            sort: parse_sort(self.sort.as_deref(), defaults),
            limit: parse_limit(self.limit.as_ref(), defaults),
            ..ScreenerPayload::default()
        };
        for field in RangeField::ALL {
            *payload.range_slot_mut(field) = normalize_range(field, self.range(field));
        }
        payload
    }
}

impl Normalize for ScreenerPayload {
    fn normalize_with(&self, defaults: &ScreenerDefaults) -> ScreenerPayload {
        let mut payload = ScreenerPayload {
            sector_code: non_empty(self.sector_code.as_deref()),
            sort: self.sort,
            limit: clamp_limit(self.limit, defaults),
            ..ScreenerPayload::default()
        };
        for field in RangeField::ALL {
            let cleaned = self.range_slot(field).map(|range| RangeFilter {
                min: range.min.filter(|v| v.is_finite()),
                max: range.max.filter(|v| v.is_finite()),
            });
            *payload.range_slot_mut(field) = cleaned.filter(|range| !range.is_empty());
        }
        payload
    }
}

pub fn normalize(raw: &RawScreenerFilters) -> ScreenerPayload {
    raw.normalize()
}

pub fn normalize_with(raw: &RawScreenerFilters, defaults: &ScreenerDefaults) -> ScreenerPayload {
    raw.normalize_with(defaults)
}

/// Each bound is parsed on its own; the field is dropped only when neither
/// bound survives.
fn normalize_range(field: RangeField, raw: &RawRange) -> Option<RangeFilter> {
    let range = RangeFilter {
        min: parse_bound(field, "min", raw.min.as_ref()).and_then(|v| to_base_finite(field, v)),
        max: parse_bound(field, "max", raw.max.as_ref()).and_then(|v| to_base_finite(field, v)),
    };
    (!range.is_empty()).then_some(range)
}

// Unit conversion can overflow a huge but finite bound.
fn to_base_finite(field: RangeField, value: f64) -> Option<f64> {
    let converted = field.unit().to_base(value);
    if !converted.is_finite() {
        debug!(field = field.name(), value, "Dropping screener bound that overflows base units");
    }
    Some(converted).filter(|v| v.is_finite())
}

fn parse_bound(field: RangeField, bound: &str, value: Option<&RawNumber>) -> Option<f64> {
    match value? {
        RawNumber::Number(n) => Some(*n).filter(|v| v.is_finite()),
        RawNumber::Text(text) => {
            let parsed = pkr_format::parse_decimal(text);
            if parsed.is_none() && !text.trim().is_empty() {
                debug!(field = field.name(), bound, value = %text, "Dropping non-numeric screener bound");
            }
            parsed
        }
    }
}

fn parse_raw_number(value: &RawNumber) -> Option<f64> {
    match value {
        RawNumber::Number(n) => Some(*n).filter(|v| v.is_finite()),
        RawNumber::Text(text) => pkr_format::parse_decimal(text),
    }
}

fn parse_sort(sort: Option<&str>, defaults: &ScreenerDefaults) -> SortKey {
    match sort.map(str::trim).filter(|s| !s.is_empty()) {
        None => defaults.default_sort,
        Some(s) => s.parse().unwrap_or_else(|err| {
            debug!(error = %err, "Falling back to default screener sort");
            defaults.default_sort
        }),
    }
}

fn parse_limit(limit: Option<&RawNumber>, defaults: &ScreenerDefaults) -> u32 {
    let parsed = limit
        .and_then(parse_raw_number)
        .filter(|v| *v >= 1.0)
        // Float-to-int casts saturate.
        .map(|v| v.trunc() as u32)
        .unwrap_or(defaults.default_limit);
    clamp_limit(parsed, defaults)
}

fn clamp_limit(limit: u32, defaults: &ScreenerDefaults) -> u32 {
    if limit == 0 {
        defaults.default_limit.min(defaults.max_limit)
    } else {
        limit.min(defaults.max_limit)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::sort::SortDirection;
    use serde_json::json;

    fn raw_from(value: serde_json::Value) -> RawScreenerFilters {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_form_example_payload() {
        let raw = raw_from(json!({
            "price": { "min": "100", "max": "" },
            "market_cap": { "min": "50", "max": "" },
            "sector_code": ""
        }));
        let payload = normalize(&raw);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "price": { "min": 100.0 },
                "market_cap": { "min": 50_000_000.0 },
                "sort": "change_pct_desc",
                "limit": 50
            })
        );
    }

    #[test]
    fn test_empty_form_only_has_sort_and_limit() {
        let payload = normalize(&RawScreenerFilters::default());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "sort": "change_pct_desc", "limit": 50 })
        );
    }

    #[test]
    fn test_invalid_bound_dropped_individually() {
        let raw = raw_from(json!({ "pe_ratio": { "min": "abc", "max": "25" } }));
        let payload = normalize(&raw);
        assert_eq!(payload.pe_ratio, Some(RangeFilter { min: None, max: Some(25.0) }));
    }

    #[test]
    fn test_field_dropped_when_both_bounds_invalid() {
        let raw = raw_from(json!({ "div_yield": { "min": "x", "max": "  " } }));
        assert_eq!(normalize(&raw).div_yield, None);
    }

    #[test]
    fn test_zero_is_a_real_bound() {
        let raw = raw_from(json!({ "change_pct": { "min": 0, "max": "0" } }));
        assert_eq!(normalize(&raw).change_pct, Some(RangeFilter { min: Some(0.0), max: Some(0.0) }));
    }

    #[test]
    fn test_numeric_and_grouped_text_bounds() {
        let raw = raw_from(json!({
            "volume": { "min": 1500, "max": "2,000,000" },
            "market_cap": { "max": 1.5 }
        }));
        let payload = normalize(&raw);
        assert_eq!(payload.volume, Some(RangeFilter { min: Some(1500.0), max: Some(2_000_000.0) }));
        assert_eq!(payload.market_cap, Some(RangeFilter { min: None, max: Some(1_500_000.0) }));
    }

    #[test]
    fn test_sector_kept_when_set() {
        let raw = raw_from(json!({ "sector_code": " 0807 " }));
        assert_eq!(normalize(&raw).sector_code.as_deref(), Some("0807"));
    }

    #[test]
    fn test_sort_and_limit() {
        let raw = raw_from(json!({ "sort": "market_cap_desc", "limit": "20" }));
        let payload = normalize(&raw);
        assert_eq!(payload.sort, SortKey::new(RangeField::MarketCap, SortDirection::Desc));
        assert_eq!(payload.limit, 20);

        let raw = raw_from(json!({ "sort": "bogus", "limit": "-3" }));
        let payload = normalize(&raw);
        assert_eq!(payload.sort, SortKey::default());
        assert_eq!(payload.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_capped_by_defaults() {
        let raw = raw_from(json!({ "limit": 10_000 }));
        assert_eq!(normalize(&raw).limit, DEFAULT_MAX_LIMIT);

        let defaults = ScreenerDefaults {
            default_sort: SortKey::new(RangeField::Price, SortDirection::Asc),
            default_limit: 25,
            max_limit: 100,
        };
        let payload = normalize_with(&RawScreenerFilters::default(), &defaults);
        assert_eq!(payload.sort.to_string(), "price_asc");
        assert_eq!(payload.limit, 25);
    }

    #[test]
    fn test_normalizing_a_payload_is_idempotent() {
        let raw = raw_from(json!({
            "price": { "min": "100", "max": "" },
            "market_cap": { "min": "50" },
            "sector_code": "",
            "sort": "volume_desc"
        }));
        let once = normalize(&raw);
        let twice = once.normalize();
        assert_eq!(once, twice);
        assert_eq!(twice.market_cap, Some(RangeFilter { min: Some(50_000_000.0), max: None }));

        // Same guarantee after a JSON round trip through the wire shape.
        let decoded: ScreenerPayload = serde_json::from_value(serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(decoded.normalize(), once);
    }

    #[test]
    fn test_overflowing_market_cap_bound_is_dropped() {
        let raw = raw_from(json!({ "market_cap": { "min": 1e305, "max": "200" } }));
        let payload = normalize(&raw);
        assert_eq!(payload.market_cap, Some(RangeFilter { min: None, max: Some(200_000_000.0) }));
        assert_eq!(payload.normalize(), payload);

        let raw = raw_from(json!({ "market_cap": { "min": 1e305 } }));
        let payload = normalize(&raw);
        assert_eq!(payload.market_cap, None);
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({ "sort": "change_pct_desc", "limit": 50 }));
    }

    #[test]
    fn test_payload_normalize_drops_empty_ranges() {
        let payload = ScreenerPayload {
            price: Some(RangeFilter::default()),
            sector_code: Some(String::new()),
            ..ScreenerPayload::default()
        };
        let cleaned = payload.normalize();
        assert_eq!(cleaned.price, None);
        assert_eq!(cleaned.sector_code, None);
    }

    #[test]
    fn test_raw_range_setter() {
        let mut raw = RawScreenerFilters::default();
        *raw.range_mut(RangeField::PeRatio) = RawRange::new(RawNumber::from("5"), None);
        assert_eq!(normalize(&raw).pe_ratio, Some(RangeFilter { min: Some(5.0), max: None }));
    }
}
