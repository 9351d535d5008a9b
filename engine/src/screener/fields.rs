// Registered screener range fields and their input units

/// Unit a field is typed in on the screener form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUnit {
    /// Sent as typed.
    Base,
    /// Typed in millions, sent in base units.
    Millions,
}

pub const MILLION: f64 = 1_000_000.0;

impl FieldUnit {
    pub fn to_base(self, value: f64) -> f64 {
        match self {
            FieldUnit::Base => value,
            FieldUnit::Millions => value * MILLION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    Price,
    ChangePct,
    MarketCap,
    PeRatio,
    DivYield,
    Volume,
}

impl RangeField {
    pub const ALL: [RangeField; 6] = [
        RangeField::Price,
        RangeField::ChangePct,
        RangeField::MarketCap,
        RangeField::PeRatio,
        RangeField::DivYield,
        RangeField::Volume,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RangeField::Price => "price",
            RangeField::ChangePct => "change_pct",
            RangeField::MarketCap => "market_cap",
            RangeField::PeRatio => "pe_ratio",
            RangeField::DivYield => "div_yield",
            RangeField::Volume => "volume",
        }
    }

    pub fn unit(self) -> FieldUnit {
        match self {
            RangeField::MarketCap => FieldUnit::Millions,
            _ => FieldUnit::Base,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}
