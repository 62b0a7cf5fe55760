use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// History fields consumed from the raw per-product feed.
///
/// The upstream feed keys each product's flat `[offset, value]` arrays by a
/// fixed numeric index; only the indices below are tracked. Prices arrive as
/// integer cents, ranks and offer counts as plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    /// Amazon's own offer price, cents (index 0)
    AmazonPrice,
    /// Lowest marketplace new-condition price, cents (index 1)
    NewPrice,
    /// Lowest marketplace used-condition price, cents (index 2)
    UsedPrice,
    /// Sales rank within the product's category (index 3)
    SalesRank,
    /// Lightning-deal price while a deal is live, -1 otherwise (index 8)
    LightningDeal,
    /// Number of live new-condition offers (index 11)
    NewOfferCount,
    /// Buy-box landed price (price + shipping), -1 when no buy box (index 18)
    BuyBoxPrice,
}

/// Sentinel and scaling rules for one tracked field.
///
/// The raw encoding overloads `0` and `-1` with per-field meanings. Keeping
/// the rules in one table makes the overloading auditable instead of
/// scattering boolean flags at decode call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSemantics {
    /// A raw `0` is a legitimate value (e.g. zero live offers), not "no data"
    pub allow_zero: bool,
    /// A raw `-1` is a meaningful sentinel ("explicitly unavailable") that
    /// must survive decoding rather than being dropped as absent
    pub allow_negative_one: bool,
    /// Values are integer cents and scale to dollars on decode
    pub is_price: bool,
}

impl TrackedField {
    /// Every tracked field, in index order
    pub const ALL: [TrackedField; 7] = [
        TrackedField::AmazonPrice,
        TrackedField::NewPrice,
        TrackedField::UsedPrice,
        TrackedField::SalesRank,
        TrackedField::LightningDeal,
        TrackedField::NewOfferCount,
        TrackedField::BuyBoxPrice,
    ];

    /// Numeric index used by the upstream feed
    pub const fn index(&self) -> u8 {
        match self {
            TrackedField::AmazonPrice => 0,
            TrackedField::NewPrice => 1,
            TrackedField::UsedPrice => 2,
            TrackedField::SalesRank => 3,
            TrackedField::LightningDeal => 8,
            TrackedField::NewOfferCount => 11,
            TrackedField::BuyBoxPrice => 18,
        }
    }

    /// Look up a tracked field by feed index; unknown indices are not
    /// tracked and decode to `None`
    pub const fn from_index(index: u8) -> Option<TrackedField> {
        match index {
            0 => Some(TrackedField::AmazonPrice),
            1 => Some(TrackedField::NewPrice),
            2 => Some(TrackedField::UsedPrice),
            3 => Some(TrackedField::SalesRank),
            8 => Some(TrackedField::LightningDeal),
            11 => Some(TrackedField::NewOfferCount),
            18 => Some(TrackedField::BuyBoxPrice),
            _ => None,
        }
    }

    /// Default decode semantics for this field.
    ///
    /// The lightning-deal field keeps the `-1` sentinel because downstream
    /// analyzers read it as "deal inactive"; for price fields `-1` just
    /// means no offer and decodes to absent. The availability view of the
    /// buy-box field re-decodes with the sentinel retained.
    pub const fn semantics(&self) -> FieldSemantics {
        match self {
            TrackedField::AmazonPrice | TrackedField::NewPrice | TrackedField::UsedPrice => {
                FieldSemantics {
                    allow_zero: false,
                    allow_negative_one: false,
                    is_price: true,
                }
            }
            TrackedField::SalesRank => FieldSemantics {
                allow_zero: false,
                allow_negative_one: false,
                is_price: false,
            },
            TrackedField::LightningDeal => FieldSemantics {
                allow_zero: false,
                allow_negative_one: true,
                is_price: true,
            },
            TrackedField::NewOfferCount => FieldSemantics {
                allow_zero: true,
                allow_negative_one: false,
                is_price: false,
            },
            TrackedField::BuyBoxPrice => FieldSemantics {
                allow_zero: false,
                allow_negative_one: false,
                is_price: true,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedField::AmazonPrice => "amazon_price",
            TrackedField::NewPrice => "new_price",
            TrackedField::UsedPrice => "used_price",
            TrackedField::SalesRank => "sales_rank",
            TrackedField::LightningDeal => "lightning_deal",
            TrackedField::NewOfferCount => "new_offer_count",
            TrackedField::BuyBoxPrice => "buy_box_price",
        }
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The feed keys history maps by the numeric index, which JSON delivers as a
// string key ("3": [...]). Serialize/deserialize through that wire form.
impl Serialize for TrackedField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.index())
    }
}

impl<'de> Deserialize<'de> for TrackedField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexVisitor;

        impl Visitor<'_> for IndexVisitor {
            type Value = TrackedField;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a tracked field index (0, 1, 2, 3, 8, 11 or 18)")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(TrackedField::from_index)
                    .ok_or_else(|| E::custom(format!("untracked field index {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse::<u8>()
                    .ok()
                    .and_then(TrackedField::from_index)
                    .ok_or_else(|| E::custom(format!("untracked field index {v:?}")))
            }
        }

        deserializer.deserialize_any(IndexVisitor)
    }
}
