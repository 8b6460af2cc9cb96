//! Client-facing rate views.
//!
//! Pure functions joining a [`RateSnapshot`] against the [`MetadataTable`].

use currency_meta::MetadataTable;
use rust_decimal::{Decimal, RoundingStrategy};

use rates_types::{
    ConversionItem, CurrencyListing, CurrencyListingItem, RateSnapshot, RateTable, RatesError,
    normalize_code,
};

/// Decimal places of every converted value.
pub const VALUE_DECIMALS: u32 = 3;

/// Rounds to three decimals, halves away from zero.
///
/// Works on the exact decimal expansion of the float, so `1.0005` (stored as
/// `1.000499999…`) rounds down while an exact `0.0625` rounds up to `0.063`.
pub fn round3(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded =
        exact.round_dp_with_strategy(VALUE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);

    // Float parsing is correctly rounded; dividing the scaled mantissa is not
    // once it passes 2^53.
    rounded.to_string().parse().unwrap_or(value)
}

/// Lists every currency of the snapshot with its metadata, ordered by code.
pub fn list_currencies(snapshot: &RateSnapshot, metadata: &MetadataTable) -> CurrencyListing {
    let data = snapshot
        .rates()
        .keys()
        .map(|code| CurrencyListingItem::from(metadata.lookup(code)))
        .collect();

    CurrencyListing {
        time_last_update_unix: snapshot.last_update_unix(),
        time_next_update_unix: snapshot.next_update_unix(),
        data,
    }
}

/// Expresses the snapshot's rates relative to `base`.
///
/// With a non-empty `wanted` list only those codes are returned; codes the
/// snapshot does not carry are dropped.
pub fn convert(
    snapshot: &RateSnapshot,
    metadata: &MetadataTable,
    base: &str,
    wanted: Option<&[String]>,
) -> Result<RateTable, RatesError> {
    let base = normalize_code(base);
    let base_rate = snapshot
        .rate(&base)
        .ok_or_else(|| RatesError::UnsupportedBase(base.clone()))?;

    let wanted: Option<Vec<String>> = wanted
        .map(|codes| codes.iter().map(|c| normalize_code(c)).collect::<Vec<_>>())
        .filter(|codes| !codes.is_empty());

    let data = snapshot
        .rates()
        .iter()
        .filter(|(code, _)| wanted.as_ref().is_none_or(|w| w.contains(*code)))
        .map(|(code, rate)| ConversionItem::new(metadata.lookup(code), round3(rate / base_rate)))
        .collect();

    Ok(RateTable {
        base,
        time_last_update_unix: snapshot.last_update_unix(),
        time_next_update_unix: snapshot.next_update_unix(),
        data,
    })
}
