use crate::valuation::ValuationRequest;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_requests<R: Read>(reader: R) -> Result<Vec<ValuationRequest>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut requests = Vec::new();

    for record in csv_reader.deserialize::<ListingRow>() {
        let row = record?;
        requests.push(row.into_request());
    }

    Ok(requests)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(
        rename = "Base Price",
        alias = "base_price",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    base_price: Option<String>,
    #[serde(rename = "Make", alias = "make", default)]
    make: String,
    #[serde(rename = "Model", alias = "model", default)]
    model: String,
    #[serde(
        rename = "Trim",
        alias = "trim",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    trim: Option<String>,
    #[serde(
        rename = "Mileage",
        alias = "mileage",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    mileage: Option<String>,
    #[serde(
        rename = "Features",
        alias = "features",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    features: Option<String>,
    #[serde(
        rename = "Target Profit",
        alias = "target_profit",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    target_profit: Option<String>,
}

impl ListingRow {
    fn into_request(self) -> ValuationRequest {
        let features = self
            .features
            .as_deref()
            .map(split_features)
            .unwrap_or_default();

        ValuationRequest {
            base_price: self.base_price.as_deref().and_then(parse_amount),
            make: self.make,
            model: self.model,
            trim: self.trim,
            mileage: self
                .mileage
                .as_deref()
                .and_then(parse_amount)
                .map(|value| value.round() as i64),
            features,
            target_profit: self.target_profit.as_deref().and_then(parse_amount),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_features(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse listing-style amounts such as `$15,000` or `160,000`.
fn parse_amount(value: &str) -> Option<f64> {
    let cleaned = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_' | ' '))
        .collect::<String>();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_currency_formatting() {
        assert_eq!(parse_amount("$15,000"), Some(15_000.0));
        assert_eq!(parse_amount(" 160,000 "), Some(160_000.0));
        assert_eq!(parse_amount("-100"), Some(-100.0));
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("$"), None);
    }

    #[test]
    fn rows_map_to_requests_with_optional_cells() {
        let csv = "Base Price,Make,Model,Trim,Mileage,Features,Target Profit\n\
$15000,Chevrolet,Malibu,LTZ,\"160,000\",leather seats; sunroof,\n\
20000,Toyota,Camry,,,,2500\n";

        let requests = parse_requests(csv.as_bytes()).expect("csv parses");
        assert_eq!(requests.len(), 2);

        let malibu = &requests[0];
        assert_eq!(malibu.base_price, Some(15_000.0));
        assert_eq!(malibu.trim.as_deref(), Some("LTZ"));
        assert_eq!(malibu.mileage, Some(160_000));
        assert_eq!(malibu.features, vec!["leather seats", "sunroof"]);
        assert_eq!(malibu.target_profit, None);

        let camry = &requests[1];
        assert!(camry.trim.is_none());
        assert!(camry.mileage.is_none());
        assert!(camry.features.is_empty());
        assert_eq!(camry.target_profit, Some(2_500.0));
    }

    #[test]
    fn snake_case_headers_are_accepted() {
        let csv = "base_price,make,model\n9000,Kia,Soul\n";
        let requests = parse_requests(csv.as_bytes()).expect("csv parses");
        assert_eq!(requests[0].make, "Kia");
        assert_eq!(requests[0].base_price, Some(9_000.0));
    }
}
