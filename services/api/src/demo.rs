use crate::infra::configured_engine;
use autovalue::error::AppError;
use autovalue::import::{BatchImporter, BatchRowResult, BatchValuation};
use autovalue::valuation::{ValuationEngine, ValuationReport, ValuationRequest};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ValuateArgs {
    /// Base market price from the upstream pricing source
    #[arg(long)]
    pub(crate) base_price: f64,
    #[arg(long)]
    pub(crate) make: String,
    #[arg(long)]
    pub(crate) model: String,
    /// Free-text trim designation (e.g. "LTZ", "XLE Premium")
    #[arg(long)]
    pub(crate) trim: Option<String>,
    /// Odometer reading in miles
    #[arg(long)]
    pub(crate) mileage: Option<i64>,
    /// Listing feature tag; repeat for each feature
    #[arg(long = "feature")]
    pub(crate) features: Vec<String>,
    /// Override the configured default target profit
    #[arg(long)]
    pub(crate) target_profit: Option<f64>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ValuateArgs {
    fn request(&self) -> ValuationRequest {
        ValuationRequest {
            base_price: Some(self.base_price),
            make: self.make.clone(),
            model: self.model.clone(),
            trim: self.trim.clone(),
            mileage: self.mileage,
            features: self.features.clone(),
            target_profit: self.target_profit,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Listing export with Base Price, Make, Model, Trim, Mileage, Features and Target Profit columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit the batch as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the demo reports as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct BatchOutput<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    valued: usize,
    rejected: usize,
    #[serde(flatten)]
    batch: &'a BatchValuation,
}

#[derive(Debug, Serialize)]
struct DemoScenarioOutput {
    scenario: &'static str,
    request: ValuationRequest,
    report: ValuationReport,
}

pub(crate) fn run_valuate(args: ValuateArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let request = args.request();
    let report = engine.valuate(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&request, &report));
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let batch = BatchImporter::valuate_path(&engine, &args.csv)?;

    if args.json {
        let output = BatchOutput {
            generated_at: Utc::now(),
            source: args.csv.display().to_string(),
            valued: batch.valued_count(),
            rejected: batch.rejected_count(),
            batch: &batch,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_batch(&batch));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    // Reference vehicles use the built-in defaults so output is reproducible.
    let engine = ValuationEngine::default();
    let outputs = demo_scenarios()
        .into_iter()
        .map(|(scenario, request)| {
            let report = engine.valuate(&request)?;
            Ok(DemoScenarioOutput {
                scenario,
                request,
                report,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    println!("Vehicle valuation demo");
    for output in &outputs {
        println!("\n{}", output.scenario);
        print!("{}", render_report(&output.request, &output.report));
    }
    Ok(())
}

pub(crate) fn demo_scenarios() -> Vec<(&'static str, ValuationRequest)> {
    vec![
        (
            "Scenario A: Toyota Corolla LE, 40,000 mi",
            ValuationRequest {
                base_price: Some(20_000.0),
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                trim: Some("LE".to_string()),
                mileage: Some(40_000),
                ..ValuationRequest::default()
            },
        ),
        (
            "Scenario B: Chevrolet Malibu LTZ, 160,000 mi, leather and sunroof",
            ValuationRequest {
                base_price: Some(15_000.0),
                make: "Chevrolet".to_string(),
                model: "Malibu".to_string(),
                trim: Some("LTZ".to_string()),
                mileage: Some(160_000),
                features: vec!["leather seats".to_string(), "sunroof".to_string()],
                ..ValuationRequest::default()
            },
        ),
        (
            "Scenario C: unrecognized make with a backup camera",
            ValuationRequest {
                base_price: Some(11_500.0),
                make: "Zyntho".to_string(),
                model: "Aurora".to_string(),
                features: vec!["backup camera".to_string()],
                ..ValuationRequest::default()
            },
        ),
    ]
}

fn render_report(request: &ValuationRequest, report: &ValuationReport) -> String {
    let breakdown = &report.breakdown;
    let mut out = String::new();

    writeln!(
        &mut out,
        "{} {} {}",
        request.make,
        request.model,
        request.trim.as_deref().unwrap_or("(no trim)")
    )
    .expect("write vehicle");
    writeln!(&mut out, "  {}", breakdown.summary()).expect("write summary");
    writeln!(
        &mut out,
        "  Net adjustment: {:+.2}",
        breakdown.total_adjustment()
    )
    .expect("write net adjustment");
    let trim_keyword = breakdown
        .trim_factor
        .matched_keyword
        .as_deref()
        .map(|keyword| format!(" [{keyword}]"))
        .unwrap_or_default();
    writeln!(
        &mut out,
        "  Trim: {} {:+.1}%{}",
        breakdown.trim_tier.label(),
        breakdown.trim_factor.percent * 100.0,
        trim_keyword
    )
    .expect("write trim");
    writeln!(&mut out, "  Mileage: {}", breakdown.mileage_label).expect("write mileage");

    if breakdown.feature_factors.is_empty() {
        writeln!(&mut out, "  Features: none recognized").expect("write features");
    } else {
        let capped = if breakdown.feature_bonus_capped {
            " (capped)"
        } else {
            ""
        };
        writeln!(
            &mut out,
            "  Features: {:+.1}%{}",
            breakdown.feature_bonus * 100.0,
            capped
        )
        .expect("write features");
        for factor in &breakdown.feature_factors {
            writeln!(
                &mut out,
                "    - {}: {:+.1}%",
                factor.category,
                factor.percent * 100.0
            )
            .expect("write feature factor");
        }
    }

    writeln!(
        &mut out,
        "  Strategies (target profit ${:.2}):",
        report.target_profit
    )
    .expect("write strategy header");
    for tier in &report.strategies {
        writeln!(
            &mut out,
            "    - {:<12} ${:>10.2} | ~{} days | profit ${:.2}",
            tier.name.label(),
            tier.price,
            tier.estimated_days_to_sell,
            tier.profit_potential
        )
        .expect("write strategy");
    }
    out
}

fn render_batch(batch: &BatchValuation) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "Valued {} of {} listings ({} rejected)",
        batch.valued_count(),
        batch.rows.len(),
        batch.rejected_count()
    )
    .expect("write batch header");
    for row in &batch.rows {
        match &row.result {
            BatchRowResult::Valued { report } => writeln!(
                &mut out,
                "  #{} {} {}: ${:.2}",
                row.row, row.make, row.model, report.breakdown.adjusted_price
            )
            .expect("write valued row"),
            BatchRowResult::Rejected { error } => writeln!(
                &mut out,
                "  #{} {} {}: rejected ({})",
                row.row, row.make, row.model, error
            )
            .expect("write rejected row"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use autovalue::valuation::StrategyKind;

    #[test]
    fn demo_scenarios_all_value_successfully() {
        let engine = ValuationEngine::default();
        let prices = demo_scenarios()
            .iter()
            .map(|(_, request)| {
                engine
                    .valuate(request)
                    .expect("demo scenario values")
                    .breakdown
                    .adjusted_price
            })
            .collect::<Vec<_>>();

        assert_eq!(prices.len(), 3);
        assert!((prices[0] - 20_000.0).abs() < 1e-6);
        assert!((prices[1] - 15_000.0 * 1.125 * 0.885 * 1.06).abs() < 1e-6);
        assert!((prices[2] - 11_730.0).abs() < 1e-6);
    }

    #[test]
    fn rendered_report_lists_every_strategy() {
        let (_, request) = demo_scenarios().remove(1);
        let report = ValuationEngine::default()
            .valuate(&request)
            .expect("scenario values");

        let text = render_report(&request, &report);

        assert!(text.starts_with("Chevrolet Malibu LTZ"));
        assert!(text.contains("Tier B: 150,000-179,999 mi (-11.5%)"));
        assert!(text.contains("[ltz]"));
        assert!(text.contains("Net adjustment: +830.44"));
        assert!(text.contains("Features: +6.0%"));
        assert!(text.contains("    - roof: +3.0%"));
        for kind in StrategyKind::ALL {
            assert!(text.contains(kind.label()), "missing {}", kind.label());
        }
    }

    #[test]
    fn rendered_batch_marks_rejected_rows() {
        let csv = "Base Price,Make,Model\n18000,Honda,Civic\n,Ford,Focus\n";
        let batch = BatchImporter::valuate_reader(&ValuationEngine::default(), csv.as_bytes())
            .expect("batch runs");

        let text = render_batch(&batch);

        assert!(text.starts_with("Valued 1 of 2 listings (1 rejected)"));
        assert!(text.contains("#1 Honda Civic: $18000.00"));
        assert!(text.contains("#2 Ford Focus: rejected (base price is required)"));
    }

    #[test]
    fn valuate_args_build_request() {
        let args = ValuateArgs {
            base_price: 9_000.0,
            make: "Kia".to_string(),
            model: "Soul".to_string(),
            trim: None,
            mileage: Some(-1),
            features: Vec::new(),
            target_profit: Some(1_000.0),
            json: true,
        };

        let request = args.request();
        assert_eq!(request.base_price, Some(9_000.0));
        assert_eq!(request.target_profit, Some(1_000.0));
        assert!(request.facts().mileage.is_none());
    }
}
