//! Join selectivity estimate command.

use std::path::Path;

use anyhow::Result;
use rangesel_common::types::AttributeRef;
use rangesel_core::OperatorInfo;
use rangesel_engine::{Estimate, JoinContext, OverlapJoinEstimator};
use serde::Serialize;

use super::{Settings, load_store};
use crate::output::{self, Format};

/// Estimate result.
#[derive(Serialize)]
struct EstimateOutput {
    left: String,
    right: String,
    selectivity: f64,
    fallback: bool,
    reason: Option<String>,
    common_domain: Option<(f64, f64)>,
    bins: usize,
    raw_similarity: Option<f64>,
}

fn estimate(
    snapshot: &Path,
    left: &str,
    right: &str,
    operator: &str,
    leakproof: bool,
    settings: &Settings,
) -> Result<EstimateOutput> {
    let left: AttributeRef = left.parse()?;
    let right: AttributeRef = right.parse()?;
    let config = settings.estimator_config()?;
    let bins = config.bin_count;
    let estimator = OverlapJoinEstimator::with_config(load_store(snapshot)?, config)?;

    let mut operator = OperatorInfo::new(operator);
    operator.leakproof = leakproof;
    let estimate = estimator.estimate_detailed(&left, &right, &JoinContext::new(operator));

    let mut output = EstimateOutput {
        left: left.to_string(),
        right: right.to_string(),
        selectivity: estimate.selectivity(),
        fallback: estimate.is_fallback(),
        reason: None,
        common_domain: None,
        bins,
        raw_similarity: None,
    };
    match estimate {
        Estimate::Computed {
            raw_similarity,
            domain,
            ..
        } => {
            output.common_domain = Some(domain);
            output.raw_similarity = Some(raw_similarity);
        }
        Estimate::Fallback { reason, .. } => output.reason = Some(reason.to_string()),
    }
    Ok(output)
}

/// Run the estimate command.
pub fn run(
    snapshot: &Path,
    left: &str,
    right: &str,
    operator: &str,
    leakproof: bool,
    settings: &Settings,
) -> Result<()> {
    let output = estimate(snapshot, left, right, operator, leakproof, settings)?;

    let fmt: Format = settings.format.into();
    match fmt {
        Format::Json => output::print_json(&output, settings.quiet)?,
        Format::Table => {
            let mut items = vec![
                ("Left", output.left.clone()),
                ("Right", output.right.clone()),
                ("Selectivity", format!("{:.6}", output.selectivity)),
                ("Bins", output.bins.to_string()),
            ];
            if let Some((lower, upper)) = output.common_domain {
                items.push(("Common Domain", format!("[{lower}, {upper}]")));
            }
            if let Some(raw) = output.raw_similarity {
                items.push(("Raw Similarity", format!("{raw:.6}")));
            }
            if let Some(reason) = &output.reason {
                items.push(("Fallback", reason.clone()));
            }
            output::print_summary(&items, fmt, settings.quiet)?;
        }
    }

    Ok(())
}
