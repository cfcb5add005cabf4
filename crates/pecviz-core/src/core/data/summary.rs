use super::extremum::{ExtremumError, find_minimum};
use super::record::Dataset;
use super::schema;
use super::value::FieldValue;
use std::sync::Arc;

/// Minimum-energy configuration read off a potential energy curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equilibrium {
    pub bond_length: f64,
    pub energy: f64,
    pub index: usize,
}

/// Locates the equilibrium bond length of a PEC dataset.
///
/// The minimum is taken over the VQE energy column; the bond length is read from
/// the same record.
pub fn equilibrium(dataset: Option<&Arc<Dataset>>) -> Result<Option<Equilibrium>, ExtremumError> {
    let Some(min) = find_minimum(dataset, schema::VQE_ENERGY)? else {
        return Ok(None);
    };
    let record = min.record();
    let bond_length = match record.get(schema::BOND_LENGTH) {
        Some(FieldValue::Number(x)) => *x,
        other => {
            return Err(ExtremumError::unsupported(
                schema::BOND_LENGTH,
                min.index(),
                other,
            ));
        }
    };
    Ok(Some(Equilibrium {
        bond_length,
        energy: min.value(),
        index: min.index(),
    }))
}

/// How far the VQE estimate strays from the exact reference along a curve, in Hartree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDeviation {
    pub max_abs: f64,
    pub mean_abs: f64,
    pub points: usize,
}

/// Summarizes `|vqe - exact|` over every record where it can be determined.
///
/// A numeric `delta_ha` cell is used as-is; otherwise the delta is computed from
/// the two energy columns. Records with neither are skipped. Returns `None` when no
/// record contributes.
pub fn curve_deviation(dataset: &Dataset) -> Option<CurveDeviation> {
    let deltas: Vec<f64> = dataset
        .iter()
        .filter_map(|r| {
            r.number(schema::DELTA).or_else(|| {
                Some(r.number(schema::VQE_ENERGY)? - r.number(schema::EXACT_ENERGY)?)
            })
        })
        .map(f64::abs)
        .collect();

    if deltas.is_empty() {
        return None;
    }
    let max_abs = deltas.iter().copied().fold(0.0, f64::max);
    let mean_abs = deltas.iter().sum::<f64>() / deltas.len() as f64;
    Some(CurveDeviation {
        max_abs,
        mean_abs,
        points: deltas.len(),
    })
}

/// Statistics of a noisy-run log.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSummary {
    pub runs: usize,
    /// Shot count, taken from the first row (constant across one log).
    pub shots: Option<FieldValue>,
    /// Fixed bond length of the runs, taken from the first row.
    pub distance: Option<FieldValue>,
    pub best_restart: Option<FieldValue>,
    pub best_delta: Option<f64>,
    pub mean_delta: Option<f64>,
    /// Population standard deviation of the delta column.
    pub std_delta: Option<f64>,
}

pub fn noise_summary(dataset: &Arc<Dataset>) -> Result<NoiseSummary, ExtremumError> {
    let first = dataset.first();
    let shots = first.and_then(|r| r.get(schema::SHOTS)).cloned();
    let distance = first.and_then(|r| r.get(schema::DISTANCE)).cloned();

    let best = find_minimum(Some(dataset), schema::DELTA)?;
    let best_restart = best
        .as_ref()
        .and_then(|m| m.record().get(schema::RESTART))
        .cloned();
    let best_delta = best.as_ref().map(|m| m.value());

    let deltas = dataset.column(schema::DELTA);
    let (mean_delta, std_delta) = if deltas.is_empty() {
        (None, None)
    } else {
        let n = deltas.len() as f64;
        let mean = deltas.iter().sum::<f64>() / n;
        let var = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
        (Some(mean), Some(var.sqrt()))
    };

    Ok(NoiseSummary {
        runs: dataset.len(),
        shots,
        distance,
        best_restart,
        best_delta,
        mean_delta,
        std_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::tabular::parse;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn dataset(text: &str) -> Arc<Dataset> {
        Arc::new(parse(text).unwrap())
    }

    #[test]
    fn equilibrium_reads_bond_length_of_minimum_energy_row() {
        let ds = dataset(
            "bond_length_angstrom,vqe_energy_ha,exact_energy_ha\n\
             0.5,-1.055,-1.056\n0.735,-1.137,-1.137\n1.0,-1.101,-1.101",
        );
        let eq = equilibrium(Some(&ds)).unwrap().unwrap();
        assert_eq!(eq.bond_length, 0.735);
        assert_eq!(eq.energy, -1.137);
        assert_eq!(eq.index, 1);
    }

    #[test]
    fn equilibrium_is_absent_without_data() {
        assert_eq!(equilibrium(None).unwrap(), None);
        let empty = dataset("bond_length_angstrom,vqe_energy_ha\n");
        assert_eq!(equilibrium(Some(&empty)).unwrap(), None);
    }

    #[test]
    fn equilibrium_requires_numeric_bond_length() {
        let ds = dataset("bond_length_angstrom,vqe_energy_ha\nshort,-1.1");
        assert!(matches!(
            equilibrium(Some(&ds)),
            Err(ExtremumError::UnsupportedFieldType { .. })
        ));
    }

    #[test]
    fn equilibrium_without_bond_length_column_reports_it_missing() {
        let ds = dataset("vqe_energy_ha\n-1.1\n-1.2");
        let err = equilibrium(Some(&ds)).unwrap_err();
        assert_eq!(
            err,
            ExtremumError::UnsupportedFieldType {
                field: schema::BOND_LENGTH.to_string(),
                index: 1,
                found: "missing",
            }
        );
        assert_eq!(
            err.to_string(),
            "Field 'bond_length_angstrom' on record 1 is missing, expected a number"
        );
    }

    #[test]
    fn curve_deviation_prefers_delta_column() {
        let ds = dataset(
            "vqe_energy_ha,exact_energy_ha,delta_ha\n-1.0,-1.1,0.002\n-1.0,-1.0,-0.004",
        );
        let dev = curve_deviation(&ds).unwrap();
        assert_eq!(dev.points, 2);
        assert!(f64_approx_equal(dev.max_abs, 0.004));
        assert!(f64_approx_equal(dev.mean_abs, 0.003));
    }

    #[test]
    fn curve_deviation_computes_delta_from_energies() {
        let ds = dataset("vqe_energy_ha,exact_energy_ha\n-1.135,-1.137\n-1.100,-1.101");
        let dev = curve_deviation(&ds).unwrap();
        assert!(f64_approx_equal(dev.max_abs, 0.002));
        assert!(f64_approx_equal(dev.mean_abs, 0.0015));
    }

    #[test]
    fn curve_deviation_is_none_without_energy_columns() {
        let ds = dataset("restart\n0\n1");
        assert_eq!(curve_deviation(&ds), None);
    }

    #[test]
    fn noise_summary_reports_metadata_and_best_restart() {
        let ds = dataset(
            "restart,delta_ha,shots,R_angstrom\n0,0.03,8192,0.735\n1,0.01,8192,0.735\n2,0.02,8192,0.735",
        );
        let summary = noise_summary(&ds).unwrap();
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.shots, Some(FieldValue::Number(8192.0)));
        assert_eq!(summary.distance, Some(FieldValue::Number(0.735)));
        assert_eq!(summary.best_restart, Some(FieldValue::Number(1.0)));
        assert_eq!(summary.best_delta, Some(0.01));
        assert!(f64_approx_equal(summary.mean_delta.unwrap(), 0.02));
        let expected_std = (2.0f64 / 3.0).sqrt() * 0.01;
        assert!(f64_approx_equal(summary.std_delta.unwrap(), expected_std));
    }

    #[test]
    fn noise_summary_of_empty_log_has_no_statistics() {
        let ds = dataset("restart,delta_ha,shots,R_angstrom\n");
        let summary = noise_summary(&ds).unwrap();
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.shots, None);
        assert_eq!(summary.best_restart, None);
        assert_eq!(summary.mean_delta, None);
    }
}
