//! Wind component variable detection.
//!
//! NetCDF datasets name their wind components inconsistently (`u`/`v`,
//! `u10`/`v10`, `eastward_wind`/`northward_wind`, ...). The backend pairs
//! them by pattern; the client mirrors that logic so it can reason about
//! upload responses and metadata listings the same way.

use serde::{Deserialize, Serialize};

/// Variable names for a matched u/v component pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindComponents {
    /// Eastward component variable name.
    pub u: String,
    /// Northward component variable name.
    pub v: String,
}

/// Name fragments that identify eastward wind variables.
const U_PATTERNS: &[&str] = &["u", "u10", "u_wind", "u_component", "eastward"];

/// Name fragments that identify northward wind variables.
const V_PATTERNS: &[&str] = &["v", "v10", "v_wind", "v_component", "northward"];

/// Find a u/v wind component pair among dataset variable names.
///
/// A pair matches when both names contain corresponding pattern fragments
/// and are otherwise identical — `u10`/`v10` pair up, `u10`/`v_wind` do
/// not. Matching is case-insensitive; the returned names keep their
/// original casing. The first pair found in pattern order wins.
pub fn find_wind_components(variables: &[String]) -> Option<WindComponents> {
    for (u_pattern, v_pattern) in U_PATTERNS.iter().zip(V_PATTERNS) {
        let u_matches: Vec<&String> = variables
            .iter()
            .filter(|name| name.to_lowercase().contains(u_pattern))
            .collect();
        let v_matches: Vec<&String> = variables
            .iter()
            .filter(|name| name.to_lowercase().contains(v_pattern))
            .collect();

        for u_var in &u_matches {
            for v_var in &v_matches {
                let u_stem = u_var.to_lowercase().replace(u_pattern, "");
                let v_stem = v_var.to_lowercase().replace(v_pattern, "");
                if u_stem == v_stem {
                    return Some(WindComponents {
                        u: (*u_var).clone(),
                        v: (*v_var).clone(),
                    });
                }
            }
        }
    }

    None
}
