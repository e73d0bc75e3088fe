use strsim::levenshtein;

/// Every placeholder name, without parameters or delimiters.
pub const KNOWN_NAMES: &[&str] = &[
    "CompSwitch",
    "LinkGammeCar",
    "VCarosserie",
    "VMotorisation",
    "VCodeMoteur",
    "PrixPasCher",
    "VousPropose",
    "MinPrice",
];

/// Suggest known placeholder names close to the inner text of an unrecognized
/// `#...#` span.
///
/// Trailing `_<segment>` parameters are ignored when comparing, so
/// `CompSwich_1_2` suggests `CompSwitch` and `CompSwitch_x_2` suggests the
/// exact name it misuses. Spans containing whitespace are treated as prose
/// and never produce suggestions.
///
/// - distance <= 1 for names <= 3 chars
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
pub fn compute_suggestions(inner: &str) -> Vec<String> {
    if inner.is_empty() || inner.chars().any(char::is_whitespace) {
        return Vec::new();
    }
    let name = inner.split('_').next().unwrap_or(inner);
    let has_params = name.len() < inner.len();
    let max_distance = if name.len() <= 3 { 1 } else { 2 };

    let mut suggestions: Vec<(usize, &str)> = KNOWN_NAMES
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            // An exact name only reaches here when its parameters are malformed.
            let exact_misuse = dist == 0 && has_params;
            if (dist > 0 && dist <= max_distance) || exact_misuse {
                Some((dist, *candidate))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_misspelled_name() {
        assert_eq!(compute_suggestions("CompSwich_1_2"), vec!["CompSwitch"]);
        assert_eq!(compute_suggestions("MinPrix"), vec!["MinPrice"]);
    }

    #[test]
    fn suggests_exact_name_with_bad_parameters() {
        assert_eq!(compute_suggestions("CompSwitch_a_2"), vec!["CompSwitch"]);
    }

    #[test]
    fn prose_between_hashes_is_ignored() {
        assert!(compute_suggestions("12 ").is_empty());
        assert!(compute_suggestions("hashtag").is_empty());
        assert!(compute_suggestions("").is_empty());
    }
}
