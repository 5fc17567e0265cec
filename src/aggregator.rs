//! Merge classifier output back onto fragments and group by element.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::error::FilterError;
use crate::model::{FilterResult, FilteredElement, FilteredFragment, Fragment, Prediction};

/// Zip `fragments` with `predictions` and keep the fragments whose labels hit
/// the active set.
///
/// Elements appear in the order their first retained fragment was seen. An
/// empty active set yields an empty result without looking at predictions.
pub fn aggregate(
    fragments: Vec<Fragment>,
    predictions: Vec<Prediction>,
    active: &HashSet<String>,
) -> Result<FilterResult, FilterError> {
    if active.is_empty() {
        return Ok(FilterResult::empty(Duration::ZERO));
    }

    if fragments.len() != predictions.len() {
        return Err(FilterError::PredictionCountMismatch {
            expected: fragments.len(),
            actual: predictions.len(),
        });
    }

    let total_fragments = fragments.len();
    let mut elements: Vec<FilteredElement> = Vec::new();
    let mut bucket_of: HashMap<String, usize> = HashMap::new();

    for (fragment, prediction) in fragments.into_iter().zip(predictions) {
        if !prediction.labels.iter().any(|label| active.contains(label)) {
            continue;
        }

        let idx = match bucket_of.get(&fragment.element_id) {
            Some(&idx) => idx,
            None => {
                bucket_of.insert(fragment.element_id.clone(), elements.len());
                elements.push(FilteredElement {
                    element_id: fragment.element_id.clone(),
                    fragments: Vec::new(),
                });
                elements.len() - 1
            }
        };

        elements[idx].fragments.push(FilteredFragment { fragment, prediction });
    }

    Ok(FilterResult {
        filtered_elements: elements,
        total_fragments,
        ..FilterResult::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn fragment(element_id: &str, text: &str) -> Fragment {
        Fragment::whole_block(element_id, text)
    }

    fn prediction(labels: &[&str]) -> Prediction {
        let confidence = labels.iter().map(|l| (l.to_string(), 0.9)).collect::<BTreeMap<_, _>>();
        Prediction::new(labels.iter().map(|l| l.to_string()).collect(), confidence)
    }

    fn active(labels: &[&str]) -> HashSet<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_keeps_only_active_hits() {
        let fragments = vec![fragment("a", "buy now"), fragment("b", "explicit")];
        let predictions = vec![prediction(&["AD"]), prediction(&["SE"])];

        let result = aggregate(fragments, predictions, &active(&["AD"])).unwrap();

        assert_eq!(result.total_fragments, 2);
        assert_eq!(result.filtered_elements.len(), 1);
        assert_eq!(result.filtered_elements[0].element_id, "a");
        assert_eq!(result.filtered_elements[0].fragments[0].fragment.text, "buy now");
    }

    #[test]
    fn test_groups_by_first_occurrence() {
        let fragments = vec![
            fragment("x", "1"),
            fragment("y", "2"),
            fragment("x", "3"),
            fragment("z", "4"),
            fragment("y", "5"),
        ];
        let predictions = vec![
            prediction(&["AD"]),
            prediction(&["IN"]),
            prediction(&["AD", "IN"]),
            prediction(&["CLEAN"]),
            prediction(&["IN"]),
        ];

        let result = aggregate(fragments, predictions, &active(&["AD", "IN"])).unwrap();

        let ids: Vec<&str> = result.filtered_elements.iter().map(|e| e.element_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
        let x_texts: Vec<&str> = result.filtered_elements[0]
            .fragments
            .iter()
            .map(|f| f.fragment.text.as_str())
            .collect();
        assert_eq!(x_texts, vec!["1", "3"]);
        assert_eq!(result.filtered_elements[1].fragments.len(), 2);
    }

    #[test]
    fn test_retained_fragment_keeps_all_labels() {
        let result = aggregate(
            vec![fragment("a", "t")],
            vec![prediction(&["AD", "PO"])],
            &active(&["PO"]),
        )
        .unwrap();

        let kept = &result.filtered_elements[0].fragments[0];
        assert_eq!(kept.prediction.labels, vec!["AD", "PO"]);
        assert_eq!(kept.prediction.confidence.len(), 2);
    }

    #[test]
    fn test_empty_active_set() {
        let result = aggregate(vec![fragment("a", "t")], vec![prediction(&["AD"])], &HashSet::new()).unwrap();
        assert!(result.filtered_elements.is_empty());
        assert_eq!(result.total_fragments, 0);
    }

    #[test]
    fn test_count_mismatch_is_an_error() {
        let err = aggregate(vec![fragment("a", "t"), fragment("a", "u")], vec![prediction(&["AD"])], &active(&["AD"]))
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::PredictionCountMismatch { expected: 2, actual: 1 }
        ));
    }
}
