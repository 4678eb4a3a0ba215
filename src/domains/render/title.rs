use crate::domains::scenario::{Metric, TargetId};

/// Title shown above a view. The metric is appended only when an assignment is
/// drawn, a value is known, and annotation is enabled.
pub fn compose_title(
    title: &str,
    has_assignment: bool,
    metric: Metric,
    metric_value: Option<f64>,
    show_metric_value: bool,
) -> String {
    match metric_value {
        Some(value) if has_assignment && show_metric_value => {
            format!("{} - {} = {}", title, metric.symbol(), format_number(value))
        }
        _ => title.to_string(),
    }
}

/// Integers print without a fractional part; everything else uses the
/// shortest round-trip representation.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Round to `places` decimals, for display.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// File stem derived from a title: whitespace removed, path separators
/// replaced so the file always lands in the output directory.
pub fn sanitize_file_stem(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

/// `t` followed by the target id in subscript digits.
pub fn target_caption(target: TargetId) -> String {
    const SUB: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
    let mut caption = String::from("t");
    for d in target.to_string().chars() {
        caption.push(d.to_digit(10).map(|i| SUB[i as usize]).unwrap_or(d));
    }
    caption
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_annotation() {
        let t = compose_title("X", true, Metric::Score, Some(3.0), true);
        assert_eq!(t, "X - f(x) = 3");
    }

    #[test]
    fn efficiency_annotation() {
        let t = compose_title("X", true, Metric::Efficiency, Some(0.667), true);
        assert!(t.contains("γ(x) ="));
        assert!(t.ends_with("0.667"));
    }

    #[test]
    fn missing_value_or_assignment_leaves_title() {
        assert_eq!(compose_title("X", true, Metric::Score, None, true), "X");
        assert_eq!(compose_title("X", false, Metric::Score, Some(1.0), true), "X");
        assert_eq!(compose_title("X", true, Metric::Score, Some(1.0), false), "X");
    }

    #[test]
    fn stems_drop_whitespace() {
        assert_eq!(sanitize_file_stem("Assignment #1"), "Assignment#1");
        assert_eq!(sanitize_file_stem("Best\nScenario 4"), "BestScenario4");
        assert_eq!(sanitize_file_stem("a/b"), "a_b");
    }

    #[test]
    fn captions_use_subscripts() {
        assert_eq!(target_caption(1), "t₁");
        assert_eq!(target_caption(12), "t₁₂");
    }

    #[test]
    fn rounding_for_display() {
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
        assert_eq!(format_number(round_to(2.0 / 3.0, 3)), "0.667");
    }
}
