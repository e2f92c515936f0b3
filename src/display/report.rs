//! Report formatting utilities for terminal output

/// Format a percentage with precision that suits its size
pub fn format_percentage(pct: f64) -> String {
    if !pct.is_finite() {
        return "-".to_string();
    }
    let magnitude = pct.abs();
    if magnitude > 0.0 && magnitude < 0.1 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar of `width` cells filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 || !value.is_finite() {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.24), "5.2%");
        assert_eq!(format_percentage(60.0), "60%");
        assert_eq!(format_percentage(-12.4), "-12%");
        assert_eq!(format_percentage(f64::NAN), "-");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 4), "██░░");
        assert_eq!(format_bar(150.0, 100.0, 4), "████");
        assert_eq!(format_bar(0.0, 100.0, 3), "░░░");
        assert_eq!(format_bar(10.0, 0.0, 2), "░░");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3).chars().count(), 3);
    }
}
