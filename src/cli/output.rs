use ansi_term::{Colour, Style};

/// Applies terminal colours to rendered views. Disabled when output isn't a terminal so that
/// piped output stays plain.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(Style::new().bold().underline(), text)
    }

    /// Days with some recorded activity.
    pub fn highlight(&self, text: &str) -> String {
        self.paint(Colour::Green.bold(), text)
    }

    pub fn today(&self, text: &str) -> String {
        self.paint(Colour::Cyan.reverse(), text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(Style::new().dimmed(), text)
    }
}

/// Minutes are shown as is up to an hour, hours with a single decimal afterwards.
pub fn format_study_time(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{:.1} hrs", f64::from(minutes) / 60.)
    }
}

/// Rank `0` is unknown.
pub fn format_rank(rank: u32) -> String {
    if rank == 0 {
        "#N/A".to_string()
    } else {
        format!("#{rank}")
    }
}

/// Horizontal bar scaled against the largest value of a chart.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0. || value <= 0. {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

#[cfg(test)]
mod tests {
    use super::{bar, format_rank, format_study_time, Painter};

    #[test]
    fn study_time_switches_to_hours() {
        assert_eq!(format_study_time(0), "0 min");
        assert_eq!(format_study_time(59), "59 min");
        assert_eq!(format_study_time(60), "1.0 hrs");
        assert_eq!(format_study_time(90), "1.5 hrs");
        assert_eq!(format_study_time(130), "2.2 hrs");
    }

    #[test]
    fn unset_rank_is_not_available() {
        assert_eq!(format_rank(0), "#N/A");
        assert_eq!(format_rank(17), "#17");
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(10., 10., 4), "████");
        assert_eq!(bar(5., 10., 4), "██");
        assert_eq!(bar(0.1, 10., 4), "█");
        assert_eq!(bar(0., 10., 4), "");
        assert_eq!(bar(-3., 10., 4), "");
        assert_eq!(bar(3., 0., 4), "");
    }

    #[test]
    fn plain_painter_leaves_text_alone() {
        let painter = Painter::plain();
        assert_eq!(painter.heading("Overview"), "Overview");
        assert_eq!(painter.highlight("12"), "12");
        assert_eq!(painter.today("13"), "13");
        assert_eq!(painter.dim("-"), "-");
    }

    #[test]
    fn enabled_painter_adds_escape_codes() {
        let painted = Painter::new(true).highlight("12");
        assert!(painted.contains("12"));
        assert_ne!(painted, "12");
    }
}
