//! Assembles formatted fragments into the final one- or two-line output.

use crate::config::schema::{LimitsConfig, Separator, SessionConfig, StatuslineConfig};
use crate::render::bar::render_bar;
use crate::render::format::{format_reset_time, format_session};
use crate::render::palette::{DIM, GRAY, LIGHT_GRAY, RESET, SYM_USAGE_5H, SYM_USAGE_7D};
use crate::usage::{LimitWindow, UsageLimits};

/// First line: `branch • path [• model]`. The model is hidden for the
/// default (Sonnet) model unless configured otherwise; an empty branch
/// fragment is dropped instead of leaving a dangling separator.
pub fn build_first_line(
    branch: &str,
    dir_path: &str,
    model_name: &str,
    show_sonnet_model: bool,
    separator: Separator,
) -> String {
    let is_sonnet = model_name.to_lowercase().contains("sonnet");
    let sep = format!("{GRAY}{}{LIGHT_GRAY}", separator.as_str());

    let mut line = String::from(LIGHT_GRAY);
    if !branch.is_empty() {
        line.push_str(branch);
        line.push_str(&format!(" {sep} "));
    }
    line.push_str(dir_path);

    if !(is_sonnet && !show_sonnet_model) {
        line.push_str(&format!(" {sep} {model_name}"));
    }
    line.push_str(RESET);
    line
}

/// One usage block: separator, label, optional bar, percentage, dim reset
/// countdown. `leading` is false only when nothing precedes the block.
fn push_usage_block(
    line: &mut String,
    window: &LimitWindow,
    label_icon: &str,
    label_text: &str,
    limits: &LimitsConfig,
    use_icon_labels: bool,
    separator: Separator,
) {
    let reset_time = format_reset_time(&window.resets_at);
    let label = if use_icon_labels {
        format!("{DIM}{label_icon}{RESET}")
    } else {
        format!("{DIM}{label_text}{RESET}")
    };

    if !line.is_empty() {
        line.push_str(&format!(" {GRAY}{} ", separator.as_str()));
    }
    line.push_str(&label);

    if limits.show_progress_bar {
        let bar = render_bar(
            window.utilization,
            limits.progress_bar_length.cells(),
            limits.color,
        );
        line.push_str(&format!(" {bar}"));
    }

    line.push_str(&format!(
        " {LIGHT_GRAY}{}{GRAY}%{RESET} {DIM}({reset_time}){RESET}",
        window.utilization
    ));
}

/// Second line: session token summary, then the five-hour block, then (if
/// enabled) the seven-day block. A block whose window data is absent is
/// omitted entirely.
#[allow(clippy::too_many_arguments)]
pub fn build_second_line(
    tokens_used: u64,
    tokens_max: u64,
    context_percentage: u32,
    limits_data: &UsageLimits,
    session: &SessionConfig,
    limits: &LimitsConfig,
    use_icon_labels: bool,
    separator: Separator,
) -> String {
    let mut line = format_session(
        tokens_used,
        tokens_max,
        context_percentage,
        session,
        use_icon_labels,
    );

    if let Some(five_hour) = &limits_data.five_hour {
        push_usage_block(
            &mut line,
            five_hour,
            SYM_USAGE_5H,
            "5h:",
            limits,
            use_icon_labels,
            separator,
        );
    }

    if limits.show_seven_day {
        if let Some(seven_day) = &limits_data.seven_day {
            push_usage_block(
                &mut line,
                seven_day,
                SYM_USAGE_7D,
                "7d:",
                limits,
                use_icon_labels,
                separator,
            );
        }
    }

    line.push_str(RESET);
    line
}

/// Join the two lines per display configuration. Single-line mode emits
/// the joined line plus a blank spacer; `show_first_line = false` keeps
/// only the second line.
pub fn compose(config: &StatuslineConfig, first_line: String, second_line: String) -> Vec<String> {
    if !config.show_first_line {
        return vec![second_line];
    }
    if config.one_line {
        let sep = format!(" {GRAY}{}{LIGHT_GRAY} ", config.separator.as_str());
        vec![format!("{first_line}{sep}{second_line}"), String::new()]
    } else {
        vec![first_line, second_line]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StatuslineConfig;
    use crate::render::palette::strip_ansi;

    fn window(utilization: f64) -> LimitWindow {
        LimitWindow {
            utilization,
            resets_at: "garbage".to_string(),
        }
    }

    #[test]
    fn first_line_hides_sonnet_by_default() {
        let line = build_first_line("main", "/app/src", "Sonnet 4.5", false, Separator::Bullet);
        assert_eq!(strip_ansi(&line), "main \u{2022} /app/src");
    }

    #[test]
    fn first_line_shows_non_default_model() {
        let line = build_first_line("main", "/app/src", "Opus 4.1", false, Separator::Bullet);
        assert_eq!(strip_ansi(&line), "main \u{2022} /app/src \u{2022} Opus 4.1");
    }

    #[test]
    fn first_line_sonnet_shown_when_configured() {
        let line = build_first_line("main", "/app/src", "Sonnet 4.5", true, Separator::Pipe);
        assert_eq!(strip_ansi(&line), "main | /app/src | Sonnet 4.5");
    }

    #[test]
    fn first_line_empty_branch_has_no_dangling_separator() {
        let line = build_first_line("", "/app/src", "Sonnet 4.5", false, Separator::Bullet);
        assert_eq!(strip_ansi(&line), "/app/src");
    }

    #[test]
    fn second_line_without_usage_data_is_session_only() {
        let cfg = StatuslineConfig::default();
        let line = build_second_line(
            45_000,
            200_000,
            22,
            &UsageLimits::default(),
            &cfg.session,
            &cfg.limits,
            cfg.use_icon_labels,
            cfg.separator,
        );
        assert_eq!(strip_ansi(&line), "Context: 45k 22%");
    }

    #[test]
    fn second_line_includes_five_hour_block() {
        let cfg = StatuslineConfig::default();
        let limits_data = UsageLimits {
            five_hour: Some(window(42.0)),
            seven_day: None,
        };
        let line = build_second_line(
            45_000,
            200_000,
            22,
            &limits_data,
            &cfg.session,
            &cfg.limits,
            false,
            cfg.separator,
        );
        let visible = strip_ansi(&line);
        assert!(visible.contains("5h:"), "{visible}");
        assert!(visible.contains("42%"), "{visible}");
        assert!(visible.contains("(N/A)"), "{visible}");
        // Default bar length is 5 cells.
        assert!(line.contains(&"\u{2588}".repeat(2)), "{line}");
    }

    #[test]
    fn seven_day_block_requires_opt_in() {
        let mut cfg = StatuslineConfig::default();
        let limits_data = UsageLimits {
            five_hour: None,
            seven_day: Some(window(10.0)),
        };
        let hidden = build_second_line(
            0,
            200_000,
            0,
            &limits_data,
            &cfg.session,
            &cfg.limits,
            false,
            cfg.separator,
        );
        assert!(!strip_ansi(&hidden).contains("7d:"));

        cfg.limits.show_seven_day = true;
        let shown = build_second_line(
            0,
            200_000,
            0,
            &limits_data,
            &cfg.session,
            &cfg.limits,
            false,
            cfg.separator,
        );
        assert!(strip_ansi(&shown).contains("7d:"));
    }

    #[test]
    fn progress_bar_can_be_disabled() {
        let mut cfg = StatuslineConfig::default();
        cfg.limits.show_progress_bar = false;
        let limits_data = UsageLimits {
            five_hour: Some(window(42.0)),
            seven_day: None,
        };
        let line = build_second_line(
            0,
            200_000,
            0,
            &limits_data,
            &cfg.session,
            &cfg.limits,
            false,
            cfg.separator,
        );
        assert!(!line.contains('\u{2588}'));
        assert!(!line.contains('\u{2591}'));
        assert!(strip_ansi(&line).contains("42%"));
    }

    #[test]
    fn fractional_utilization_keeps_its_decimals() {
        let cfg = StatuslineConfig::default();
        let limits_data = UsageLimits {
            five_hour: Some(window(42.5)),
            seven_day: None,
        };
        let line = build_second_line(
            0,
            200_000,
            0,
            &limits_data,
            &cfg.session,
            &cfg.limits,
            false,
            cfg.separator,
        );
        assert!(strip_ansi(&line).contains("42.5%"));
    }

    #[test]
    fn compose_two_line_mode() {
        let cfg = StatuslineConfig::default();
        let lines = compose(&cfg, "first".to_string(), "second".to_string());
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn compose_one_line_mode_joins_with_spacer() {
        let mut cfg = StatuslineConfig::default();
        cfg.one_line = true;
        let lines = compose(&cfg, "first".to_string(), "second".to_string());
        assert_eq!(lines.len(), 2);
        assert_eq!(strip_ansi(&lines[0]), "first \u{2022} second");
        assert_eq!(lines[1], "");
    }

    #[test]
    fn compose_without_first_line() {
        let mut cfg = StatuslineConfig::default();
        cfg.show_first_line = false;
        let lines = compose(&cfg, "first".to_string(), "second".to_string());
        assert_eq!(lines, vec!["second".to_string()]);
    }
}
