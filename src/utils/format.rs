/// Format a duration in minutes to "Xh Ym" or "Ym"
pub fn format_duration_mins(mins: i32) -> String {
    if mins <= 0 {
        return "now".to_string();
    }
    let hours = mins / 60;
    let minutes = mins % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Remaining minutes as "HH:MM"
pub fn format_countdown(mins: i32) -> String {
    let mins = mins.max(0);
    format!("{:02}:{:02}", mins / 60, mins % 60)
}

/// "4:28 AM"
pub fn format_12h(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", clock_hour(hour), minute, suffix)
}

/// Lock-screen clock, "3:05" with no suffix
pub fn clock_12h(hour: u32, minute: u32) -> String {
    format!("{}:{:02}", clock_hour(hour), minute)
}

fn clock_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Replace ASCII digits with Arabic-Indic digits
pub fn to_arabic_numerals(s: &str) -> String {
    const DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Create a simple ASCII progress bar
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}
