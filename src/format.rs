// Count abbreviation and bar-chart sizing

/// Nominal (full-scale) bar width in px.
pub const BAR_WIDTH: u32 = 180;

/// Narrowest bar drawn, so zero-valued rows still show a sliver.
pub const MIN_BAR_WIDTH: u32 = 4;

const BILLION: u64 = 1_000_000_000;
const MILLION: u64 = 1_000_000;
const THOUSAND: u64 = 1_000;

/// Abbreviates a host count: 1_234_567 -> "1.23M", 1_500 -> "1.5K", 999 -> "999".
pub fn format_count(n: u64) -> String {
    if n >= BILLION {
        format!("{:.2}B", n as f64 / BILLION as f64)
    } else if n >= MILLION {
        format!("{:.2}M", n as f64 / MILLION as f64)
    } else if n >= THOUSAND {
        format!("{:.1}K", n as f64 / THOUSAND as f64)
    } else {
        n.to_string()
    }
}

/// `part / whole`, with `whole` floored at 1.
pub fn bar_fraction(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64
}

/// Filled width in px for `fraction` of a `nominal`-wide bar, in `[MIN_BAR_WIDTH, nominal]`.
pub fn bar_width(fraction: f64, nominal: u32) -> u32 {
    if !fraction.is_finite() || fraction <= 0.0 {
        return MIN_BAR_WIDTH.min(nominal);
    }
    let filled = (fraction * nominal as f64).floor() as u32;
    filled.clamp(MIN_BAR_WIDTH.min(nominal), nominal)
}

/// Width of the bar for `part` out of `whole`. With no total there is nothing to
/// scale against, so every bar sits at the floor.
pub fn share_width(part: u64, whole: u64, nominal: u32) -> u32 {
    if whole == 0 {
        return MIN_BAR_WIDTH.min(nominal);
    }
    bar_width(bar_fraction(part, whole), nominal)
}
