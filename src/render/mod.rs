// SVG dashboard rendering: the full ops-center view and the no-data fallback.
// All values arrive pre-computed; this module only places them.

mod campaigns;
mod svg;

pub use campaigns::{ACTIVE_CAMPAIGNS, Campaign};
pub use svg::{escape_xml, share_bar};

use crate::collector::TOP_SERVICES_LIMIT;
use crate::format::format_count;
use crate::models::{MetricsSnapshot, timestamp_label};
use chrono::{DateTime, Utc};

/// Status line of the fallback image.
pub const AWAITING_CONFIGURATION: &str = "AWAITING CENSYS API CONFIGURATION";

const TITLE: &str = "◆  GLOBAL THREAT OPERATIONS CENTER  ◆";

const DASHBOARD_DEFS: &str = r##"  <defs>
    <linearGradient id="bgGrad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#0a0a1a"/>
      <stop offset="50%" style="stop-color:#0d0d24"/>
      <stop offset="100%" style="stop-color:#0a0a1a"/>
    </linearGradient>
    <linearGradient id="barGrad" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:#e63946"/>
      <stop offset="100%" style="stop-color:#ff6b35"/>
    </linearGradient>
    <linearGradient id="borderGrad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#e63946;stop-opacity:0.6"/>
      <stop offset="50%" style="stop-color:#ff6b35;stop-opacity:0.3"/>
      <stop offset="100%" style="stop-color:#e63946;stop-opacity:0.6"/>
    </linearGradient>
    <filter id="glow">
      <feGaussianBlur stdDeviation="2" result="coloredBlur"/>
      <feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge>
    </filter>
    <style>
      .mono { font-family: 'JetBrains Mono', 'Fira Code', 'Cascadia Code', 'SF Mono', monospace; }
      .title { font-size: 13px; fill: #e63946; letter-spacing: 3px; font-weight: 700; }
      .subtitle { font-size: 10px; fill: #555577; letter-spacing: 1px; }
      .label { font-size: 11px; fill: #8888aa; }
      .value { font-size: 11px; fill: #e0e0f0; font-weight: 600; }
      .accent { font-size: 11px; fill: #e63946; font-weight: 600; }
      .dim { font-size: 10px; fill: #6a6a8a; }
      .bright { font-size: 12px; fill: #ff6b35; font-weight: 700; }
      .section { font-size: 10px; fill: #e63946; letter-spacing: 2px; font-weight: 600; }
      .stat-big { font-size: 22px; fill: #e0e0f0; font-weight: 700; }
      .stat-label { font-size: 9px; fill: #555577; letter-spacing: 1px; }
      .warning { font-size: 10px; fill: #ff6b35; }
      .live { font-size: 9px; fill: #00e676; }
      .scanline { animation: scanline 4s linear infinite; }
      @keyframes scanline {
        0% { opacity: 0.03; transform: translateY(0); }
        50% { opacity: 0.06; }
        100% { opacity: 0.03; transform: translateY(520px); }
      }
    </style>
  </defs>
"##;

const DASHBOARD_BACKDROP: &str = r##"
  <!-- Background -->
  <rect width="820" height="520" rx="8" fill="url(#bgGrad)"/>
  <rect width="820" height="520" rx="8" fill="none" stroke="url(#borderGrad)" stroke-width="1.5"/>

  <!-- Scan line effect -->
  <rect class="scanline" width="820" height="2" fill="#e63946" opacity="0.04"/>

  <!-- Grid pattern overlay -->
  <pattern id="grid" width="40" height="40" patternUnits="userSpaceOnUse">
    <path d="M 40 0 L 0 0 0 40" fill="none" stroke="#1a1a3a" stroke-width="0.3"/>
  </pattern>
  <rect width="820" height="520" fill="url(#grid)" opacity="0.5"/>

  <!-- Corner decorations -->
  <path d="M 2 20 L 2 8 Q 2 2 8 2 L 20 2" fill="none" stroke="#e63946" stroke-width="1.5" opacity="0.8"/>
  <path d="M 800 2 L 812 2 Q 818 2 818 8 L 818 20" fill="none" stroke="#e63946" stroke-width="1.5" opacity="0.8"/>
  <path d="M 2 500 L 2 512 Q 2 518 8 518 L 20 518" fill="none" stroke="#e63946" stroke-width="1.5" opacity="0.8"/>
  <path d="M 800 518 L 812 518 Q 818 518 818 512 L 818 500" fill="none" stroke="#e63946" stroke-width="1.5" opacity="0.8"/>
"##;

const DIVIDER_STROKE: &str = r##"stroke="#2a2a4a" stroke-width="0.5""##;

/// Full dashboard for a populated snapshot. `tagline` is the last footer line.
pub fn render_dashboard(m: &MetricsSnapshot, tagline: &str) -> String {
    let mut svg = String::with_capacity(12 * 1024);
    svg.push_str(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="820" height="520" viewBox="0 0 820 520">
"#,
    );
    svg.push_str(DASHBOARD_DEFS);
    svg.push_str(DASHBOARD_BACKDROP);
    svg.push_str(&header(m));
    svg.push_str(&regional_coverage(m));
    svg.push_str(&attack_surface(m));
    svg.push_str(&format!(
        r#"
  <!-- Bottom section divider -->
  <line x1="30" y1="290" x2="790" y2="290" {DIVIDER_STROKE}/>
"#
    ));
    svg.push_str(&active_campaigns(ACTIVE_CAMPAIGNS));
    svg.push_str(&top_services(m));
    svg.push_str(&footer(m, tagline));
    svg.push_str("\n</svg>");
    svg
}

fn header(m: &MetricsSnapshot) -> String {
    let timestamp = m.timestamp_label();
    let total = format_count(m.total_hosts);
    format!(
        r##"
  <!-- Header -->
  <text x="410" y="38" text-anchor="middle" class="mono title" filter="url(#glow)">{TITLE}</text>
  <text x="410" y="54" text-anchor="middle" class="mono subtitle">CENSYS INTERNET INTELLIGENCE  //  {timestamp}</text>

  <!-- Live indicator -->
  <circle cx="30" cy="46" r="4" fill="#00e676" opacity="0.9">
    <animate attributeName="opacity" values="0.9;0.3;0.9" dur="2s" repeatCount="indefinite"/>
  </circle>
  <text x="40" y="50" class="mono live">LIVE</text>

  <!-- Divider -->
  <line x1="30" y1="66" x2="790" y2="66" {DIVIDER_STROKE}/>

  <!-- Total hosts stat -->
  <text x="410" y="100" text-anchor="middle" class="mono stat-big" filter="url(#glow)">{total}</text>
  <text x="410" y="116" text-anchor="middle" class="mono stat-label">OBSERVABLE HOSTS WORLDWIDE</text>

  <!-- Divider -->
  <line x1="30" y1="132" x2="790" y2="132" {DIVIDER_STROKE}/>
"##
    )
}

fn regional_coverage(m: &MetricsSnapshot) -> String {
    let rows = [
        ("North America", "NORTH AMERICA", m.regions.north_america),
        ("Europe", "EUROPE", m.regions.europe),
        ("Asia-Pacific", "ASIA-PACIFIC", m.regions.asia),
    ];
    let mut out = String::from(
        r#"
  <!-- LEFT COLUMN: Regional Coverage -->
  <text x="40" y="156" class="mono section">◈ REGIONAL COVERAGE</text>
"#,
    );
    for (i, (comment, label, count)) in rows.into_iter().enumerate() {
        let y = 182 + i * 34;
        let bar_y = y + 6;
        let value = format_count(count);
        let bar = share_bar(count, m.total_hosts);
        out.push_str(&format!(
            r#"
  <!-- {comment} -->
  <text x="40" y="{y}" class="mono label">{label}</text>
  <text x="290" y="{y}" class="mono value" text-anchor="end">{value}</text>
  <g transform="translate(40, {bar_y})">{bar}</g>
"#
        ));
    }
    out
}

fn attack_surface(m: &MetricsSnapshot) -> String {
    let rdp = format_count(m.exposure.rdp);
    let smb = format_count(m.exposure.smb);
    let telnet = format_count(m.exposure.telnet);
    format!(
        r##"
  <!-- RIGHT COLUMN: Exposed Attack Surface -->
  <text x="440" y="156" class="mono section">◈ EXPOSED ATTACK SURFACE</text>

  <!-- Critical services boxes -->
  <rect x="440" y="170" width="160" height="60" rx="4" fill="#1a1a2e" {DIVIDER_STROKE}/>
  <text x="520" y="192" text-anchor="middle" class="mono bright">{rdp}</text>
  <text x="520" y="206" text-anchor="middle" class="mono dim">RDP EXPOSED</text>

  <rect x="615" y="170" width="160" height="60" rx="4" fill="#1a1a2e" {DIVIDER_STROKE}/>
  <text x="695" y="192" text-anchor="middle" class="mono bright">{smb}</text>
  <text x="695" y="206" text-anchor="middle" class="mono dim">SMB EXPOSED</text>

  <rect x="440" y="240" width="335" height="30" rx="4" fill="#1a1a2e" {DIVIDER_STROKE}/>
  <text x="460" y="260" class="mono warning">⚠ TELNET STILL ACTIVE:</text>
  <text x="670" y="260" class="mono bright">{telnet} HOSTS</text>
"##
    )
}

fn active_campaigns(campaigns: &[Campaign]) -> String {
    let mut out = String::from(
        r#"
  <!-- Bottom: Active Campaigns -->
  <text x="40" y="314" class="mono section">◈ ACTIVE CAMPAIGNS</text>
"#,
    );
    for (i, c) in campaigns.iter().enumerate() {
        let box_y = 326 + i * 44;
        let text_y = box_y + 23;
        let Campaign {
            id,
            title,
            severity,
            stroke,
            opacity,
        } = c;
        out.push_str(&format!(
            r##"
  <rect x="40" y="{box_y}" width="340" height="36" rx="4" fill="#1a1a2e" stroke="{stroke}" stroke-width="0.5" opacity="{opacity}"/>
  <text x="55" y="{text_y}" class="mono accent">{id}</text>
  <text x="200" y="{text_y}" class="mono dim">{title}</text>
  <text x="345" y="{text_y}" class="mono warning" text-anchor="end">{severity}</text>
"##
        ));
    }
    out
}

fn top_services(m: &MetricsSnapshot) -> String {
    let mut out = String::from(
        r#"
  <!-- Bottom right: Top Services -->
  <text x="440" y="314" class="mono section">◈ TOP INTERNET SERVICES</text>
  <g>
    "#,
    );
    for (i, s) in m.top_services.iter().take(TOP_SERVICES_LIMIT).enumerate() {
        let y = 338 + i * 22;
        let name = escape_xml(&s.name);
        let count = format_count(s.count);
        out.push_str(&format!(
            r#"<text x="460" y="{y}" class="mono dim">▸ {name}</text><text x="700" y="{y}" class="mono value" text-anchor="end">{count}</text>"#
        ));
    }
    out.push_str("\n  </g>\n");
    out
}

fn footer(m: &MetricsSnapshot, tagline: &str) -> String {
    let date = m.date_short();
    let tagline = escape_xml(tagline);
    format!(
        r#"
  <!-- Footer -->
  <line x1="30" y1="470" x2="790" y2="470" {DIVIDER_STROKE}/>
  <text x="410" y="492" text-anchor="middle" class="mono dim">DATA SOURCE: CENSYS UNIVERSAL INTERNET DATASET  ·  UPDATED {date}</text>
  <text x="410" y="508" text-anchor="middle" class="mono dim">{tagline}</text>
"#
    )
}

/// Minimal image used when credentials are missing or no data came back.
pub fn render_fallback() -> String {
    render_fallback_at(Utc::now())
}

pub fn render_fallback_at(now: DateTime<Utc>) -> String {
    let ts = timestamp_label(now);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="820" height="200" viewBox="0 0 820 200">
  <defs>
    <linearGradient id="bgGrad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#0a0a1a"/>
      <stop offset="100%" style="stop-color:#0d0d24"/>
    </linearGradient>
    <style>
      .mono {{ font-family: 'JetBrains Mono', 'Fira Code', monospace; }}
    </style>
  </defs>
  <rect width="820" height="200" rx="8" fill="url(#bgGrad)"/>
  <rect width="820" height="200" rx="8" fill="none" stroke="#e63946" stroke-width="1" opacity="0.4"/>
  <text x="410" y="80" text-anchor="middle" class="mono" font-size="14" fill="#e63946" letter-spacing="3">{TITLE}</text>
  <text x="410" y="110" text-anchor="middle" class="mono" font-size="11" fill="#555577">{AWAITING_CONFIGURATION}</text>
  <text x="410" y="140" text-anchor="middle" class="mono" font-size="10" fill="#3a3a5a">{ts}</text>
</svg>"##
    )
}
