// Static "active campaigns" panel content

pub struct Campaign {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: &'static str,
    pub stroke: &'static str,
    pub opacity: f32,
}

/// Advisories pinned to the dashboard, most severe first.
pub const ACTIVE_CAMPAIGNS: &[Campaign] = &[
    Campaign {
        id: "CVE-2026-1731",
        title: "BeyondTrust RCE",
        severity: "CVSS 9.9",
        stroke: "#e63946",
        opacity: 0.8,
    },
    Campaign {
        id: "CVE-2025-55182",
        title: "Next.js Server Actions",
        severity: "HIGH",
        stroke: "#ff6b35",
        opacity: 0.6,
    },
    Campaign {
        id: "ENVOY-JWT",
        title: "Proxy Auth Bypass",
        severity: "HIGH",
        stroke: "#ff6b35",
        opacity: 0.4,
    },
];
