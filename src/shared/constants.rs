/// Rough conversion used to turn kilometre radii into degree offsets
pub const KM_PER_DEGREE: f64 = 111.0;

/// Radius around each catalog center that sample resources are scattered in
pub const CATALOG_RADIUS_KM: f64 = 3.0;

/// Full width of the per-axis offset window for synthesized nearby resources
/// (0.02 degrees is roughly 2.2 km, i.e. about 1.1 km either side)
pub const NEARBY_OFFSET_SPAN_DEG: f64 = 0.02;

/// Sentinel accepted by the `type` filter meaning "no type filter"
pub const TYPE_FILTER_ALL: &str = "all";

// =============================================================================
// SAMPLE RECORD DEFAULTS
// =============================================================================

pub const SAMPLE_PHONE_AREA_CODE: &str = "555";
pub const SAMPLE_ELIGIBILITY: &str = "Open to all community members";
pub const SAMPLE_LANGUAGES: &str = "English, Spanish";
