//! Display formatting for product listings.

use crate::product::{MetalDetector, Product};

/// Drop a leading case-insensitive `SB` from an item number.
pub fn strip_item_number_prefix(value: &str) -> String {
    match value.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("sb") => value[2..].to_string(),
        _ => value.to_string(),
    }
}

/// Two-letter code for the countries the plant ships to; `None` for
/// anything else.
pub fn normalize_country_code(code: &str) -> Option<&'static str> {
    match code.trim().to_uppercase().as_str() {
        "US" | "USA" | "UNITED STATES" | "UNITED STATES OF AMERICA" => Some("US"),
        "CA" | "CAN" | "CANADA" => Some("CA"),
        "MX" | "MEX" | "MEXICO" => Some("MX"),
        _ => None,
    }
}

/// Pack size such as `6x 2.5#` or `12 oz`. Pounds are written `#` with no
/// space. `None` without a unit size.
pub fn format_pack_size(
    pack_count: Option<f64>,
    unit_size: Option<&str>,
    unit_size_uom: Option<&str>,
) -> Option<String> {
    let unit_size = unit_size.filter(|s| !s.is_empty())?;
    let uom = unit_size_uom.map(str::trim).unwrap_or("");
    let size = if uom.eq_ignore_ascii_case("lb") {
        format!("{unit_size}#")
    } else if uom.is_empty() {
        unit_size.to_string()
    } else {
        format!("{unit_size} {uom}")
    };

    match pack_count {
        Some(n) if n.is_finite() && n > 1.0 => Some(format!("{n}x {size}")),
        _ => Some(size),
    }
}

/// Item number, customer, formula, container and pack size joined with
/// ` | `, skipping empty parts.
pub fn format_main_line(product: &Product) -> String {
    let pack = format_pack_size(
        product.pack_count,
        product.unit_size.as_deref(),
        product.unit_size_uom.as_deref(),
    );
    let item = strip_item_number_prefix(&product.item_number);
    [
        Some(item.as_str()),
        product.customer.as_deref(),
        product.formula.as_deref(),
        product.container_1.as_deref(),
        pack.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" | ")
}

/// `MD` for a set flag, `MD <line>` for a named detector.
pub fn metal_detector_label(product: &Product) -> Option<String> {
    match product.metal_detector.as_ref()? {
        MetalDetector::Flag(true) => Some("MD".to_string()),
        MetalDetector::Flag(false) => None,
        MetalDetector::Line(line) if line.is_empty() => None,
        MetalDetector::Line(line) => Some(format!("MD {line}")),
    }
}
