/// Turn a display name into a file-name fragment: trimmed, with spaces and
/// path separators replaced by underscores.
///
/// # Examples
///
/// ```
/// use rise_core::formatting::name_slug;
///
/// assert_eq!(name_slug("Mario Rossi"), "Mario_Rossi");
/// assert_eq!(name_slug("  Anna  Maria Bianchi "), "Anna__Maria_Bianchi");
/// assert_eq!(name_slug("x/../y"), "x_.._y");
/// ```
pub fn name_slug(name: &str) -> String {
    name.trim().replace([' ', '/', '\\'], "_")
}

/// Stem shared by the report artifacts, e.g. `"Report_RISE_Mario_Rossi"`.
///
/// # Examples
///
/// ```
/// use rise_core::formatting::report_stem;
///
/// assert_eq!(report_stem("RISE", "Mario Rossi"), "Report_RISE_Mario_Rossi");
/// ```
pub fn report_stem(marker: &str, name: &str) -> String {
    format!("Report_{}_{}", name_slug(marker), name_slug(name))
}

/// File name of the bundle holding the months that contain the marker.
///
/// # Examples
///
/// ```
/// use rise_core::formatting::months_bundle_name;
///
/// assert_eq!(
///     months_bundle_name("RISE", "Mario Rossi"),
///     "Cartellini_RISE_mesi_Mario_Rossi.zip"
/// );
/// ```
pub fn months_bundle_name(marker: &str, name: &str) -> String {
    format!("Cartellini_{}_mesi_{}.zip", name_slug(marker), name_slug(name))
}

/// Report title line.
///
/// # Examples
///
/// ```
/// use rise_core::formatting::report_title;
///
/// assert_eq!(
///     report_title("Mario Rossi", "RISE", 12),
///     "Mario Rossi - Totale giorni RISE: 12"
/// );
/// ```
pub fn report_title(name: &str, marker: &str, total_days: usize) -> String {
    format!("{} - Totale giorni {}: {}", name.trim(), marker, total_days)
}

/// Sentence used in place of the detail table when nothing was found.
pub fn empty_report_notice(marker: &str) -> String {
    format!(
        "Nessuna giornata {} trovata con orari di ingresso/uscita.",
        marker
    )
}

/// Header of the per-year summary column, e.g. `"Giorni con RISE"`.
pub fn days_with_marker_label(marker: &str) -> String {
    format!("Giorni con {}", marker)
}

/// Pluralised day count: `"1 giorno"`, `"3 giorni"`.
///
/// # Examples
///
/// ```
/// use rise_core::formatting::format_day_count;
///
/// assert_eq!(format_day_count(1), "1 giorno");
/// assert_eq!(format_day_count(0), "0 giorni");
/// ```
pub fn format_day_count(days: usize) -> String {
    if days == 1 {
        "1 giorno".to_string()
    } else {
        format!("{} giorni", days)
    }
}
