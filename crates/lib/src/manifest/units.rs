const MB_PER_GB: u64 = 1024;

/// Format a quantity in megabytes the way manifests spell it.
///
/// Whole gigabytes become `"<n>G"`; anything else, including zero, stays in
/// megabytes as `"<n>M"`. No fractional gigabytes are ever produced.
pub fn format_megabytes(mb: u64) -> String {
  if mb > 0 && mb % MB_PER_GB == 0 {
    format!("{}G", mb / MB_PER_GB)
  } else {
    format!("{}M", mb)
  }
}
