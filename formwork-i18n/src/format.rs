//! Template formatting

/// Replace `:token` placeholders in `template` with their values.
///
/// Replacement is literal, never a pattern match. Longer tokens are applied
/// first so `:min_length` is not clobbered by `:min`. Tokens without a
/// value are left in place.
///
/// ```
/// use formwork_i18n::format_template;
///
/// let msg = format_template(
///     "Field ':field' must be between :min and :max",
///     &[(":field", "age"), (":min", "18"), (":max", "99")],
/// );
/// assert_eq!(msg, "Field 'age' must be between 18 and 99");
/// ```
pub fn format_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut ordered: Vec<&(&str, &str)> = vars.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = template.to_string();
    for (token, value) in ordered {
        if !token.is_empty() {
            out = out.replace(token, value);
        }
    }
    out
}
