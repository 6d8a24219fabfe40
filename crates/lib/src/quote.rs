//! Quoting for generated Tcl do-scripts.
//!
//! Every dynamic value spliced into a do-script goes through [`tcl_quote`] so
//! that paths, defines and names containing whitespace or Tcl metacharacters
//! remain a single, literal word.

/// Characters that force quoting.
const SPECIAL: &[char] = &['{', '}', '[', ']', '$', '"', '\\', ';', '#'];

/// Quote `value` as exactly one Tcl word that evaluates to `value` verbatim.
///
/// - empty strings become `{}`
/// - plain words pass through
/// - words without braces or backslashes are wrapped in braces, which disables
///   all substitution
/// - everything else is backslash-escaped character by character
pub fn tcl_quote(value: &str) -> String {
  if value.is_empty() {
    return "{}".to_string();
  }

  let needs_quoting = value.chars().any(|c| c.is_whitespace() || SPECIAL.contains(&c));
  if !needs_quoting {
    return value.to_string();
  }

  if !value.contains(['{', '}', '\\']) {
    return format!("{{{}}}", value);
  }

  let mut escaped = String::with_capacity(value.len() * 2);
  for c in value.chars() {
    match c {
      '\n' => escaped.push_str("\\n"),
      '\t' => escaped.push_str("\\t"),
      '\r' => escaped.push_str("\\r"),
      c if c.is_whitespace() || SPECIAL.contains(&c) => {
        escaped.push('\\');
        escaped.push(c);
      }
      c => escaped.push(c),
    }
  }
  escaped
}

/// Quote each value and join them with single spaces.
pub fn tcl_join<I, S>(values: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  values
    .into_iter()
    .map(|v| tcl_quote(v.as_ref()))
    .collect::<Vec<_>>()
    .join(" ")
}
