/// Parses `"R: 12"` or a bare `"12"` into `value`, rewriting `string` to the
/// canonical form. On failure `value` is untouched and `string` reads `Invalid!`.
pub fn parse_input(prefix: &str, value: &mut u8, string: &mut String) -> bool {
    let num_str = string.trim();
    let num_str = num_str.strip_prefix(prefix).unwrap_or(num_str);
    if let Ok(parsed_value) = num_str.trim().parse::<u8>() {
        *value = parsed_value;
        *string = format!("{prefix} {parsed_value}");
        return true;
    }
    *string = "Invalid!".to_string();
    false
}
