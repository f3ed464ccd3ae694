//! Builders for the scripts evaluated in the form page. Every script is an
//! IIFE that returns a small JSON object; the mutating ones catch page
//! exceptions and report them in-band as `{ outcome: "error" }` so a broken
//! page never kills the CDP session.

use crate::selectors::WIDGET_OPTION_MARKERS;
use serde_json::Value;

/// Embed a Rust string as a JS string literal.
fn js_str(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Resolve a selector chain and report what kind of control matched.
pub fn classify(chain: &str) -> String {
    let chain = js_str(chain);
    format!(
        r#"(() => {{
  const el = document.querySelector({chain});
  if (!el) return {{ found: false }};
  const tag = el.tagName.toLowerCase();
  let kind;
  if (tag === 'select') kind = 'select';
  else if (tag === 'input') kind = 'input';
  else if (tag === 'textarea') kind = 'textarea';
  else if (el.isContentEditable) kind = 'editable';
  else kind = 'widget';
  return {{ found: true, kind }};
}})()"#
    )
}

/// Write a value into a text-like control and fire the events a reactive
/// form listens for. Contenteditable hosts take the text through
/// `innerText` and only see an input event; real inputs get both input
/// and change.
pub fn set_text(chain: &str, value: &str, editable: bool) -> String {
    let chain = js_str(chain);
    let value = js_str(value);
    if editable {
        format!(
            r#"(() => {{
  try {{
    const el = document.querySelector({chain});
    if (!el) return {{ outcome: 'not_found' }};
    el.innerText = {value};
    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
    return {{ outcome: 'filled' }};
  }} catch (err) {{
    return {{ outcome: 'error', message: String(err) }};
  }}
}})()"#
        )
    } else {
        format!(
            r#"(() => {{
  try {{
    const el = document.querySelector({chain});
    if (!el) return {{ outcome: 'not_found' }};
    el.value = {value};
    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
    return {{ outcome: 'filled' }};
  }} catch (err) {{
    return {{ outcome: 'error', message: String(err) }};
  }}
}})()"#
        )
    }
}

/// Read the current value of a control, for settle verification.
pub fn read_value(chain: &str, editable: bool) -> String {
    let chain = js_str(chain);
    let accessor = if editable { "el.innerText" } else { "el.value" };
    format!(
        r#"(() => {{
  const el = document.querySelector({chain});
  if (!el) return {{ value: null }};
  return {{ value: String({accessor}) }};
}})()"#
    )
}

/// Pick the first option whose label contains the desired text,
/// case-insensitively. An already-matching selection is left untouched so
/// no duplicate change event fires.
pub fn select_option(chain: &str, desired: &str) -> String {
    let chain = js_str(chain);
    let desired = js_str(desired);
    format!(
        r#"(() => {{
  try {{
    const el = document.querySelector({chain});
    if (!el) return {{ outcome: 'not_found' }};
    const desired = {desired}.toLowerCase();
    const current = el.selectedOptions && el.selectedOptions[0];
    if (current && current.textContent.toLowerCase().includes(desired)) {{
      return {{ outcome: 'already', label: current.textContent.trim() }};
    }}
    const option = Array.from(el.options).find(
      (opt) => opt.textContent.toLowerCase().includes(desired)
    );
    if (!option) return {{ outcome: 'no_option' }};
    el.value = option.value;
    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
    return {{ outcome: 'selected', label: option.textContent.trim() }};
  }} catch (err) {{
    return {{ outcome: 'error', message: String(err) }};
  }}
}})()"#
    )
}

/// Click the control that opens a custom dropdown.
pub fn click(chain: &str) -> String {
    let chain = js_str(chain);
    format!(
        r#"(() => {{
  try {{
    const el = document.querySelector({chain});
    if (!el) return {{ outcome: 'not_found' }};
    el.click();
    return {{ outcome: 'clicked' }};
  }} catch (err) {{
    return {{ outcome: 'error', message: String(err) }};
  }}
}})()"#
    )
}

/// Count visible option nodes, for the wait after opening a widget.
pub fn count_widget_options() -> String {
    let markers = js_str(WIDGET_OPTION_MARKERS);
    format!(r#"(() => ({{ count: document.querySelectorAll({markers}).length }}))()"#)
}

/// Scan the opened widget's options and click the first match.
pub fn pick_widget_option(desired: &str) -> String {
    let desired = js_str(desired);
    let markers = js_str(WIDGET_OPTION_MARKERS);
    format!(
        r#"(() => {{
  try {{
    const desired = {desired}.toLowerCase();
    const items = document.querySelectorAll({markers});
    for (const item of items) {{
      if (item.textContent.toLowerCase().includes(desired)) {{
        item.click();
        return {{ outcome: 'picked', label: item.textContent.trim() }};
      }}
    }}
    return {{ outcome: 'no_option', scanned: items.length }};
  }} catch (err) {{
    return {{ outcome: 'error', message: String(err) }};
  }}
}})()"#
    )
}

/// Float a toast in the page corner. The keyframe block is injected once,
/// keyed by element id, so repeated toasts reuse it.
pub fn toast(message: &str, color: &str, display_ms: u64, exit_ms: u64) -> String {
    let message = js_str(message);
    let color = js_str(color);
    format!(
        r#"(() => {{
  try {{
    if (!document.getElementById('gazza-toast-style')) {{
      const style = document.createElement('style');
      style.id = 'gazza-toast-style';
      style.textContent =
        '@keyframes gazza-slide-in {{ from {{ transform: translateX(120%); opacity: 0; }} to {{ transform: translateX(0); opacity: 1; }} }} ' +
        '@keyframes gazza-slide-out {{ from {{ transform: translateX(0); opacity: 1; }} to {{ transform: translateX(120%); opacity: 0; }} }}';
      document.head.appendChild(style);
    }}
    const toast = document.createElement('div');
    toast.textContent = {message};
    toast.style.cssText =
      'position: fixed; top: 20px; right: 20px; z-index: 2147483647; ' +
      'padding: 14px 18px; border-radius: 8px; color: #fff; ' +
      'font-family: -apple-system, BlinkMacSystemFont, sans-serif; ' +
      'font-size: 14px; font-weight: 600; ' +
      'box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2); ' +
      'background: ' + {color} + '; ' +
      'animation: gazza-slide-in 0.3s ease;';
    document.body.appendChild(toast);
    setTimeout(() => {{
      toast.style.animation = 'gazza-slide-out 0.3s ease';
      setTimeout(() => toast.remove(), {exit_ms});
    }}, {display_ms});
    return {{ outcome: 'shown' }};
  }} catch (err) {{
    return {{ outcome: 'error', message: String(err) }};
  }}
}})()"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_embedded_as_json_strings() {
        let script = set_text(r#"input[name*="title"]"#, r#"13" MacBook 'Pro'"#, false);
        assert!(script.contains(r#"document.querySelector("input[name*=\"title\"]")"#));
        assert!(script.contains(r#""13\" MacBook 'Pro'""#));
    }

    #[test]
    fn test_text_write_fires_bubbling_input_and_change() {
        let script = set_text("input", "x", false);
        assert!(script.contains("new Event('input', { bubbles: true })"));
        assert!(script.contains("new Event('change', { bubbles: true })"));
    }

    #[test]
    fn test_editable_write_uses_inner_text_without_change_event() {
        let script = set_text("div", "x", true);
        assert!(script.contains("innerText"));
        assert!(script.contains("new Event('input'"));
        assert!(!script.contains("new Event('change'"));
    }

    #[test]
    fn test_select_checks_current_option_before_scanning() {
        let script = select_option("select", "usato");
        let already = script.find("selectedOptions").unwrap();
        let scan = script.find("Array.from(el.options)").unwrap();
        assert!(already < scan);
        assert!(script.contains(".toLowerCase()"));
    }

    #[test]
    fn test_widget_scan_uses_the_option_markers() {
        let script = pick_widget_option("elettronica");
        assert!(script.contains(r#"[role=\"option\"], .dropdown-item, li[data-value]"#));
    }

    #[test]
    fn test_classify_covers_content_editable() {
        let script = classify("div");
        assert!(script.contains("isContentEditable"));
    }

    #[test]
    fn test_toast_embeds_color_and_timings() {
        let script = toast("Fatto", "#28a745", 3000, 300);
        assert!(script.contains("#28a745"));
        assert!(script.contains("}, 3000)"));
        assert!(script.contains("toast.remove(), 300)"));
        assert!(script.contains("getElementById('gazza-toast-style')"));
    }
}
