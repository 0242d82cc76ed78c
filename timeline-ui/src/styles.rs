#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use web_sys::Document;

const STYLE_ATTR: &str = "data-marker-strip";
const STYLE_VERSION: &str = "1";

/// CSS mặc định cho dải marker cùng các biến dễ ghi đè.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --timeline-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --timeline-text: #1f2933;
  --timeline-axis: #94a3b8;
  --timeline-item-bg: #ffffff;
  --timeline-item-border: #2563eb;
  --timeline-item-radius: 6px;
  --timeline-selected-bg: #fff7ec;
  --timeline-selected-border: #dc6803;
}

.marker-strip {
  position: relative;
  overflow: hidden;
  font-family: var(--timeline-font-family);
  color: var(--timeline-text);
}

.marker-strip .marker-foreground,
.marker-strip .marker-background {
  position: absolute;
  inset: 0;
}

.marker-strip .marker-axis {
  position: absolute;
  left: 0;
  right: 0;
  bottom: 0;
  height: 0;
  border-top: 1px solid var(--timeline-axis);
}

.marker-strip.orientation-top .marker-axis {
  top: 0;
  bottom: auto;
}

.marker-strip .item {
  position: absolute;
  box-sizing: border-box;
}

.marker-strip .item.box {
  padding: 4px 8px;
  white-space: nowrap;
  background: var(--timeline-item-bg);
  border: 1px solid var(--timeline-item-border);
  border-radius: var(--timeline-item-radius);
}

.marker-strip .item.line {
  width: 0;
  border-left: 1px solid var(--timeline-item-border);
}

.marker-strip .item.dot {
  width: 8px;
  height: 8px;
  border-radius: 50%;
  background: var(--timeline-item-border);
}

.marker-strip .item.point {
  white-space: nowrap;
}

.marker-strip .item.point .item.dot {
  position: absolute;
}

.marker-strip .item.selected {
  background: var(--timeline-selected-bg);
  border-color: var(--timeline-selected-border);
}

.marker-strip .item.dot.selected {
  background: var(--timeline-selected-border);
}
"#;

/// Chèn stylesheet của dải marker vào `<head>` đúng một lần. Thẻ đã có nhưng
/// khác phiên bản thì được ghi đè nội dung tại chỗ.
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if let Some(existing) = document.query_selector(&format!("style[{STYLE_ATTR}]"))? {
        if existing.get_attribute(STYLE_ATTR).as_deref() != Some(STYLE_VERSION) {
            existing.set_attribute(STYLE_ATTR, STYLE_VERSION)?;
            existing.set_text_content(Some(DEFAULT_STYLES));
            log::debug!("cập nhật stylesheet dải marker lên v{STYLE_VERSION}");
        }
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;
    let style = document.create_element("style")?;
    style.set_attribute(STYLE_ATTR, STYLE_VERSION)?;
    style.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style)?;
    Ok(())
}
