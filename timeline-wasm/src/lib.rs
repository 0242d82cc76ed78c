//! Bridge WASM <-> JavaScript trung lập framework cho bố cục marker.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{
    validate_margin, Align, BoxFootprint, BoxLayout, ItemOptions, MarkerData, MarkerRecord,
    Orientation, PointLayout, Size, TimeScale, TimelineError, VisibleRange,
};
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsItemOptions {
    #[serde(default)]
    align: Option<Align>,
    #[serde(default)]
    orientation: Option<Orientation>,
    #[serde(default)]
    visibility_margin: Option<f64>,
}

impl From<JsItemOptions> for ItemOptions {
    fn from(cfg: JsItemOptions) -> Self {
        ItemOptions {
            align: cfg.align,
            orientation: cfg.orientation,
            visibility_margin: cfg.visibility_margin,
        }
    }
}

/// Đầu vào tính bố cục: cửa sổ thời gian, chiều rộng vùng vẽ và kích thước
/// đã đo phía JS.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoxLayoutRequest {
    range: VisibleRange,
    width: f64,
    start: DateTime<Utc>,
    footprint: BoxFootprint,
    #[serde(default)]
    top: Option<f64>,
    #[serde(default)]
    options: JsItemOptions,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointLayoutRequest {
    range: VisibleRange,
    width: f64,
    start: DateTime<Utc>,
    body: Size,
    dot: Size,
    #[serde(default)]
    top: Option<f64>,
    #[serde(default)]
    container_height: f64,
    #[serde(default)]
    options: JsItemOptions,
}

fn compute_box_layout(request: BoxLayoutRequest) -> Result<BoxLayout, TimelineError> {
    let scale = TimeScale::new(request.range, request.width)?;
    let options = ItemOptions::from(request.options).resolve(&ItemOptions::default());
    Ok(BoxLayout::compute(
        scale.to_screen(request.start),
        &request.footprint,
        request.top,
        options.align,
        options.orientation,
    ))
}

fn compute_point_layout(request: PointLayoutRequest) -> Result<PointLayout, TimelineError> {
    let scale = TimeScale::new(request.range, request.width)?;
    let options = ItemOptions::from(request.options).resolve(&ItemOptions::default());
    Ok(PointLayout::compute(
        scale.to_screen(request.start),
        request.body,
        request.dot,
        request.top,
        request.container_height,
        options.orientation,
    ))
}

fn marker_visible(
    data: MarkerData<()>,
    range: &VisibleRange,
    margin: f64,
) -> Result<bool, TimelineError> {
    let margin = validate_margin(margin)?;
    let record = MarkerRecord::try_from(data)?;
    Ok(range.contains(record.start, margin))
}

/// Bật log ra console trình duyệt. `level` mặc định là "info".
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> Result<(), JsValue> {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let level = level
            .as_deref()
            .unwrap_or("info")
            .parse::<log::Level>()
            .map_err(|err| JsValue::from_str(&format!("Mức log không hợp lệ: {err}")))?;
        console_log::init_with_level(level)
            .map_err(|err| JsValue::from_str(&format!("Không khởi tạo được logger: {err}")))?;
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
    Ok(())
}

#[wasm_bindgen]
pub fn is_marker_visible(
    record: JsValue,
    range: JsValue,
    margin: Option<f64>,
) -> Result<bool, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let data: MarkerData<()> = from_value(record)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được item: {err}")))?;
    let range: VisibleRange = from_value(range)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được khoảng thời gian: {err}")))?;

    marker_visible(data, &range, margin.unwrap_or(0.0))
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))
}

#[wasm_bindgen]
pub fn layout_box(input: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let request: BoxLayoutRequest = from_value(input)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được yêu cầu bố cục: {err}")))?;

    let layout = compute_box_layout(request)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&layout).map_err(|err| JsValue::from_str(&format!("Không serialize bố cục: {err}")))
}

#[wasm_bindgen]
pub fn layout_point(input: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let request: PointLayoutRequest = from_value(input)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được yêu cầu bố cục: {err}")))?;

    let layout = compute_point_layout(request)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&layout).map_err(|err| JsValue::from_str(&format!("Không serialize bố cục: {err}")))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}
