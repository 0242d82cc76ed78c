//! Dải marker timeline cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;

    use crate::dom::DomSurface;
    use crate::styles;
    use chrono::{Duration, Utc};
    use serde_wasm_bindgen::from_value;
    use timeline_core::{
        ItemBox, ItemOptions, ItemParent, LayerHost, MarkerData, Orientation, Positionable,
        TimeScale, TimelineError, Visible, VisibleRange,
    };
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, HtmlElement, Window};
    use yew::prelude::*;

    #[derive(Properties, PartialEq)]
    pub struct MarkerStripProps {
        pub markers: Vec<MarkerData<HtmlElement>>,
        pub range: VisibleRange,
        #[prop_or_default]
        pub options: ItemOptions,
        /// Khoảng cách từ trục tới thân hộp, áp dụng cho mọi item.
        #[prop_or(32.0)]
        pub item_offset: f64,
        #[prop_or(160.0)]
        pub height: f64,
    }

    type MountedItems = (DomSurface, Vec<ItemBox<DomSurface>>);

    #[function_component(MarkerStrip)]
    fn marker_strip(props: &MarkerStripProps) -> Html {
        let foreground = use_node_ref();
        let background = use_node_ref();
        let axis = use_node_ref();

        {
            let layers = (foreground.clone(), background.clone(), axis.clone());
            use_effect_with(
                (
                    props.markers.clone(),
                    props.range,
                    props.options.clone(),
                    props.item_offset,
                    props.height,
                ),
                move |(markers, range, options, item_offset, height)| {
                    let (foreground, background, axis) = layers;
                    let layers = [
                        foreground.cast::<HtmlElement>(),
                        background.cast::<HtmlElement>(),
                        axis.cast::<HtmlElement>(),
                    ];

                    let mut mounted =
                        match mount_items(layers, markers, *range, options, *item_offset, *height)
                        {
                            Ok(mounted) => Some(mounted),
                            Err(err) => {
                                console::error_1(&JsValue::from_str(&err.to_string()));
                                None
                            }
                        };

                    move || {
                        if let Some((mut surface, mut items)) = mounted.take() {
                            for item in items.iter_mut() {
                                item.hide(&mut surface);
                            }
                        }
                    }
                },
            );
        }

        let orientation = props.options.orientation.unwrap_or_default();
        let orientation_class = (orientation == Orientation::Top).then_some("orientation-top");
        html! {
            <div
                class={classes!("marker-strip", orientation_class)}
                style={format!("height: {}px", props.height)}
            >
                <div class="marker-background" ref={background}></div>
                <div class="marker-foreground" ref={foreground}></div>
                <div class="marker-axis" ref={axis}></div>
            </div>
        }
    }

    fn mount_items(
        layers: [Option<HtmlElement>; 3],
        markers: &[MarkerData<HtmlElement>],
        range: VisibleRange,
        options: &ItemOptions,
        item_offset: f64,
        height: f64,
    ) -> Result<MountedItems, TimelineError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| TimelineError::Surface("Không truy cập được document".to_string()))?;
        styles::ensure_styles(&document)
            .map_err(|err| TimelineError::Surface(format!("{err:?}")))?;

        let [foreground, background, axis] = layers;
        let width = foreground
            .as_ref()
            .map(|layer| layer.client_width() as f64)
            .unwrap_or_default();

        let mut host = LayerHost::new(TimeScale::new(range, width)?).with_height(height);
        if let Some(layer) = foreground {
            host = host.with_foreground(layer);
        }
        if let Some(layer) = background {
            host = host.with_background(layer);
        }
        if let Some(layer) = axis {
            host = host.with_axis(layer);
        }
        let host: Rc<dyn ItemParent<DomSurface>> = Rc::new(host);

        let mut surface = DomSurface::new(document);
        let mut items = Vec::with_capacity(markers.len());
        for data in markers {
            let mut item = ItemBox::new(data.clone(), ItemOptions::default(), options.clone())?
                .with_parent(host.clone());
            if item.is_visible(&range) {
                item.show(&mut surface)?;
                item.set_top(Some(item_offset));
                item.reposition_x(&mut surface)?;
                item.reposition_y(&mut surface)?;
            }
            items.push(item);
        }
        log::debug!("dải marker: {} item, cửa sổ {width}px", items.len());

        Ok((surface, items))
    }

    #[wasm_bindgen]
    pub fn mount_marker_strip(
        selector: &str,
        markers: JsValue,
        range: Option<JsValue>,
        options: Option<JsValue>,
    ) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let markers: Vec<MarkerData<HtmlElement>> = from_value(markers)?;
        let range = match range {
            Some(range) => from_value(range)?,
            None => {
                let now = Utc::now();
                VisibleRange::new(now - Duration::hours(12), now + Duration::hours(12))
                    .map_err(|err| JsValue::from_str(&err.to_string()))?
            }
        };
        let options: ItemOptions = match options {
            Some(options) => from_value(options)?,
            None => ItemOptions::default(),
        };

        yew::Renderer::<MarkerStrip>::with_root_and_props(
            target,
            MarkerStripProps {
                markers,
                range,
                options,
                item_offset: 32.0,
                height: 160.0,
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_marker_strip;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_marker_strip(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
