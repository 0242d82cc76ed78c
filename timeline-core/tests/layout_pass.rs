use std::fs;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use timeline_core::{
    ItemBox, ItemOptions, LayerHost, MarkerData, MemorySurface, NodeId, Positionable, Size,
    StyleProp, Surface, TimeScale, TimelineError, Visible, VisibleRange,
};

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn load_markers() -> Vec<MarkerData<NodeId>> {
    let raw = fs::read_to_string(fixture_path("ward_markers.json"))
        .expect("Không đọc được danh sách marker mẫu");
    serde_json::from_str(&raw).expect("Danh sách marker không hợp lệ")
}

fn ward_range() -> VisibleRange {
    VisibleRange::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap(),
    )
    .unwrap()
}

fn surface() -> MemorySurface {
    MemorySurface::new()
        .with_size("box", Size::new(40.0, 24.0))
        .with_size("line", Size::new(2.0, 0.0))
        .with_size("dot", Size::new(10.0, 10.0))
}

/// Một lượt bố cục như timeline cha thực hiện: ẩn item ngoài cửa sổ, hiện và
/// định vị item trong cửa sổ.
fn layout_pass<I>(
    items: &mut [I],
    range: &VisibleRange,
    surface: &mut MemorySurface,
    top: f64,
) -> Result<(), TimelineError>
where
    I: Visible<MemorySurface> + Positionable<MemorySurface>,
{
    for item in items.iter_mut() {
        if !item.is_visible(range) {
            item.hide(surface);
            continue;
        }
        item.show(surface)?;
        item.set_top(Some(top));
        item.reposition_x(surface)?;
        item.reposition_y(surface)?;
    }
    Ok(())
}

#[test]
fn fixture_markers_are_laid_out_against_the_ward_window() {
    let mut surface = surface();
    let scale = TimeScale::new(ward_range(), 960.0).unwrap();
    let host = Rc::new(LayerHost::with_layers(scale, &mut surface).unwrap());

    let (valid, invalid): (Vec<_>, Vec<_>) = load_markers()
        .into_iter()
        .map(|data| {
            ItemBox::<MemorySurface>::new(data, ItemOptions::default(), ItemOptions::default())
        })
        .partition(Result::is_ok);

    assert_eq!(invalid.len(), 1);
    assert!(matches!(
        invalid.into_iter().next().unwrap(),
        Err(TimelineError::MissingField { field: "start", .. })
    ));

    let mut items: Vec<ItemBox<MemorySurface>> = valid
        .into_iter()
        .map(|item| item.unwrap().with_parent(host.clone()))
        .collect();

    layout_pass(&mut items, &ward_range(), &mut surface, 20.0).unwrap();

    let lefts: Vec<Option<f64>> = items.iter().map(|item| item.geometry().left).collect();
    assert_eq!(lefts, vec![None, Some(280.0), Some(580.0), None]);

    let selected_body = items[2].body().unwrap();
    assert_eq!(surface.class_name(selected_body), "item box selected");
    assert_eq!(
        surface.class_name(items[1].body().unwrap()),
        "item box imaging"
    );

    let line = items[1].parts().unwrap()[1];
    assert_eq!(surface.style(line, StyleProp::Height), Some(20.0));
    assert_eq!(surface.style(line, StyleProp::Left), Some(299.0));
}

#[test]
fn scrolling_the_window_hides_and_reshows_without_recreating() {
    let mut surface = surface();
    let range = ward_range();
    let scale = TimeScale::new(range, 960.0).unwrap();
    let host = Rc::new(LayerHost::with_layers(scale, &mut surface).unwrap());

    let mut items = vec![ItemBox::<MemorySurface>::new(
        MarkerData::new(1_i64, Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()))
            .with_content("A"),
        ItemOptions::default(),
        ItemOptions::default(),
    )
    .unwrap()
    .with_parent(host.clone())];

    layout_pass(&mut items, &range, &mut surface, 10.0).unwrap();
    let nodes = items[0].parts().unwrap().map(|node| *node);

    let later = VisibleRange::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap(),
    )
    .unwrap();
    layout_pass(&mut items, &later, &mut surface, 10.0).unwrap();
    assert!(!items[0].is_displayed());
    assert!(nodes.iter().all(|node| !surface.is_attached(node)));

    layout_pass(&mut items, &range, &mut surface, 10.0).unwrap();
    assert_eq!(items[0].parts().unwrap().map(|node| *node), nodes);
    assert!(nodes.iter().all(|node| surface.is_attached(node)));
    assert_eq!(surface.measurement_count(), 3);
}
