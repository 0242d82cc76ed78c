use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use timeline_core::{
    validate_margin, Align, ItemBox, ItemOptions, ItemParent, ItemPoint, LayerHost, MarkerData,
    MarkerId, MemorySurface, NodeId, Orientation, Positionable, Size, TimeScale, TimelineError,
    Visible, VisibleRange,
};

#[derive(Parser, Debug)]
#[command(
    name = "timeline-cli",
    about = "Tính vị trí marker timeline từ file JSON, không cần trình duyệt."
)]
struct Args {
    /// Đường dẫn tới file JSON chứa danh sách marker.
    #[arg(short, long)]
    input: PathBuf,
    /// Đầu cửa sổ thời gian (RFC 3339). Mặc định suy ra từ dữ liệu.
    #[arg(long)]
    start: Option<DateTime<Utc>>,
    /// Cuối cửa sổ thời gian (RFC 3339).
    #[arg(long)]
    end: Option<DateTime<Utc>>,
    /// Chiều rộng vùng vẽ, đơn vị px.
    #[arg(long, default_value_t = 960.0)]
    width: f64,
    #[arg(long, default_value = "center")]
    align: Align,
    #[arg(long, default_value = "bottom")]
    orientation: Orientation,
    /// Tỉ lệ nới cửa sổ hai phía khi lọc marker.
    #[arg(long, default_value_t = 0.0)]
    margin: f64,
    /// Khoảng cách từ trục tới thân marker, đơn vị px.
    #[arg(long, default_value_t = 20.0)]
    top: f64,
    /// Dùng marker dạng điểm thay cho dạng hộp.
    #[arg(long)]
    point: bool,
    #[arg(long, default_value_t = 80.0)]
    body_width: f64,
    #[arg(long, default_value_t = 24.0)]
    body_height: f64,
}

struct Placed<I> {
    id: MarkerId,
    start: DateTime<Utc>,
    item: I,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;
    let markers: Vec<MarkerData<NodeId>> =
        serde_json::from_str(&data).context("File không phải danh sách marker hợp lệ")?;

    let range = resolve_range(&args, &markers)?;
    let scale = TimeScale::new(range, args.width)?;

    let mut surface = MemorySurface::new()
        .with_size("box", Size::new(args.body_width, args.body_height))
        .with_size("point", Size::new(args.body_width, args.body_height))
        .with_size("line", Size::new(1.0, 0.0))
        .with_size("dot", Size::new(8.0, 8.0));
    let host: Rc<dyn ItemParent<MemorySurface>> = Rc::new(
        LayerHost::with_layers(scale, &mut surface)?.with_height(args.top + args.body_height),
    );

    let defaults = ItemOptions {
        align: Some(args.align),
        orientation: Some(args.orientation),
        visibility_margin: Some(validate_margin(args.margin)?),
    };

    println!("Window: {} -> {} ({}px)", range.start, range.end, args.width);

    if args.point {
        let mut items = place(markers, |data| {
            Ok(ItemPoint::<MemorySurface>::new(data, ItemOptions::default(), defaults.clone())?
                .with_parent(host.clone()))
        });
        lay_out(&mut items, &range, &mut surface, args.top)?;
        report(&items);
    } else {
        let mut items = place(markers, |data| {
            Ok(ItemBox::<MemorySurface>::new(data, ItemOptions::default(), defaults.clone())?
                .with_parent(host.clone()))
        });
        lay_out(&mut items, &range, &mut surface, args.top)?;
        report(&items);
    }

    Ok(())
}

/// Cửa sổ lấy từ tham số; thiếu thì suy ra từ marker, nới 10% mỗi phía để
/// marker ở hai đầu vẫn nằm hẳn trong cửa sổ.
fn resolve_range(args: &Args, markers: &[MarkerData<NodeId>]) -> anyhow::Result<VisibleRange> {
    let starts = || markers.iter().filter_map(|marker| marker.start);
    let (Some(first), Some(last)) = (starts().min(), starts().max()) else {
        if let (Some(start), Some(end)) = (args.start, args.end) {
            return Ok(VisibleRange::new(start, end)?);
        }
        bail!("Không có marker nào có thời điểm để suy ra cửa sổ");
    };

    let span = last - first;
    let padding = if span > Duration::zero() {
        span / 10
    } else {
        Duration::hours(1)
    };

    Ok(VisibleRange::new(
        args.start.unwrap_or(first - padding),
        args.end.unwrap_or(last + padding),
    )?)
}

fn place<I>(
    markers: Vec<MarkerData<NodeId>>,
    new_item: impl Fn(MarkerData<NodeId>) -> Result<I, TimelineError>,
) -> Vec<Placed<I>> {
    markers
        .into_iter()
        .filter_map(|data| {
            let id = data.id.clone();
            let start = data.start;
            match new_item(data) {
                Ok(item) => start.map(|start| Placed { id, start, item }),
                Err(err) => {
                    log::warn!("Bỏ qua marker {id}: {err}");
                    None
                }
            }
        })
        .collect()
}

fn lay_out<I>(
    items: &mut [Placed<I>],
    range: &VisibleRange,
    surface: &mut MemorySurface,
    top: f64,
) -> Result<(), TimelineError>
where
    I: Visible<MemorySurface> + Positionable<MemorySurface>,
{
    for placed in items.iter_mut() {
        let item = &mut placed.item;
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

fn report<I>(items: &[Placed<I>])
where
    I: Visible<MemorySurface> + Positionable<MemorySurface>,
{
    for placed in items {
        let geometry = placed.item.geometry();
        match geometry.left {
            Some(left) if placed.item.is_displayed() => println!(
                "{}\t{}\tleft={left:.1}\ttop={:.1}\twidth={:.1}",
                placed.id,
                placed.start,
                geometry.top.unwrap_or(0.0),
                geometry.width
            ),
            _ => println!("{}\t{}\t(ngoài cửa sổ)", placed.id, placed.start),
        }
    }
}
