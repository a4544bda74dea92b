use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reel_core::{InstanceId, NullFactory, Point, Size};
use reel_foundation::{ItemTemplate, LayoutConfig, RecyclerLayout};

fn list(group_size: usize) -> RecyclerLayout<NullFactory> {
    let config = LayoutConfig {
        viewport: Size::new(360.0, 640.0),
        template: ItemTemplate {
            size: Size::new(360.0, 48.0),
            ..Default::default()
        },
        group_size,
        footer_loop: true,
        pool_capacity: 256,
        ..Default::default()
    };
    let mut layout =
        RecyclerLayout::new(config, NullFactory, |_: InstanceId, _: usize| {}).expect("config");
    layout.set_item_total(10_000);
    layout
}

fn scroll_ticks(layout: &mut RecyclerLayout<NullFactory>, ticks: usize) {
    let mut offset = layout.content_offset();
    for _ in 0..ticks {
        let next = Point::new(offset.x, offset.y + 8.0);
        black_box(layout.on_offset_changed(offset, next));
        offset = next;
    }
}

fn recycle_list_scroll(c: &mut Criterion) {
    let mut layout = list(1);
    c.bench_function("recycle_list_scroll_1000_ticks", |b| {
        b.iter(|| scroll_ticks(&mut layout, 1000));
    });
}

fn recycle_grid_scroll(c: &mut Criterion) {
    let mut layout = list(4);
    c.bench_function("recycle_grid_scroll_1000_ticks", |b| {
        b.iter(|| scroll_ticks(&mut layout, 1000));
    });
}

fn initial_growth(c: &mut Criterion) {
    c.bench_function("initial_growth", |b| {
        b.iter(|| black_box(list(1).len()));
    });
}

criterion_group!(benches, recycle_list_scroll, recycle_grid_scroll, initial_growth);
criterion_main!(benches);
