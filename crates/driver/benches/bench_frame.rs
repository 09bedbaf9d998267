use std::hint::black_box;
use std::time::Instant;

use stardrift_common::Ray;
use stardrift_driver::{Session, SessionConfig};
use stardrift_input::{InputEvent, Viewport};
use stardrift_render::{HeadlessRenderer, Renderer};
use stardrift_tools::ReadoutBoard;

fn make_session(objects: usize) -> Session<HeadlessRenderer> {
    let mut config = SessionConfig {
        seed: Some(7),
        ..SessionConfig::default()
    };
    config.objects.count = objects;
    Session::new(config, HeadlessRenderer::new(1280, 720), Viewport::new(1280, 720))
        .expect("default config is valid")
}

fn bench_frame(objects: usize, iterations: usize) {
    let mut session = make_session(objects);
    let mut board = ReadoutBoard::new();

    let start = Instant::now();
    for i in 0..iterations {
        session.push_event(InputEvent::PointerMoved {
            x: (i * 13 % 1280) as f32,
            y: (i * 7 % 720) as f32,
        });
        let now = i as f64 / 60.0;
        black_box(session.frame(black_box(now), &mut board));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  frame ({objects} objects, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_pick(objects: usize, iterations: usize) {
    let session = make_session(objects);
    let nodes: Vec<_> = session
        .scene()
        .objects()
        .iter()
        .filter_map(|o| session.object_node(o.id))
        .collect();
    let ray = session.camera().camera().ray_through_ndc(glam::Vec2::ZERO);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(session.renderer().intersect(black_box(&ray), &nodes));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  pick ({objects} objects, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_ray_miss(iterations: usize) {
    let session = make_session(69);
    let nodes: Vec<_> = (0..69u32)
        .filter_map(|i| session.object_node(stardrift_common::ObjectId(i)))
        .collect();
    let ray = Ray::new(glam::Vec3::new(0.0, 500.0, 0.0), glam::Vec3::Y);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(session.renderer().intersect(black_box(&ray), &nodes));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  pick miss (69 objects, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Frame driver benchmarks ===\n");

    println!("Full frame:");
    bench_frame(69, 1_000);
    bench_frame(690, 200);

    println!("\nHover picking:");
    bench_pick(69, 10_000);
    bench_pick(690, 1_000);
    bench_ray_miss(10_000);
}
