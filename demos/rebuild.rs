//! Rebuild a diagram with every distribution and print buffer statistics
//!
//! Run with `RUST_LOG=debug` to see per-stage timings.

use delaunay_canvas::*;

fn main() -> Result<()> {
    env_logger::init();

    let canvas = Canvas::fit(1920, 1080, MAX_CANVAS_EXTENT);
    println!("Canvas: {}x{}", canvas.width, canvas.height);

    let options = RenderOptions {
        delaunay_edges: true,
        voronoi_edges: true,
        points: true,
        convex_hull: true,
        use_external_color: true,
        ..RenderOptions::default()
    };

    for distribution in Distribution::ALL {
        let config = DiagramConfigBuilder::new()
            .canvas(canvas)
            .point_count(1000)
            .distribution(distribution)
            .build()?;

        let diagram = Diagram::rebuild(config)?;
        let buffers = diagram.buffers();

        println!("\n=== {} ===", distribution.name());
        println!("  Sites: {} (requested {})", diagram.points().len(), config.point_count);
        println!("  Expected radius: {:.3}", diagram.expected_radius());
        let (u, v) = buffers.normalized_expected_radius();
        println!("  Normalized radius: ({:.4}, {:.4})", u, v);

        for command in buffers.draw_list(&options) {
            let buffer = command.buffer;
            println!(
                "  {:<20} {:>6} vertices {:>6} primitives {:?} color {:?}",
                command.layer.name(),
                buffer.vertex_count(),
                buffer.primitive_count(),
                buffer.topology,
                command.color
            );
        }

        // 3 + 3 + 2 floats per vertex, 4 bytes each
        let total: usize = Layer::RENDER_ORDER
            .into_iter()
            .map(|layer| {
                let buffer = buffers.buffer(layer);
                buffer.vertex_count() * 32 + buffer.indices.as_ref().map_or(0, |i| i.len() * 4)
            })
            .sum();
        println!("  Total: {} bytes ({:.2} MB)", total, total as f32 / 1024.0 / 1024.0);
    }

    // Point-count stepping as the controls do it
    let config = DiagramConfigBuilder::new().canvas(canvas).point_count(100).build()?;
    println!("\n=== Point-count stepping ===");
    for config in [config.with_halved_points(), config, config.with_doubled_points()] {
        let diagram = Diagram::rebuild(config)?;
        println!(
            "  requested {:>4} -> {:>4} sites, {:>4} cells",
            config.point_count,
            diagram.points().len(),
            diagram.voronoi().face_count()
        );
    }

    Ok(())
}
