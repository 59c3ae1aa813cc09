//! Umbra shadow dump: builds the shadow volumes of a small scene and prints
//! what a stencil renderer would receive.
//!
//! Usage:
//! ```text
//! cargo run --example shadow_dump             # depth-fail, capped volumes
//! cargo run --example shadow_dump -- zpass    # depth-pass, open volumes
//! RUST_LOG=umbra=trace cargo run --example shadow_dump
//! ```

use std::sync::Arc;

use umbra::math::{Matrix4, Point3, Vector3};
use umbra::mesh::AnimatedMesh;
use umbra::{
    CapMethod, DebugFlags, Light, LightRegistry, Mesh, ShadowVolumeConfig, ShadowVolumeNode,
    StencilSink, UmbraError,
};

/// Prints every submission instead of rasterizing it.
#[derive(Default)]
struct PrintSink {
    draws: usize,
}

impl StencilSink for PrintSink {
    fn set_world_transform(&mut self, transform: &Matrix4) {
        let t = transform.column(3);
        println!("  world translation: ({:.2}, {:.2}, {:.2})", t[0], t[1], t[2]);
    }

    fn draw_stencil_shadow_volume(&mut self, triangles: &[Point3], zfail: bool, debug: DebugFlags) {
        self.draws += 1;
        println!(
            "  volume {}: {} triangles, {}",
            self.draws,
            triangles.len() / 3,
            if zfail { "zfail" } else { "zpass" },
        );
        if debug.any() {
            println!("    debug overlay {:#x}", debug.0);
        }
    }
}

fn cube(size: f32, z: f32) -> Result<Mesh, UmbraError> {
    let c = |x: f32, y: f32, zz: f32| Point3::new(x * size, y * size, zz * size + z);
    let positions = vec![
        c(0.0, 0.0, 0.0),
        c(1.0, 0.0, 0.0),
        c(1.0, 1.0, 0.0),
        c(0.0, 1.0, 0.0),
        c(0.0, 0.0, 1.0),
        c(1.0, 0.0, 1.0),
        c(1.0, 1.0, 1.0),
        c(0.0, 1.0, 1.0),
    ];
    let indices = vec![
        0, 3, 2, 0, 2, 1, // -z
        4, 5, 6, 4, 6, 7, // +z
        0, 1, 5, 0, 5, 4, // -y
        3, 7, 6, 3, 6, 2, // +y
        0, 4, 7, 0, 7, 3, // -x
        1, 2, 6, 1, 6, 5, // +x
    ];
    Mesh::from_triangles(positions, indices)
}

fn main() -> Result<(), UmbraError> {
    // Default: WARN for everything, INFO for umbra.
    // Override with RUST_LOG env var (e.g. RUST_LOG=umbra=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("umbra=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let method = match std::env::args().nth(1).as_deref() {
        Some("zpass") => CapMethod::ZPass,
        _ => CapMethod::ZFail,
    };
    let config = ShadowVolumeConfig::default().with_method(method);

    // A cube that bobs between two heights.
    let caster = Arc::new(AnimatedMesh::new(vec![cube(1.0, 0.0)?, cube(1.0, 0.5)?])?);
    let mut node = ShadowVolumeNode::with_mesh(config, caster.clone())?;
    node.set_debug_flags(DebugFlags(0x1));

    let mut lights = LightRegistry::new();
    lights.add(Light::new(Point3::new(3.0, 3.0, 4.0), 10.0));
    lights.add(Light::new(Point3::new(-2.0, 0.5, 2.0), 10.0));
    lights.add(Light::new(Point3::new(100.0, 0.0, 0.0), 1.0));
    lights.add(Light::new(Point3::new(0.5, 0.5, 6.0), 10.0).with_cast_shadows(false));

    let world = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));
    let mut sink = PrintSink::default();

    for frame in 0..caster.frame_count() {
        caster.set_frame(frame);
        node.update(&lights, &world);
        println!(
            "frame {frame}: {} triangles in mesh, {} volumes",
            node.snapshot().triangle_count(),
            node.volume_count()
        );
        node.render(&mut sink, &world);
    }

    println!(
        "adjacency built {} time(s) for {} frames",
        node.adjacency_rebuilds(),
        caster.frame_count()
    );
    Ok(())
}
